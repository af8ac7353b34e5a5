use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::FolioError;
use folio_mail::ContactMessage;
use serde::Serialize;

use crate::AppState;

pub const SENT: &str = "Your message has been sent. Thank you!";

#[derive(Serialize)]
struct Reply {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn reply(status: StatusCode, success: bool, message: impl Into<String>, error: Option<String>) -> Response {
    let body = Reply {
        success,
        message: message.into(),
        error,
    };
    (status, Json(body)).into_response()
}

/// The contact form speaks `{success, message}` rather than the error
/// envelope used elsewhere.
pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<ContactMessage>, JsonRejection>,
) -> Response {
    let Json(contact) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "contact body rejected");
            return reply(
                StatusCode::BAD_REQUEST,
                false,
                "Failed to parse the request body as JSON",
                None,
            );
        }
    };

    match state.mail.send(&contact).await {
        Ok(_) => reply(StatusCode::OK, true, SENT, None),
        Err(err) => {
            let normalized = FolioError::normalize(err);
            let status = StatusCode::from_u16(normalized.code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            let detail = if status.is_server_error() && !state.settings.env.is_production() {
                normalized.source_detail()
            } else {
                None
            };
            reply(status, false, normalized.message, detail)
        }
    }
}
