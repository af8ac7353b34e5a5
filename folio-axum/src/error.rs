use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::FolioError;
use serde_json::json;

pub type AxumResult<T> = Result<T, FolioAxumError>;

#[derive(Debug)]
pub struct FolioAxumError(pub anyhow::Error);

impl From<anyhow::Error> for FolioAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<FolioError> for FolioAxumError {
    fn from(e: FolioError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for FolioAxumError {
    fn into_response(self) -> Response {
        // A FolioError anywhere in the chain keeps its status and fields.
        if let Some(folio) = FolioError::from_anyhow(&self.0) {
            if folio.code() >= 500 {
                tracing::error!(error = %folio, detail = ?folio.source_detail(), "request failed");
            }
            let safe = folio.sanitize_for_client();
            let status =
                StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(safe.to_json())).into_response();
        }

        // Anything else is an unexpected failure.
        tracing::error!(error = %format!("{:#}", self.0), "unhandled error");
        let folio = FolioError::general_error(self.0.to_string());
        let safe = folio.sanitize_for_client();
        let status = StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(safe.to_json())).into_response()
    }
}

/// Malformed or non-JSON request bodies become a `BadRequest`.
pub fn json_rejection(rejection: JsonRejection) -> FolioAxumError {
    FolioError::bad_request("Failed to parse the request body as JSON")
        .with_errors(json!({"_schema": [rejection.body_text()]}))
        .into()
}
