use std::io::ErrorKind as IoErrorKind;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use folio_axum::{AxumResult, FolioAxumError};
use folio_core::FolioError;
use serde_json::{json, Value};

use crate::AppState;

const ENDPOINTS: [&str; 3] = ["/api/projects", "/api/contact", "/api/test"];

async fn client_index(state: &AppState) -> Option<String> {
    tokio::fs::read_to_string(state.settings.client_index()).await.ok()
}

/// The client build when there is one, otherwise a short API listing.
pub async fn root(State(state): State<AppState>) -> Response {
    if let Some(index) = client_index(&state).await {
        return Html(index).into_response();
    }

    Json(json!({
        "message": "Portfolio API Server is running",
        "endpoints": {
            "projects": "/api/projects",
            "contact": "/api/contact",
            "test": "/api/test",
        }
    }))
    .into_response()
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn api_test() -> Json<Value> {
    Json(json!({
        "message": "API is working!",
        "approach": "Static data - no database connection",
    }))
}

pub async fn resume(State(state): State<AppState>) -> AxumResult<Response> {
    let path = &state.settings.resume_path;

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == IoErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "resume file missing");
            return Err(FolioError::not_found("Resume not found").into());
        }
        Err(err) => {
            return Err(FolioError::general_error("Failed to read resume")
                .with_source(err.into())
                .into());
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"resume.pdf\""),
        ],
        bytes,
    )
        .into_response())
}

/// Unmatched routes. Browser paths get the client's `index.html` so
/// client-side routing works; API paths always get JSON.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    let api = uri.path().starts_with("/api/");

    if !api {
        if let Some(index) = client_index(&state).await {
            return Html(index).into_response();
        }
    }

    let error = if api {
        "API endpoint not found"
    } else {
        "Route not found"
    };
    tracing::debug!(path = uri.path(), "no route");

    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": error, "endpoints": ENDPOINTS })),
    )
        .into_response()
}

/// A known path called with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> FolioAxumError {
    tracing::debug!(%method, path = uri.path(), "method not allowed");
    FolioError::method_not_allowed(format!("{method} is not supported on {}", uri.path())).into()
}
