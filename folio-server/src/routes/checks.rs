//! Debug endpoints reporting whether a media file is on disk.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_axum::AxumResult;
use folio_core::FolioError;
use folio_media::{MediaError, MediaInfo, MediaKind};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct Found {
    exists: bool,
    #[serde(flatten)]
    info: MediaInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Missing {
    exists: bool,
    message: String,
    checked_paths: Vec<String>,
}

pub async fn image(State(state): State<AppState>, Path(filename): Path<String>) -> AxumResult<Response> {
    check(&state, MediaKind::Image, &filename).await
}

pub async fn gif(State(state): State<AppState>, Path(filename): Path<String>) -> AxumResult<Response> {
    check(&state, MediaKind::Animated, &filename).await
}

async fn check(state: &AppState, kind: MediaKind, filename: &str) -> AxumResult<Response> {
    match state.store.stat(kind, filename).await {
        Ok(Some(info)) => Ok(Json(Found { exists: true, info }).into_response()),
        Ok(None) => {
            let message = match kind {
                MediaKind::Image => format!("Image {filename} not found in any image directory"),
                MediaKind::Animated => format!("GIF {filename} not found"),
            };
            let checked_paths = state
                .store
                .candidate_paths(kind, filename)
                .iter()
                .map(|p| p.display().to_string())
                .collect();

            let body = Missing {
                exists: false,
                message,
                checked_paths,
            };
            Ok((StatusCode::NOT_FOUND, Json(body)).into_response())
        }
        Err(err @ MediaError::Invalid { .. }) => Err(FolioError::bad_request(err.to_string()).into()),
        Err(err) => Err(FolioError::general_error(format!("Error checking {kind} stats"))
            .with_source(err.into())
            .into()),
    }
}
