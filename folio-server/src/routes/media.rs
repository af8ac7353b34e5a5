use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_axum::AxumResult;
use folio_core::FolioError;
use folio_media::{assemble_gallery, MediaCandidate, MediaKind};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DisplayQuery {
    pub kind: Option<MediaKind>,
}

pub async fn gallery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AxumResult<Json<Vec<MediaCandidate>>> {
    let project = state.catalog.get_by_segment(&id)?;
    let gallery =
        assemble_gallery(project, state.existence.as_ref(), state.resolver.settings()).await;
    Ok(Json(gallery.into_items()))
}

pub async fn display(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DisplayQuery>, QueryRejection>,
) -> AxumResult<Response> {
    let project = state.catalog.get_by_segment(&id)?;
    let Query(query) = query.map_err(|rejection| {
        FolioError::bad_request("kind must be 'image' or 'gif'")
            .with_errors(json!({ "kind": [rejection.body_text()] }))
    })?;

    let media = match query.kind {
        Some(kind) => {
            state
                .resolver
                .resolve_kind(project, kind, state.existence.as_ref())
                .await
        }
        None => {
            state
                .resolver
                .resolve_display_media(project, state.existence.as_ref())
                .await
        }
    };

    Ok(Json(media.view()).into_response())
}
