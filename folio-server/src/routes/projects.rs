use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use folio_axum::AxumResult;
use folio_core::{CatalogFilter, FolioError, ProjectRecord};
use serde_json::{json, Value};

use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<CatalogFilter>, QueryRejection>,
) -> AxumResult<Json<Vec<ProjectRecord>>> {
    let Query(filter) = filter.map_err(|rejection| {
        FolioError::bad_request("Invalid project filter")
            .with_errors(json!({ "query": [rejection.body_text()] }))
    })?;

    let projects = state.catalog.filter(&filter).into_iter().cloned().collect();
    Ok(Json(projects))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AxumResult<Json<ProjectRecord>> {
    let project = state.catalog.get_by_segment(&id)?;
    Ok(Json(project.clone()))
}

pub async fn route_test(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Projects route is working",
        "dataSource": "Static project catalog - no database connection",
        "projectCount": state.catalog.len(),
    }))
}
