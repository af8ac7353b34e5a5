mod checks;
mod contact;
mod media;
mod meta;
mod projects;

use axum::handler::Handler;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::AppState;

/// Every route the server answers. Unmatched paths go to the client build
/// directory first and then to the JSON 404; a wrong method on a known path
/// gets a JSON 405.
pub fn router(state: &AppState) -> Router<AppState> {
    let client = ServeDir::new(&state.settings.client_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(meta::not_found.with_state(state.clone()));

    Router::new()
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        .route("/api/test", get(meta::api_test))
        .route("/api/resume", get(meta::resume))
        .route("/api/projects", get(projects::list))
        .route("/api/projects/test", get(projects::route_test))
        .route("/api/projects/{id}", get(projects::get_one))
        .route("/api/projects/{id}/media", get(media::gallery))
        .route("/api/projects/{id}/display", get(media::display))
        .route("/check-image/{filename}", get(checks::image))
        .route("/check-gif/{filename}", get(checks::gif))
        .route("/api/contact", post(contact::submit))
        .method_not_allowed_fallback(meta::method_not_allowed)
        .fallback_service(client)
}
