pub mod config;
mod routes;
pub mod state;

use anyhow::Result;
use folio_axum::{axum, statics, AxumApp};
use folio_core::FolioConfig;

pub use state::{AppEnv, AppState, ServerSettings};

pub fn build(config: &FolioConfig) -> Result<AxumApp<AppState>> {
    let state = AppState::from_config(&config.snapshot())?;
    Ok(build_with(state))
}

/// Wire routes, static media mounts and the layer stack around `state`.
pub fn build_with(state: AppState) -> AxumApp<AppState> {
    let images = statics::images(state.store.images_dir());
    let gifs = statics::gifs(state.store.gifs_dir());
    let routes = routes::router(&state);

    axum(state)
        .use_router("/", routes)
        .mount_static("/images", images)
        .mount_static("/gifs", gifs)
        .with_standard_layers()
}
