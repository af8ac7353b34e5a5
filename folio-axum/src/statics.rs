//! Static media directories served with caching disabled, so replaced
//! files show up immediately in the browser.

use std::path::Path;

use axum::http::{header, HeaderValue};
use axum::middleware::map_response;
use axum::response::Response;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// `ServeDir` over `dir` with no-cache headers and open CORS. When
/// `content_type` is given it replaces whatever was guessed from the file;
/// error responses keep their own type.
pub fn no_cache_dir(dir: impl AsRef<Path>, content_type: Option<HeaderValue>) -> Router {
    let mut files = Router::new().fallback_service(ServeDir::new(dir.as_ref()));

    if let Some(content_type) = content_type {
        files = files.layer(map_response(move |mut res: Response| {
            let content_type = content_type.clone();
            async move {
                if res.status().is_success() {
                    res.headers_mut().insert(header::CONTENT_TYPE, content_type);
                }
                res
            }
        }));
    }

    files
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_CACHE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}

pub fn images(dir: impl AsRef<Path>) -> Router {
    no_cache_dir(dir, None)
}

pub fn gifs(dir: impl AsRef<Path>) -> Router {
    no_cache_dir(dir, Some(HeaderValue::from_static("image/gif")))
}
