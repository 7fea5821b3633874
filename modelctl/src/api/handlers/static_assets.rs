//! Serving the embedded front-end bundle.

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::static_assets::Assets;

const IMMUTABLE: &str = "public, max-age=31536000, immutable";
const NO_CACHE: &str = "no-cache";

/// Serve a file from the embedded bundle, falling back to `index.html` for client-side routes.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn serve_embedded_asset(uri: Uri) -> Response {
    let mut path = uri.path().trim_start_matches('/');

    if path.is_empty() || path.ends_with('/') {
        path = "index.html";
    }

    if let Some(content) = Assets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        // Build output under assets/ carries content hashes
        let cache_control = if path.starts_with("assets/") { IMMUTABLE } else { NO_CACHE };

        return (
            [(header::CONTENT_TYPE, mime.to_string()), (header::CACHE_CONTROL, cache_control.to_string())],
            content.data.into_owned(),
        )
            .into_response();
    }

    if let Some(index) = Assets::get("index.html") {
        debug!("Serving index.html for client-side route");
        return (
            [(header::CONTENT_TYPE, "text/html"), (header::CACHE_CONTROL, NO_CACHE)],
            index.data.into_owned(),
        )
            .into_response();
    }

    StatusCode::NOT_FOUND.into_response()
}
