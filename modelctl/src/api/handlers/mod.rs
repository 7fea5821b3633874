//! HTTP request handlers.
//!
//! - [`auth`]: login
//! - [`modelos`]: list, create, update and delete modelos (bearer token required)
//! - [`static_assets`]: the embedded front-end and its client-side routes
//!
//! Handlers return [`crate::errors::Error`], which renders as a JSON `{"error": ...}` body with
//! the matching status code.

use axum::http::Uri;

use crate::errors::Error;

pub mod auth;
pub mod modelos;
pub mod static_assets;

/// Fallback for `/api` paths that match no route. API clients get a JSON 404 rather than the
/// front-end's `index.html`.
pub async fn api_not_found(uri: Uri) -> Error {
    Error::NotFound {
        resource: "Recurso".to_string(),
        id: uri.path().to_string(),
    }
}
