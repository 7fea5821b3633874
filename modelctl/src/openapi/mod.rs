//! OpenAPI documentation for the modelo API.
//!
//! [`ApiDoc`] describes every route under `/api`. It is served as JSON at
//! `/static/swagger.json` and rendered at `/swagger`.

pub mod api;

pub use api::ApiDoc;
