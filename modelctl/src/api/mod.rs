//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//! - **[`extract`]**: Body and path extractors that reject with JSON errors
//!
//! # API Structure
//!
//! Everything is mounted under `/api`:
//!
//! - `POST /api/login`: exchange credentials for a bearer token
//! - `GET|POST /api/modelos`, `PUT|DELETE /api/modelos/{id}`: modelo CRUD
//!
//! The OpenAPI document is served at `/static/swagger.json` and rendered at `/swagger`.

pub mod extract;
pub mod handlers;
pub mod models;
