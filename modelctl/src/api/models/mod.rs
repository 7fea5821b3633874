//! API request and response data models.
//!
//! These structures define the public JSON contract of the service and are kept separate from
//! the storage models in [`crate::db::models`]. All of them are annotated with `utoipa` so they
//! show up in the generated API document.
//!
//! - [`auth`]: login payloads
//! - [`modelos`]: modelo create/update requests and responses
//! - [`errors`]: the error body every failing request returns

pub mod auth;
pub mod errors;
pub mod modelos;
