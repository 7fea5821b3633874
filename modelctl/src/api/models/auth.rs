use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    pub password: String,
}

/// Response after a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session token. Send it back as `Authorization: Bearer <token>`.
    pub token: String,
}
