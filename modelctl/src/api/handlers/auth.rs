use crate::api::extract::JsonBody;
use crate::api::models::auth::{LoginRequest, LoginResponse};
use crate::api::models::errors::ErrorResponse;
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{extract::State, Json};
use tracing::info;

/// Exchange a username and password for a session token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "authentication",
    summary = "Login",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Body is not a JSON object with username and password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if !state.credentials.verify(&request.username, &request.password) {
        info!("Rejected login for user {}", request.username);
        return Err(Error::InvalidCredentials);
    }

    let token = state.tokens.issue(&request.username)?;
    info!("User {} logged in", request.username);

    Ok(Json(LoginResponse { token }))
}
