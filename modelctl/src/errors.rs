use crate::api::models::errors::ErrorResponse;
use crate::auth::AuthError;
use crate::db::errors::DbError;
use crate::validation::{ValidationError, ValidationReason};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided, or the token did not verify
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Login with a username/password pair that is not in the credential store
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A request field broke a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed request (unparseable body, bad path parameter)
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Storage operation error
    #[error(transparent)]
    Database(DbError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Validation(_) | Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::Validation(_) => StatusCode::BAD_REQUEST,
            },
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Token faltante".to_string()),
            Error::InvalidCredentials => "Usuario o contraseña incorrectos".to_string(),
            Error::Validation(e) => e.message().to_string(),
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, .. } => format!("{resource} no encontrado"),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Recurso no encontrado".to_string(),
                DbError::Validation(e) => e.message().to_string(),
            },
        }
    }

    fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) | Error::Database(DbError::Validation(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<DbError> for Error {
    fn from(err: DbError) -> Self {
        // Validation failures surface the same way whichever layer caught them
        match err {
            DbError::Validation(e) => Error::Validation(e),
            other => Error::Database(other),
        }
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Unauthenticated {
            message: Some(err.user_message().to_string()),
        }
    }
}

fn reason_code(reason: ValidationReason) -> &'static str {
    match reason {
        ValidationReason::Required => "required",
        ValidationReason::ManufacturerFormat => "manufacturer_format",
        ValidationReason::TierValue => "tier_value",
        ValidationReason::CostValue => "cost_value",
        ValidationReason::InvalidType => "invalid_type",
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Internal { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Unauthenticated { .. } | Error::InvalidCredentials => {
                tracing::info!("Authentication error: {}", self);
            }
            Error::Validation(_) | Error::BadRequest { .. } | Error::NotFound { .. } | Error::Database(_) => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let mut body = ErrorResponse::new(self.user_message());
        if let Some(validation) = self.validation_error() {
            body.field = Some(validation.field.to_string());
            body.reason = Some(reason_code(validation.reason).to_string());
        }

        (status, Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
