//! Authentication for the modelo API.
//!
//! Clients log in once with a username and password and receive a signed, time-limited token.
//! Every protected request then presents that token in an `Authorization: Bearer <token>`
//! header.
//!
//! # Modules
//!
//! - [`credentials`]: the fixed username → password store consulted at login
//! - [`session`]: issuing and verifying HS256-signed session tokens
//! - [`current_user`]: the request guard that turns a bearer header into a [`current_user::CurrentUser`]
//!
//! # Usage in Handlers
//!
//! Any handler that takes a [`current_user::CurrentUser`] argument is protected. The extractor
//! runs before the handler body and rejects the request with a 401 when the token is missing,
//! malformed, badly signed or expired.
//!
//! ```ignore
//! use modelctl::auth::current_user::CurrentUser;
//!
//! async fn protected_handler(current_user: CurrentUser) -> String {
//!     format!("Hello, {}!", current_user.username)
//! }
//! ```
//!
//! A valid token grants access to every protected operation; there are no roles.

pub mod credentials;
pub mod current_user;
pub mod session;

use thiserror::Error;

/// Why a request failed to authenticate.
///
/// The variants stay distinct inside the crate so logs and tests can tell them apart. At the
/// HTTP boundary [`AuthError::InvalidToken`] and [`AuthError::ExpiredToken`] share one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header, or not in `Bearer <token>` form
    #[error("missing bearer token")]
    MissingToken,
    /// Bad signature, bad structure or missing claims
    #[error("invalid token")]
    InvalidToken,
    /// Signature is fine but the token is past its expiry
    #[error("expired token")]
    ExpiredToken,
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Token faltante",
            AuthError::InvalidToken | AuthError::ExpiredToken => "Token inválido o expirado",
        }
    }
}
