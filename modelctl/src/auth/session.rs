//! JWT session token creation and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{auth::AuthError, config::Config, errors::Error};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String, // Authenticated username
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

/// Issues and verifies session tokens with one process-wide HMAC-SHA256 key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("expiry", &self.expiry).finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], expiry: std::time::Duration) -> Result<Self, Error> {
        let expiry = Duration::from_std(expiry).map_err(|e| Error::Internal {
            operation: format!("convert token expiry: {e}"),
        })?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.jwt_secret().as_bytes(), config.auth.security.jwt_expiry)
    }

    /// Create a token for `username`, valid until now + the configured expiry
    pub fn issue(&self, username: &str) -> Result<String, Error> {
        self.issue_at(username, Utc::now())
    }

    /// Create a token as if it were issued at `now`
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, Error> {
        let claims = SessionClaims {
            username: username.to_string(),
            exp: (now + self.expiry).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| Error::Internal {
            operation: format!("create JWT: {e}"),
        })
    }

    /// Verify a token and return the username it was issued to
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock reading `now`.
    ///
    /// The token is expired once `now >= exp`; there is no leeway. The username is returned
    /// as signed and is not checked against the credential store again.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        // Expiry is checked below against `now` so it can be pinned in tests
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            trace!("JWT verification failed: {:?}", e.kind());
            AuthError::InvalidToken
        })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(AuthError::ExpiredToken);
        }

        Ok(token_data.claims.username)
    }
}
