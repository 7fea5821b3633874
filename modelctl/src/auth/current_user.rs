use crate::{
    AppState,
    auth::{AuthError, session::TokenService},
    errors::{Error, Result},
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, instrument, trace};

/// The identity a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// Only the first space-separated word after the prefix is taken. A missing header, a
/// non-UTF-8 value, another scheme or an empty token all count as no token.
pub fn bearer_token(headers: &HeaderMap) -> std::result::Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .and_then(|rest| rest.split(' ').next())
        .unwrap_or_default();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Authenticate a request from its headers: extract the bearer token and verify it.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> std::result::Result<CurrentUser, AuthError> {
    let token = bearer_token(headers)?;
    let username = tokens.verify(token)?;
    Ok(CurrentUser { username })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match authenticate(&parts.headers, &state.tokens) {
            Ok(user) => {
                debug!("Authenticated request for user: {}", user.username);
                Ok(user)
            }
            Err(e) => {
                trace!("Bearer authentication failed: {:?}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::create_test_state;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};

    fn create_test_parts_with_header(header_name: &str, header_value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/api/modelos")
            .header(header_name, header_value)
            .body(())
            .unwrap();

        let (parts, _body) = request.into_parts();
        parts
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers_with("Bearer abc extra")), Ok("abc"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers_with("Basic YWRtaW46YWRtaW4=")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers_with("bearer abc")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers_with("Bearer ")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers_with("Bearer")), Err(AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_valid_token_extraction() {
        let state = create_test_state();
        let token = state.tokens.issue("admin").unwrap();

        let mut parts = create_test_parts_with_header("authorization", &format!("Bearer {token}"));
        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(user.username, "admin");
    }

    #[tokio::test]
    async fn test_username_is_not_rechecked_against_credentials() {
        let state = create_test_state();
        let token = state.tokens.issue("someone-else").unwrap();

        let mut parts = create_test_parts_with_header("authorization", &format!("Bearer {token}"));
        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(user.username, "someone-else");
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthenticated() {
        let state = create_test_state();
        let token = state.tokens.issue_at("admin", Utc::now() - Duration::hours(2)).unwrap();

        let mut parts = create_test_parts_with_header("authorization", &format!("Bearer {token}"));
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();

        assert!(matches!(err, Error::Unauthenticated { .. }));
        assert_eq!(err.user_message(), "Token inválido o expirado");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let state = create_test_state();
        let request = axum::http::Request::builder().uri("http://localhost/api/modelos").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.user_message(), "Token faltante");
    }
}
