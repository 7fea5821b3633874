//! Extractors whose rejections are JSON error bodies.
//!
//! axum's own `Json` and `Path` reject with plain-text bodies. Browser clients read the `error`
//! field of every failed response, so these wrappers turn the rejection into [`Error::BadRequest`].
//! [`FieldsBody`] goes further for bodies with a known field list: a field holding the wrong
//! type becomes a [`ValidationError`] naming that field.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{errors::Error, types::ModeloId, validation::ValidationError};

/// A JSON request body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!("Rejected JSON body: {}", rejection.body_text());
                Err(Error::BadRequest {
                    message: format!("Cuerpo de la petición inválido: {}", rejection.body_text()),
                })
            }
        }
    }
}

/// A request body whose top-level fields are known up front.
pub trait KnownFields: DeserializeOwned {
    /// Field names, in the order a type error is reported
    const FIELDS: &'static [&'static str];
}

/// A JSON object body whose badly typed fields are reported as validation errors.
///
/// Anything that is not a JSON object is a [`Error::BadRequest`], as with [`JsonBody`].
#[derive(Debug)]
pub struct FieldsBody<T>(pub T);

impl<S, T> FromRequest<S> for FieldsBody<T>
where
    T: KnownFields,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(body) = JsonBody::<Value>::from_request(req, state).await?;
        parse_fields(body).map(Self)
    }
}

fn parse_fields<T: KnownFields>(body: Value) -> Result<T, Error> {
    let Value::Object(object) = body else {
        return Err(Error::BadRequest {
            message: "Cuerpo de la petición inválido: se esperaba un objeto JSON".to_string(),
        });
    };

    let err = match serde_json::from_value::<T>(Value::Object(object.clone())) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    debug!("Rejected JSON body: {}", err);

    // Every field is optional, so a single-field object only fails on that field's value
    for &field in T::FIELDS {
        if let Some(value) = object.get(field) {
            let alone = Map::from_iter([(field.to_string(), value.clone())]);
            if serde_json::from_value::<T>(Value::Object(alone)).is_err() {
                return Err(ValidationError::invalid_type(field).into());
            }
        }
    }

    Err(Error::BadRequest {
        message: format!("Cuerpo de la petición inválido: {err}"),
    })
}

/// The `{id}` segment of `/modelos/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeloPath(pub ModeloId);

impl<S> FromRequestParts<S> for ModeloPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<ModeloId>::from_request_parts(parts, state).await.map_err(|rejection| {
            debug!("Rejected path parameter: {}", rejection.body_text());
            Error::BadRequest {
                message: "Id de modelo inválido".to_string(),
            }
        })?;
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{auth::LoginRequest, errors::ErrorResponse, modelos::ModeloCreate};
    use axum::{Router, http::StatusCode, routing::post, routing::put};
    use axum_test::TestServer;

    async fn echo_login(JsonBody(request): JsonBody<LoginRequest>) -> String {
        request.username
    }

    async fn echo_id(ModeloPath(id): ModeloPath) -> String {
        id.to_string()
    }

    async fn echo_nombre(FieldsBody(request): FieldsBody<ModeloCreate>) -> String {
        request.nombre.unwrap_or_default()
    }

    fn create_test_server() -> TestServer {
        let app = Router::new()
            .route("/login", post(echo_login))
            .route("/modelos", post(echo_nombre))
            .route("/modelos/{id}", put(echo_id));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let server = create_test_server();

        let response = server
            .post("/login")
            .json(&serde_json::json!({"username": "admin", "password": "admin"}))
            .await;

        response.assert_status_ok();
        response.assert_text("admin");
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_bad_request() {
        let server = create_test_server();

        let response = server
            .post("/login")
            .content_type("application/json")
            .text("{not json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(body.error.starts_with("Cuerpo de la petición inválido"));
    }

    #[tokio::test]
    async fn test_missing_field_is_json_bad_request() {
        let server = create_test_server();

        let response = server.post("/login").json(&serde_json::json!({"username": "admin"})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(body.error.contains("password"));
    }

    #[tokio::test]
    async fn test_badly_typed_field_names_the_field() {
        let server = create_test_server();

        for (body, field) in [
            (serde_json::json!({"nombre": "X", "costo": ""}), "costo"),
            (serde_json::json!({"nombre": "X", "costo": "barato"}), "costo"),
            (serde_json::json!({"nombre": "X", "costo": [1]}), "costo"),
            (serde_json::json!({"nombre": 5, "costo": 1}), "nombre"),
            (serde_json::json!({"fabricante": "ACME", "gama": true}), "gama"),
        ] {
            let response = server.post("/modelos").json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let error: ErrorResponse = response.json();
            assert_eq!(error.error, "Tipo de dato inválido");
            assert_eq!(error.field.as_deref(), Some(field));
            assert_eq!(error.reason.as_deref(), Some("invalid_type"));
        }
    }

    #[tokio::test]
    async fn test_first_badly_typed_field_is_reported() {
        let server = create_test_server();

        let response = server
            .post("/modelos")
            .json(&serde_json::json!({"descripcion": 1, "fabricante": 2}))
            .await;

        let error: ErrorResponse = response.json();
        assert_eq!(error.field.as_deref(), Some("fabricante"));
    }

    #[tokio::test]
    async fn test_fields_body_must_be_an_object() {
        let server = create_test_server();

        server
            .post("/modelos")
            .json(&serde_json::json!({"nombre": "Corolla", "extra": 1}))
            .await
            .assert_text("Corolla");

        let response = server.post("/modelos").json(&serde_json::json!([1, 2])).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert!(error.error.starts_with("Cuerpo de la petición inválido"));
        assert!(error.field.is_none());
    }

    #[tokio::test]
    async fn test_non_integer_id_is_json_bad_request() {
        let server = create_test_server();

        server.put("/modelos/42").await.assert_text("42");

        let response = server.put("/modelos/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Id de modelo inválido");
    }
}
