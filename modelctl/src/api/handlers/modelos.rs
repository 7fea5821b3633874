use crate::api::extract::{FieldsBody, ModeloPath};
use crate::api::models::errors::ErrorResponse;
use crate::api::models::modelos::{DeleteResponse, ModeloCreate, ModeloResponse, ModeloUpdate};
use crate::auth::current_user::CurrentUser;
use crate::db::errors::DbError;
use crate::db::handlers::{Modelos, Repository};
use crate::db::models::modelos::{ModeloCreateDBRequest, ModeloUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

#[utoipa::path(
    get,
    path = "/modelos",
    tag = "modelos",
    summary = "List modelos",
    description = "Every stored modelo, in creation order.",
    responses(
        (status = 200, description = "List of modelos", body = Vec<ModeloResponse>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_modelos(State(state): State<AppState>, _: CurrentUser) -> Result<Json<Vec<ModeloResponse>>> {
    let mut conn = state.db.acquire().await;
    let mut repo = Modelos::new(&mut conn);

    let modelos = repo.list().await?;
    Ok(Json(modelos.into_iter().map(ModeloResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/modelos",
    tag = "modelos",
    summary = "Create modelo",
    request_body = ModeloCreate,
    responses(
        (status = 201, description = "Modelo created", body = ModeloResponse),
        (status = 400, description = "A field is missing or invalid", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_modelo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    FieldsBody(create): FieldsBody<ModeloCreate>,
) -> Result<(StatusCode, Json<ModeloResponse>)> {
    let mut conn = state.db.acquire().await;
    let mut repo = Modelos::new(&mut conn);

    let modelo = repo.create(&ModeloCreateDBRequest::from(create)).await?;
    info!("User {} created modelo {}", current_user.username, modelo.id);

    Ok((StatusCode::CREATED, Json(ModeloResponse::from(modelo))))
}

#[utoipa::path(
    put,
    path = "/modelos/{id}",
    tag = "modelos",
    summary = "Update modelo",
    description = "Only the supplied fields change. Fields are applied in the order nombre, \
        fabricante, costo, gama, descripcion; a validation failure keeps the fields already applied.",
    request_body = ModeloUpdate,
    params(
        ("id" = i64, Path, description = "Modelo ID"),
    ),
    responses(
        (status = 200, description = "Modelo updated", body = ModeloResponse),
        (status = 400, description = "A supplied field is invalid", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Modelo not found", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_modelo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ModeloPath(id): ModeloPath,
    FieldsBody(update): FieldsBody<ModeloUpdate>,
) -> Result<Json<ModeloResponse>> {
    let mut conn = state.db.acquire().await;
    let mut repo = Modelos::new(&mut conn);

    let modelo = repo
        .update(id, &ModeloUpdateDBRequest::from(update))
        .await
        .map_err(|e| match e {
            DbError::NotFound => Error::NotFound {
                resource: "Modelo".to_string(),
                id: id.to_string(),
            },
            other => other.into(),
        })?;
    info!("User {} updated modelo {}", current_user.username, modelo.id);

    Ok(Json(ModeloResponse::from(modelo)))
}

#[utoipa::path(
    delete,
    path = "/modelos/{id}",
    tag = "modelos",
    summary = "Delete modelo",
    description = "Succeeds whether or not a modelo with this id existed.",
    params(
        ("id" = i64, Path, description = "Modelo ID"),
    ),
    responses(
        (status = 200, description = "Modelo deleted (or already absent)", body = DeleteResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_modelo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ModeloPath(id): ModeloPath,
) -> Result<Json<DeleteResponse>> {
    let mut conn = state.db.acquire().await;
    let mut repo = Modelos::new(&mut conn);

    if repo.delete(id).await? {
        info!("User {} deleted modelo {}", current_user.username, id);
    } else {
        debug!("Delete of modelo {} removed nothing", id);
    }

    Ok(Json(DeleteResponse {
        message: "Modelo eliminado".to_string(),
    }))
}
