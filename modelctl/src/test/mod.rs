pub mod utils;

use crate::api::models::{errors::ErrorResponse, modelos::DeleteResponse};
use crate::auth::session::TokenService;
use crate::types::Gama;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use utils::{create_modelo, create_test_server, create_test_server_with_state, create_test_state, list_modelos, login_token};

/// Full user journey: log in, create, list, update, delete
#[test_log::test(tokio::test)]
async fn test_e2e_modelo_lifecycle() {
    let server = create_test_server();
    let token = login_token(&server).await;

    let created = create_modelo(
        &server,
        &token,
        json!({"nombre": "Galaxy S24", "fabricante": "Samsung", "costo": 999.0, "gama": "Alta", "descripcion": "Flagship"}),
    )
    .await;
    assert_eq!(created.id, 1);
    assert_eq!(created.gama, Gama::Alta);

    let listed = list_modelos(&server, &token).await;
    assert_eq!(listed, vec![created.clone()]);

    let response = server
        .put("/api/modelos/1")
        .authorization_bearer(&token)
        .json(&json!({"costo": 899.0, "gama": "media"}))
        .await;
    response.assert_status_ok();

    let listed = list_modelos(&server, &token).await;
    assert_eq!(listed[0].costo, 899.0);
    assert_eq!(listed[0].gama, Gama::Media);
    assert_eq!(listed[0].descripcion, "Flagship");

    let response = server.delete("/api/modelos/1").authorization_bearer(&token).await;
    response.assert_status_ok();
    assert!(list_modelos(&server, &token).await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_ids_are_not_reused_after_delete() {
    let server = create_test_server();
    let token = login_token(&server).await;
    let body = json!({"nombre": "X", "fabricante": "ACME", "costo": 100, "gama": "baja"});

    let first = create_modelo(&server, &token, body.clone()).await;
    assert_eq!(first.id, 1);
    assert_eq!(first.gama, Gama::Baja);

    server
        .delete("/api/modelos/1")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let second = create_modelo(&server, &token, body).await;
    assert_eq!(second.id, 2);
}

#[test_log::test(tokio::test)]
async fn test_update_empty_descripcion_differs_from_absent() {
    let server = create_test_server();
    let token = login_token(&server).await;

    create_modelo(
        &server,
        &token,
        json!({"nombre": "X", "fabricante": "ACME", "costo": 1, "gama": "baja", "descripcion": "algo"}),
    )
    .await;

    // Absent leaves the value alone
    server
        .put("/api/modelos/1")
        .authorization_bearer(&token)
        .json(&json!({"nombre": "Y"}))
        .await
        .assert_status_ok();
    assert_eq!(list_modelos(&server, &token).await[0].descripcion, "algo");

    // Explicit empty string clears it
    server
        .put("/api/modelos/1")
        .authorization_bearer(&token)
        .json(&json!({"descripcion": ""}))
        .await
        .assert_status_ok();
    assert_eq!(list_modelos(&server, &token).await[0].descripcion, "");
}

#[test_log::test(tokio::test)]
async fn test_failed_update_keeps_fields_applied_before_the_failure() {
    let server = create_test_server();
    let token = login_token(&server).await;

    create_modelo(
        &server,
        &token,
        json!({"nombre": "Viejo", "fabricante": "ACME", "costo": 10, "gama": "baja"}),
    )
    .await;

    let response = server
        .put("/api/modelos/1")
        .authorization_bearer(&token)
        .json(&json!({"nombre": "Nuevo", "costo": 20, "gama": "extra", "descripcion": "nunca"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Gama debe ser 'baja', 'media' o 'alta'");
    assert_eq!(error.field.as_deref(), Some("gama"));

    let stored = &list_modelos(&server, &token).await[0];
    assert_eq!(stored.nombre, "Nuevo");
    assert_eq!(stored.costo, 20.0);
    assert_eq!(stored.gama, Gama::Baja);
    assert_eq!(stored.descripcion, "");
}

#[test_log::test(tokio::test)]
async fn test_delete_nonexistent_matches_delete_existing() {
    let server = create_test_server();
    let token = login_token(&server).await;

    create_modelo(&server, &token, json!({"nombre": "X", "fabricante": "ACME", "costo": 1, "gama": "baja"})).await;

    let existing = server.delete("/api/modelos/1").authorization_bearer(&token).await;
    let missing = server.delete("/api/modelos/404").authorization_bearer(&token).await;

    existing.assert_status_ok();
    missing.assert_status_ok();
    assert_eq!(existing.json::<DeleteResponse>().message, missing.json::<DeleteResponse>().message);
}

#[test_log::test(tokio::test)]
async fn test_list_keeps_creation_order_across_updates() {
    let server = create_test_server();
    let token = login_token(&server).await;

    for nombre in ["Primero", "Segundo", "Tercero"] {
        create_modelo(&server, &token, json!({"nombre": nombre, "fabricante": "ACME", "costo": 1, "gama": "media"})).await;
    }

    for id in [3, 1, 2] {
        server
            .put(&format!("/api/modelos/{id}"))
            .authorization_bearer(&token)
            .json(&json!({"descripcion": format!("editado {id}")}))
            .await
            .assert_status_ok();
    }

    let nombres: Vec<String> = list_modelos(&server, &token).await.into_iter().map(|m| m.nombre).collect();
    assert_eq!(nombres, ["Primero", "Segundo", "Tercero"]);
}

#[test_log::test(tokio::test)]
async fn test_expired_and_forged_tokens_are_rejected_alike() {
    let state = create_test_state();
    let server = create_test_server_with_state(state.clone());

    let expired = state.tokens.issue_at("admin", Utc::now() - Duration::hours(2)).unwrap();
    let forged = TokenService::new(b"some-other-key", std::time::Duration::from_secs(3600))
        .unwrap()
        .issue("admin")
        .unwrap();

    for token in [expired, forged, "garbage".to_string()] {
        let response = server.get("/api/modelos").authorization_bearer(&token).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "Token inválido o expirado");
    }
}

#[test_log::test(tokio::test)]
async fn test_token_close_to_expiry_is_still_accepted() {
    let state = create_test_state();
    let server = create_test_server_with_state(state.clone());

    let token = state.tokens.issue_at("admin", Utc::now() - Duration::minutes(59)).unwrap();

    server
        .get("/api/modelos")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_non_bearer_authorization_is_missing_token() {
    let server = create_test_server();
    let token = login_token(&server).await;

    let response = server
        .get("/api/modelos")
        .add_header("authorization", format!("Token {token}"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Token faltante");
}

#[test_log::test(tokio::test)]
async fn test_state_is_shared_between_requests_on_one_server() {
    let state = create_test_state();
    let server = create_test_server_with_state(state.clone());
    let token = login_token(&server).await;

    create_modelo(&server, &token, json!({"nombre": "X", "fabricante": "ACME", "costo": 1, "gama": "alta"})).await;

    let table = state.db.acquire().await;
    assert_eq!(table.len(), 1);
}
