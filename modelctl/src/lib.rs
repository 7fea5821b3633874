//! # modelctl: a small control service for technology model records
//!
//! `modelctl` keeps a catalogue of *modelos* (technology/device models, each with a manufacturer,
//! cost, tier and description) behind a token-authenticated REST API, and serves the browser
//! front-end that manages them.
//!
//! ## Overview
//!
//! Clients log in once with a username and password from the configured credential store and get
//! back a signed session token. Every request to the modelo routes presents that token as
//! `Authorization: Bearer <token>`. Records live in process memory: ids are handed out
//! sequentially from 1, never reused, and listing returns records in creation order.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum).
//!
//! ### Request Flow
//!
//! A request to `/api/modelos` first passes the [`auth::current_user::CurrentUser`] extractor,
//! which pulls the bearer token out of the headers and verifies it with the
//! [`auth::session::TokenService`]. A missing, malformed, badly signed or expired token ends the
//! request with a 401. The handler then takes the table lock from [`db::Database`] and runs the
//! operation through the [`db::handlers::Modelos`] repository, which validates fields before
//! anything is stored. Errors from every layer convert into [`errors::Error`], which renders as a
//! JSON `{"error": ...}` body.
//!
//! ### Core Components
//!
//! - **API layer** ([`api`]): handlers, request/response models and JSON-rejecting extractors
//! - **Authentication** ([`auth`]): credential store, token service and the request guard
//! - **Storage** ([`db`]): the in-memory modelo table and its repository
//! - **Validation** ([`validation`]): manufacturer and tier rules
//!
//! Everything else is served from the same listener: the OpenAPI document at
//! `/static/swagger.json`, its interactive rendering at `/swagger`, a liveness probe at
//! `/healthz`, optional Prometheus metrics at `/internal/metrics`, and the embedded front-end for
//! any other path.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use modelctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = modelctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     modelctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config)?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
mod static_assets;
pub mod telemetry;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test;

use crate::{
    auth::{credentials::CredentialStore, session::TokenService},
    config::CorsOrigin,
    db::Database,
    openapi::ApiDoc,
};
use axum::http::{self, HeaderValue, Method};
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{Gama, ModeloId};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: Handle to the in-memory modelo table
/// - `config`: Application configuration loaded from environment/files
/// - `tokens`: Issues and verifies session tokens
/// - `credentials`: Username/password pairs accepted at login
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config.clone())
///     .tokens(TokenService::from_config(&config)?)
///     .credentials(CredentialStore::from_config(&config))
///     .build();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct AppState {
    #[builder(default)]
    pub db: Database,
    pub config: Config,
    pub tokens: TokenService,
    pub credentials: CredentialStore,
}

impl AppState {
    /// Build the state for a fresh process: an empty table, plus the token service and
    /// credential store described by `config`.
    pub fn from_config(config: Config) -> errors::Result<Self> {
        let tokens = TokenService::from_config(&config)?;
        let credentials = CredentialStore::from_config(&config);
        Ok(Self::builder().config(config).tokens(tokens).credentials(credentials).build())
    }
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    let allow_origin = if cors_config.allowed_origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry the trailing slash `Url` adds
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Serve the OpenAPI document
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the main application router with all endpoints and middleware.
///
/// - `/api/login` and the `/api/modelos` routes
/// - `/healthz`
/// - the OpenAPI document at `/static/swagger.json` and its UI at `/swagger`
/// - `/internal/metrics` when metrics are enabled
/// - the embedded front-end for every other `GET`; other methods get 405
///
/// Unmatched paths under `/api` get a JSON 404.
///
/// # Errors
///
/// Returns an error if the CORS configuration holds an origin that is not a valid header value.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/login", post(api::handlers::auth::login))
        .route(
            "/modelos",
            get(api::handlers::modelos::list_modelos).post(api::handlers::modelos::create_modelo),
        )
        .route(
            "/modelos/{id}",
            put(api::handlers::modelos::update_modelo).delete(api::handlers::modelos::delete_modelo),
        )
        .fallback(api::handlers::api_not_found);

    let router = Router::new()
        .nest("/api", api_routes)
        .route("/healthz", get(|| async { "OK" }))
        .route("/static/swagger.json", get(openapi_json))
        .merge(Scalar::with_url("/swagger", ApiDoc::openapi()))
        .fallback_service(get(api::handlers::static_assets::serve_embedded_asset))
        .with_state(state.clone());

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(move || async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The configured router together with the configuration it was built from.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting modelctl with configuration: {:#?}", config);

        if config.uses_insecure_secret() {
            warn!(
                "No secret_key configured: session tokens are signed with the built-in development key. \
                 Anyone can forge tokens for this instance. Set MODELCTL_SECRET_KEY (or SECRET_KEY) before deploying."
            );
        }

        let app_state = AppState::from_config(config.clone())?;
        let router = build_router(&app_state)?;

        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "modelctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
