//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `MODELCTL_CONFIG`
//! environment variable. A missing file is not an error; every field has a default.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `MODELCTL_` override YAML values
//! 3. **SECRET_KEY / PORT** - Unprefixed variables honoured for existing deployments
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `MODELCTL_AUTH__SECURITY__JWT_EXPIRY=30m` sets the `auth.security.jwt_expiry` field.
//!
//! ## Signing Key
//!
//! Session tokens are signed with `secret_key`. When it is not set the service falls back to a
//! fixed development key, which anyone can read in this source file, and logs a warning at
//! startup. Set `auth.security.require_secret_key: true` in production to turn the missing key
//! into a configuration error.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! MODELCTL_PORT=8080
//!
//! # Signing key (either form)
//! MODELCTL_SECRET_KEY="$(openssl rand -hex 32)"
//! SECRET_KEY="$(openssl rand -hex 32)"
//!
//! # Export traces
//! MODELCTL_ENABLE_OTEL_EXPORT=true
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, time::Duration};
use url::Url;

use crate::errors::Error;

/// Signing key used when none is configured. Development only.
pub const DEV_SECRET_KEY: &str = "modelctl-insecure-development-secret";

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "MODELCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// `Debug` output redacts the signing key and every password, so the whole struct can be logged.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Secret key for JWT signing (required for production)
    pub secret_key: Option<String>,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Enable Prometheus metrics endpoint at `/internal/metrics`
    pub enable_metrics: bool,
    /// Enable OpenTelemetry OTLP export for distributed tracing
    pub enable_otel_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            secret_key: None,
            auth: AuthConfig::default(),
            enable_metrics: false,
            enable_otel_export: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("auth", &self.auth)
            .field("enable_metrics", &self.enable_metrics)
            .field("enable_otel_export", &self.enable_otel_export)
            .finish()
    }
}

/// Authentication configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Accepted username → password pairs
    pub users: HashMap<String, String>,
    /// Security settings (JWT, CORS, etc.)
    pub security: SecurityConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users: HashMap::from([("admin".to_string(), "admin".to_string())]),
            security: SecurityConfig::default(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut usernames: Vec<_> = self.users.keys().collect();
        usernames.sort();
        f.debug_struct("AuthConfig")
            .field("users", &usernames)
            .field("security", &self.security)
            .finish()
    }
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    /// JWT token expiry duration
    #[serde(with = "humantime_serde")]
    pub jwt_expiry: Duration,
    /// Refuse to start without an explicit `secret_key`
    pub require_secret_key: bool,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_expiry: Duration::from_secs(3600),
            require_secret_key: false,
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            max_age: None,
        }
    }
}

/// A CORS origin: either `*` or a specific URL.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard", serialize_with = "serialize_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://app.example.com`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn serialize_wildcard<S>(serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("*")
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.auth.security.require_secret_key && self.secret_key.is_none() {
            return Err(Error::Internal {
                operation: "Config validation: require_secret_key is set but secret_key is not configured. \
                 Please set MODELCTL_SECRET_KEY (or SECRET_KEY) or add secret_key to the config file."
                    .to_string(),
            });
        }

        if self.secret_key.as_deref().is_some_and(str::is_empty) {
            return Err(Error::Internal {
                operation: "Config validation: secret_key must not be empty".to_string(),
            });
        }

        if self.auth.users.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: auth.users must contain at least one user".to_string(),
            });
        }

        if self.auth.users.keys().any(String::is_empty) {
            return Err(Error::Internal {
                operation: "Config validation: auth.users contains an empty username".to_string(),
            });
        }

        if self.auth.security.jwt_expiry.is_zero() {
            return Err(Error::Internal {
                operation: "Config validation: auth.security.jwt_expiry must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("MODELCTL_").split("__").ignore(&["config"]))
            // Unprefixed names used by existing deployments
            .merge(Env::raw().only(&["SECRET_KEY"]).map(|_| "secret_key".into()))
            .merge(Env::raw().only(&["PORT"]).map(|_| "port".into()))
    }

    /// The key session tokens are signed with, falling back to [`DEV_SECRET_KEY`]
    pub fn jwt_secret(&self) -> &str {
        self.secret_key.as_deref().unwrap_or(DEV_SECRET_KEY)
    }

    /// Whether tokens will be signed with the publicly known development key
    pub fn uses_insecure_secret(&self) -> bool {
        self.secret_key.is_none()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
