use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable message
    #[schema(example = "Token inválido o expirado")]
    pub error: String,
    /// The offending field, for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "fabricante")]
    pub field: Option<String>,
    /// Which validation rule failed: `required`, `manufacturer_format`, `tier_value`,
    /// `cost_value` or `invalid_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
            reason: None,
        }
    }
}
