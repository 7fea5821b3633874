//! Field validation for modelo records.
//!
//! The predicates here are pure. Callers turn a failing predicate into a [`ValidationError`]
//! naming the field and the rule that was broken, and reject the whole request.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::Gama;

/// True iff `value` is one or more ASCII letters and whitespace characters.
///
/// Whitespace is Unicode `White_Space` plus the information separators U+001C to U+001F,
/// the same set `str.isspace()` accepts in Python. A string made only of spaces passes; the
/// empty string does not.
pub fn validate_manufacturer(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic() || is_space(c))
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True iff `value` names a [`Gama`], ignoring case.
pub fn validate_tier(value: &str) -> bool {
    value.parse::<Gama>().is_ok()
}

/// Which rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    /// A required field was missing, null or empty
    Required,
    /// `fabricante` contained something other than letters and spaces
    ManufacturerFormat,
    /// `gama` was not one of baja, media, alta
    TierValue,
    /// `costo` was not a finite number
    CostValue,
    /// A field had the wrong JSON type, or a string that does not parse as one
    InvalidType,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            reason: ValidationReason::Required,
        }
    }

    pub fn manufacturer_format() -> Self {
        Self {
            field: "fabricante",
            reason: ValidationReason::ManufacturerFormat,
        }
    }

    pub fn tier_value() -> Self {
        Self {
            field: "gama",
            reason: ValidationReason::TierValue,
        }
    }

    pub fn cost_value() -> Self {
        Self {
            field: "costo",
            reason: ValidationReason::CostValue,
        }
    }

    pub fn invalid_type(field: &'static str) -> Self {
        Self {
            field,
            reason: ValidationReason::InvalidType,
        }
    }

    /// User-facing message. The front-end bundle displays these verbatim.
    pub fn message(&self) -> &'static str {
        match self.reason {
            ValidationReason::Required => "Nombre, fabricante, costo y gama son requeridos",
            ValidationReason::ManufacturerFormat => "Fabricante solo puede tener letras y espacios",
            ValidationReason::TierValue => "Gama debe ser 'baja', 'media' o 'alta'",
            ValidationReason::CostValue => "Costo debe ser un número finito",
            ValidationReason::InvalidType => "Tipo de dato inválido",
        }
    }
}

/// Check `fabricante`, returning the error a request should be rejected with.
pub fn check_manufacturer(value: &str) -> Result<(), ValidationError> {
    if validate_manufacturer(value) {
        Ok(())
    } else {
        Err(ValidationError::manufacturer_format())
    }
}

/// Check `costo`. NaN and the infinities are rejected because they have no JSON number form.
pub fn check_cost(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::cost_value())
    }
}

/// Check and normalize `gama`.
pub fn check_tier(value: &str) -> Result<Gama, ValidationError> {
    value.parse::<Gama>().map_err(|_| ValidationError::tier_value())
}
