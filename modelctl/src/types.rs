//! Common type definitions shared by the API and storage layers.
//!
//! - [`ModeloId`]: sequential modelo identifier, assigned by the repository starting at 1
//! - [`Gama`]: the quality tier of a modelo

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

// Type aliases for IDs
pub type ModeloId = i64;

/// Quality tier of a modelo.
///
/// Serialized in lowercase. Parsing is case-insensitive, so `"ALTA"` and `"alta"` are the same
/// tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gama {
    Baja,
    Media,
    Alta,
}

impl Gama {
    pub const ALL: [Gama; 3] = [Gama::Baja, Gama::Media, Gama::Alta];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gama::Baja => "baja",
            Gama::Media => "media",
            Gama::Alta => "alta",
        }
    }
}

impl fmt::Display for Gama {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gama {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Gama::ALL
            .into_iter()
            .find(|gama| gama.as_str() == lowered)
            .ok_or_else(|| format!("unknown gama: {s}"))
    }
}
