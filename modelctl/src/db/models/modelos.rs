//! Storage models for modelos.

use crate::api::models::modelos::{ModeloCreate, ModeloUpdate};
use crate::types::{Gama, ModeloId};

/// Request for creating a new modelo.
///
/// Fields are still unvalidated here; the repository checks them before anything is stored.
#[derive(Debug, Clone, Default)]
pub struct ModeloCreateDBRequest {
    pub nombre: Option<String>,
    pub fabricante: Option<String>,
    pub costo: Option<f64>,
    pub gama: Option<String>,
    pub descripcion: String,
}

impl From<ModeloCreate> for ModeloCreateDBRequest {
    fn from(api: ModeloCreate) -> Self {
        Self {
            nombre: api.nombre,
            fabricante: api.fabricante,
            costo: api.costo,
            gama: api.gama,
            descripcion: api.descripcion.unwrap_or_default(),
        }
    }
}

/// Request for updating a modelo. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ModeloUpdateDBRequest {
    pub nombre: Option<String>,
    pub fabricante: Option<String>,
    pub costo: Option<f64>,
    pub gama: Option<String>,
    pub descripcion: Option<String>,
}

impl From<ModeloUpdate> for ModeloUpdateDBRequest {
    /// An empty `nombre`, `fabricante` or `gama` counts as not supplied. `descripcion` is
    /// taken as soon as it is present, so `""` clears it.
    fn from(api: ModeloUpdate) -> Self {
        fn supplied(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            nombre: supplied(api.nombre),
            fabricante: supplied(api.fabricante),
            costo: api.costo,
            gama: supplied(api.gama),
            descripcion: api.descripcion,
        }
    }
}

/// A stored modelo
#[derive(Debug, Clone, PartialEq)]
pub struct ModeloDBResponse {
    pub id: ModeloId,
    pub nombre: String,
    pub fabricante: String,
    pub costo: f64,
    pub gama: Gama,
    pub descripcion: String,
}
