//! API request/response models for modelos.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use utoipa::ToSchema;

use crate::api::extract::KnownFields;
use crate::db::models::modelos::ModeloDBResponse;
use crate::types::{Gama, ModeloId};

/// Request body for creating a modelo.
///
/// Every field is optional at the JSON level so that a missing field is reported as a
/// validation error naming it, instead of a generic deserialization failure. `nombre`,
/// `fabricante`, `costo` and `gama` are required.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ModeloCreate {
    #[schema(example = "Corolla")]
    pub nombre: Option<String>,
    /// Letters and spaces only
    #[schema(example = "Toyota")]
    pub fabricante: Option<String>,
    /// A number, or a string holding one
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>, example = 100.0)]
    pub costo: Option<f64>,
    /// One of baja, media, alta (any case)
    #[schema(example = "media")]
    pub gama: Option<String>,
    /// Defaults to an empty string
    pub descripcion: Option<String>,
}

impl KnownFields for ModeloCreate {
    const FIELDS: &'static [&'static str] = &["nombre", "fabricante", "costo", "gama", "descripcion"];
}

/// Request body for updating a modelo. Only supplied fields change.
///
/// An empty `nombre`, `fabricante` or `gama` is ignored. `descripcion` is applied whenever it
/// is present, including as `""`.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ModeloUpdate {
    pub nombre: Option<String>,
    pub fabricante: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub costo: Option<f64>,
    pub gama: Option<String>,
    pub descripcion: Option<String>,
}

impl KnownFields for ModeloUpdate {
    const FIELDS: &'static [&'static str] = &["nombre", "fabricante", "costo", "gama", "descripcion"];
}

/// A stored modelo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModeloResponse {
    /// Sequential identifier, never reused
    #[schema(example = 1)]
    pub id: ModeloId,
    pub nombre: String,
    pub fabricante: String,
    pub costo: f64,
    pub gama: Gama,
    pub descripcion: String,
}

impl From<ModeloDBResponse> for ModeloResponse {
    fn from(db: ModeloDBResponse) -> Self {
        Self {
            id: db.id,
            nombre: db.nombre,
            fabricante: db.fabricante,
            costo: db.costo,
            gama: db.gama,
            descripcion: db.descripcion,
        }
    }
}

/// Response to a delete request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Modelo eliminado")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::modelos::ModeloUpdateDBRequest;
    use serde_json::json;

    #[test]
    fn test_costo_accepts_numbers_and_numeric_strings() {
        let create: ModeloCreate = serde_json::from_value(json!({ "costo": 100 })).unwrap();
        assert_eq!(create.costo, Some(100.0));

        let create: ModeloCreate = serde_json::from_value(json!({ "costo": "12.5" })).unwrap();
        assert_eq!(create.costo, Some(12.5));

        let create: ModeloCreate = serde_json::from_value(json!({ "costo": null })).unwrap();
        assert_eq!(create.costo, None);

        let create: ModeloCreate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(create.costo, None);
    }

    #[test]
    fn test_costo_rejects_non_numeric_strings() {
        assert!(serde_json::from_value::<ModeloCreate>(json!({ "costo": "barato" })).is_err());
    }

    #[test]
    fn test_update_distinguishes_empty_descripcion_from_absent() {
        let update: ModeloUpdate = serde_json::from_value(json!({ "descripcion": "" })).unwrap();
        let request = ModeloUpdateDBRequest::from(update);
        assert_eq!(request.descripcion.as_deref(), Some(""));

        let update: ModeloUpdate = serde_json::from_value(json!({})).unwrap();
        let request = ModeloUpdateDBRequest::from(update);
        assert_eq!(request.descripcion, None);
    }

    #[test]
    fn test_update_ignores_empty_required_strings() {
        let update: ModeloUpdate = serde_json::from_value(json!({ "nombre": "", "fabricante": "", "gama": "" })).unwrap();
        let request = ModeloUpdateDBRequest::from(update);
        assert!(request.nombre.is_none());
        assert!(request.fabricante.is_none());
        assert!(request.gama.is_none());
    }
}
