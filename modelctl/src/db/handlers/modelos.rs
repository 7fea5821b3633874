//! Repository for modelo records.

use tracing::{debug, instrument};

use crate::{
    db::{
        ModeloTable,
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::modelos::{ModeloCreateDBRequest, ModeloDBResponse, ModeloUpdateDBRequest},
    },
    types::ModeloId,
    validation::{ValidationError, check_cost, check_manufacturer, check_tier},
};

pub struct Modelos<'c> {
    table: &'c mut ModeloTable,
}

impl<'c> Modelos<'c> {
    pub fn new(table: &'c mut ModeloTable) -> Self {
        Self { table }
    }
}

/// Required string fields must be present and non-empty.
fn required<'a>(value: Option<&'a str>, field: &'static str) -> std::result::Result<&'a str, ValidationError> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| ValidationError::required(field))
}

#[async_trait::async_trait]
impl<'c> Repository for Modelos<'c> {
    type CreateRequest = ModeloCreateDBRequest;
    type UpdateRequest = ModeloUpdateDBRequest;
    type Response = ModeloDBResponse;
    type Id = ModeloId;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let nombre = required(request.nombre.as_deref(), "nombre")?;
        let fabricante = required(request.fabricante.as_deref(), "fabricante")?;
        let costo = request.costo.ok_or_else(|| ValidationError::required("costo"))?;
        let gama = required(request.gama.as_deref(), "gama")?;

        let costo = check_cost(costo)?;
        check_manufacturer(fabricante)?;
        let gama = check_tier(gama)?;

        let modelo = ModeloDBResponse {
            id: self.table.next_id,
            nombre: nombre.to_string(),
            fabricante: fabricante.to_string(),
            costo,
            gama,
            descripcion: request.descripcion.clone(),
        };
        self.table.next_id += 1;
        self.table.rows.push(modelo.clone());

        debug!("Created modelo {}", modelo.id);
        Ok(modelo)
    }

    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.table.rows.iter().find(|m| m.id == id).cloned())
    }

    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        Ok(self.table.rows.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let before = self.table.len();
        self.table.rows.retain(|m| m.id != id);
        Ok(self.table.len() != before)
    }

    /// Fields are written one at a time in the order nombre, fabricante, costo, gama,
    /// descripcion. A validation failure returns immediately, and the fields written before
    /// it stay written.
    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let modelo = self.table.rows.iter_mut().find(|m| m.id == id).ok_or(DbError::NotFound)?;

        if let Some(nombre) = &request.nombre {
            modelo.nombre = nombre.clone();
        }
        if let Some(fabricante) = &request.fabricante {
            check_manufacturer(fabricante)?;
            modelo.fabricante = fabricante.clone();
        }
        if let Some(costo) = request.costo {
            modelo.costo = check_cost(costo)?;
        }
        if let Some(gama) = &request.gama {
            modelo.gama = check_tier(gama)?;
        }
        if let Some(descripcion) = &request.descripcion {
            modelo.descripcion = descripcion.clone();
        }

        Ok(modelo.clone())
    }
}
