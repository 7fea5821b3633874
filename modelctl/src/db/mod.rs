//! Storage layer for modelo records.
//!
//! Records live in process memory and are lost on restart. The layout follows the repository
//! pattern so handlers never touch the raw collection:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - validation & mutations)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - stored records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ ModeloTable │  (ordered records + id counter, behind one mutex)
//! └─────────────┘
//! ```
//!
//! # Concurrency
//!
//! [`Database`] guards the whole table with a single async mutex. A handler acquires it once
//! and holds it for the rest of the operation, so concurrent requests are applied one after
//! another and the id counter can never hand out the same id twice.
//!
//! ## Example Usage
//!
//! ```ignore
//! use modelctl::db::handlers::{Modelos, Repository};
//!
//! let mut conn = db.acquire().await;
//! let mut repo = Modelos::new(&mut conn);
//! let created = repo.create(&request).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::types::ModeloId;
use models::modelos::ModeloDBResponse;

/// The backing store: records in insertion order plus the next id to hand out.
#[derive(Debug)]
pub struct ModeloTable {
    pub(crate) rows: Vec<ModeloDBResponse>,
    pub(crate) next_id: ModeloId,
}

impl ModeloTable {
    pub fn new() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for ModeloTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to the process-wide modelo table.
#[derive(Debug, Clone, Default)]
pub struct Database {
    table: Arc<Mutex<ModeloTable>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take exclusive access to the table. Hold the guard for the whole operation.
    pub async fn acquire(&self) -> MutexGuard<'_, ModeloTable> {
        self.table.lock().await
    }
}
