//! Storage access for the `productos` table.
//!
//! Services receive an `Arc<dyn ProductStore>` at construction; the
//! concrete backend is picked once at startup.

use crate::errors::ProductError;
use crate::models;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

/// Every read only ever sees rows with `activo = true`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Active rows matching every filter, newest first.
    async fn list(
        &self,
        filter: &models::ProductFilter,
    ) -> Result<Vec<models::Product>, ProductError>;

    async fn fetch(&self, id: i32) -> Result<Option<models::Product>, ProductError>;

    /// Assigns `id`, `activo = true` and both timestamps.
    async fn insert(&self, product: models::NewProduct) -> Result<models::Product, ProductError>;

    /// Writes the supplied fields and refreshes `fecha_actualizacion`.
    /// `None` when no active row has that id.
    async fn update(
        &self,
        id: i32,
        changes: &models::ProductChanges,
    ) -> Result<Option<models::Product>, ProductError>;

    /// Soft delete. Returns the row in its final, inactive state.
    async fn deactivate(&self, id: i32) -> Result<Option<models::Product>, ProductError>;

    /// Distinct non-empty categories of active rows, sorted.
    async fn categories(&self) -> Result<Vec<String>, ProductError>;

    /// Active rows whose nombre, descripcion or categoria contain `term`.
    async fn search(&self, term: &str) -> Result<Vec<models::Product>, ProductError>;
}
