//! Product operations on top of an injected [`ProductStore`].
//!
//! Input is validated here, before the store is touched; a missing active
//! row becomes `NotFound`.

use crate::errors::ProductError;
use crate::forms;
use crate::models;
use crate::store::ProductStore;
use std::sync::Arc;

/// Shortest accepted search term, counted in characters after trimming.
pub const MIN_SEARCH_TERM_CHARS: usize = 2;

pub type Result<T> = std::result::Result<T, ProductError>;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &forms::ProductFilterQuery) -> Result<Vec<models::Product>> {
        let filter = query.to_filter()?;
        self.store.list(&filter).await
    }

    pub async fn get(&self, id: i32) -> Result<models::Product> {
        self.store
            .fetch(id)
            .await?
            .ok_or_else(ProductError::product_not_found)
    }

    pub async fn create(&self, form: forms::ProductForm) -> Result<models::Product> {
        let product = form.into_new_product()?;
        self.store.insert(product).await
    }

    pub async fn update(&self, id: i32, form: forms::ProductForm) -> Result<models::Product> {
        let changes = form.into_changes()?;
        self.store
            .update(id, &changes)
            .await?
            .ok_or_else(ProductError::product_not_found)
    }

    pub async fn delete(&self, id: i32) -> Result<models::Product> {
        self.store
            .deactivate(id)
            .await?
            .ok_or_else(ProductError::product_not_found)
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        self.store.categories().await
    }

    /// Returns the trimmed term alongside the matches.
    pub async fn search(&self, term: &str) -> Result<(String, Vec<models::Product>)> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_TERM_CHARS {
            return Err(ProductError::Validation(format!(
                "El término de búsqueda debe tener al menos {} caracteres",
                MIN_SEARCH_TERM_CHARS
            )));
        }

        let products = self.store.search(term).await?;
        Ok((term.to_string(), products))
    }
}
