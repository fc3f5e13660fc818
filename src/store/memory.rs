use super::ProductStore;
use crate::errors::ProductError;
use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

/// Process-local product table. Rows are never removed, ids never reused.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    rows: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    products: Vec<models::Product>,
    last_id: i32,
}

impl Rows {
    fn active_mut(&mut self, id: i32) -> Option<&mut models::Product> {
        self.products
            .iter_mut()
            .find(|product| product.id == id && product.activo)
    }
}

fn newest_first(mut products: Vec<models::Product>) -> Vec<models::Product> {
    products.sort_by(|a, b| {
        b.fecha_creacion
            .cmp(&a.fecha_creacion)
            .then_with(|| b.id.cmp(&a.id))
    });
    products
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a row regardless of `activo`.
    pub async fn fetch_including_inactive(&self, id: i32) -> Option<models::Product> {
        let rows = self.rows.read().await;
        rows.products.iter().find(|product| product.id == id).cloned()
    }

    /// Number of stored rows, soft-deleted ones included.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.products.len()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(
        &self,
        filter: &models::ProductFilter,
    ) -> Result<Vec<models::Product>, ProductError> {
        let rows = self.rows.read().await;
        let products = rows
            .products
            .iter()
            .filter(|product| product.activo && filter.matches(product))
            .cloned()
            .collect();
        Ok(newest_first(products))
    }

    async fn fetch(&self, id: i32) -> Result<Option<models::Product>, ProductError> {
        let rows = self.rows.read().await;
        Ok(rows
            .products
            .iter()
            .find(|product| product.id == id && product.activo)
            .cloned())
    }

    async fn insert(&self, product: models::NewProduct) -> Result<models::Product, ProductError> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;

        let now = Utc::now();
        let product = models::Product {
            id: rows.last_id,
            nombre: product.nombre,
            descripcion: product.descripcion,
            precio: product.precio,
            categoria: product.categoria,
            stock: product.stock,
            imagen_url: product.imagen_url,
            activo: true,
            fecha_creacion: now,
            fecha_actualizacion: now,
        };
        rows.products.push(product.clone());
        tracing::info!("New product {} has been saved in memory", product.id);

        Ok(product)
    }

    async fn update(
        &self,
        id: i32,
        changes: &models::ProductChanges,
    ) -> Result<Option<models::Product>, ProductError> {
        if changes.is_empty() {
            return Err(ProductError::Validation(
                "No se proporcionaron datos para actualizar".to_string(),
            ));
        }

        let mut rows = self.rows.write().await;
        Ok(rows.active_mut(id).map(|product| {
            changes.apply(product);
            product.fecha_actualizacion = Utc::now();
            product.clone()
        }))
    }

    async fn deactivate(&self, id: i32) -> Result<Option<models::Product>, ProductError> {
        let mut rows = self.rows.write().await;
        Ok(rows.active_mut(id).map(|product| {
            product.activo = false;
            product.fecha_actualizacion = Utc::now();
            product.clone()
        }))
    }

    async fn categories(&self) -> Result<Vec<String>, ProductError> {
        let rows = self.rows.read().await;
        let categories: BTreeSet<String> = rows
            .products
            .iter()
            .filter(|product| product.activo)
            .filter_map(|product| product.categoria.clone())
            .filter(|categoria| !categoria.trim().is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<models::Product>, ProductError> {
        let rows = self.rows.read().await;
        let products = rows
            .products
            .iter()
            .filter(|product| product.activo && product.matches_term(term))
            .cloned()
            .collect();
        Ok(newest_first(products))
    }
}
