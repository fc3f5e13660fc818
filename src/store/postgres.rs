use super::ProductStore;
use crate::db;
use crate::errors::ProductError;
use crate::models;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(
        &self,
        filter: &models::ProductFilter,
    ) -> Result<Vec<models::Product>, ProductError> {
        db::product::fetch_all(&self.pool, filter).await
    }

    async fn fetch(&self, id: i32) -> Result<Option<models::Product>, ProductError> {
        db::product::fetch(&self.pool, id).await
    }

    async fn insert(&self, product: models::NewProduct) -> Result<models::Product, ProductError> {
        db::product::insert(&self.pool, product).await
    }

    async fn update(
        &self,
        id: i32,
        changes: &models::ProductChanges,
    ) -> Result<Option<models::Product>, ProductError> {
        db::product::update(&self.pool, id, changes).await
    }

    async fn deactivate(&self, id: i32) -> Result<Option<models::Product>, ProductError> {
        db::product::deactivate(&self.pool, id).await
    }

    async fn categories(&self) -> Result<Vec<String>, ProductError> {
        db::product::fetch_categories(&self.pool).await
    }

    async fn search(&self, term: &str) -> Result<Vec<models::Product>, ProductError> {
        db::product::search(&self.pool, term).await
    }
}
