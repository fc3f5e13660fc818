use super::api::ProductApiClient;
use super::error::ClientError;
use super::state::{Action, ProductState};
use crate::forms::{ProductFilterQuery, ProductForm};
use crate::models::Product;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared product state plus the API calls that drive it.
///
/// Each call goes `SetLoading(true)`, then the request, then exactly one
/// success action or `SetError`. Calls are not sequenced against each other:
/// when two overlap, whichever finishes last writes last.
#[derive(Clone)]
pub struct StateContainer {
    api: Arc<ProductApiClient>,
    state: Arc<Mutex<ProductState>>,
}

impl StateContainer {
    pub fn new(api: ProductApiClient) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(ProductState::default())),
        }
    }

    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "dispatch");
        self.state.lock().await.apply(action);
    }

    pub async fn snapshot(&self) -> ProductState {
        self.state.lock().await.clone()
    }

    async fn track<T, F>(
        &self,
        call: F,
        on_success: impl FnOnce(&T) -> Action,
    ) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        self.dispatch(Action::SetLoading(true)).await;
        match call.await {
            Ok(value) => {
                self.dispatch(on_success(&value)).await;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("Product API call failed: {}", err);
                self.dispatch(Action::SetError(err.to_string())).await;
                Err(err)
            }
        }
    }

    pub async fn load_products(
        &self,
        filters: &ProductFilterQuery,
    ) -> Result<Vec<Product>, ClientError> {
        self.track(self.api.list(filters), |products: &Vec<Product>| {
            Action::ReplaceList(products.clone())
        })
        .await
    }

    /// Reloads the list with the filters currently held in the state.
    pub async fn refresh(&self) -> Result<Vec<Product>, ClientError> {
        let filters = self.state.lock().await.filtros.clone();
        self.load_products(&filters).await
    }

    pub async fn load_product(&self, id: i32) -> Result<Product, ClientError> {
        self.track(self.api.get(id), |product: &Product| {
            Action::SetCurrent(product.clone())
        })
        .await
    }

    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ClientError> {
        self.track(self.api.create(form), |product: &Product| {
            Action::AppendCreated(product.clone())
        })
        .await
    }

    pub async fn update_product(&self, id: i32, form: &ProductForm) -> Result<Product, ClientError> {
        self.track(self.api.update(id, form), |product: &Product| {
            Action::ReplaceUpdated(product.clone())
        })
        .await
    }

    pub async fn delete_product(&self, id: i32) -> Result<Product, ClientError> {
        self.track(self.api.delete(id), |product: &Product| {
            Action::RemoveDeleted(product.id)
        })
        .await
    }

    pub async fn load_categories(&self) -> Result<Vec<String>, ClientError> {
        self.track(self.api.categories(), |categories: &Vec<String>| {
            Action::ReplaceCategories(categories.clone())
        })
        .await
    }

    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ClientError> {
        self.track(self.api.search(term), |products: &Vec<Product>| {
            Action::ReplaceList(products.clone())
        })
        .await
    }

    pub async fn update_filters(&self, filters: ProductFilterQuery) {
        self.dispatch(Action::MergeFilters(filters)).await;
    }

    pub async fn clear_error(&self) {
        self.dispatch(Action::ClearError).await;
    }
}
