//! HTTP client for the `/api/productos` endpoints.
//!
//! Every response is the `{ success, data, message, count? }` envelope; a
//! failure envelope becomes [`ClientError::Api`] carrying the server message.

use super::error::ClientError;
use crate::forms::{ProductFilterQuery, ProductForm};
use crate::models::Product;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct ProductApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProductApiClient {
    /// `base_url` points at the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/productos{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => {
                return Err(ClientError::InvalidResponse(err.to_string()));
            }
            Err(_) => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: format!("La API respondió {}", status),
                });
            }
        };

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("respuesta sin datos".to_string()))
    }

    /// Blank filter values are not sent at all.
    pub async fn list(&self, filters: &ProductFilterQuery) -> Result<Vec<Product>, ClientError> {
        let params: Vec<(&str, &str)> = [
            ("categoria", &filters.categoria),
            ("nombre", &filters.nombre),
            ("precio_min", &filters.precio_min),
            ("precio_max", &filters.precio_max),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(|value| (key, value))
        })
        .collect();

        self.send(self.http.get(self.url("")).query(&params)).await
    }

    pub async fn get(&self, id: i32) -> Result<Product, ClientError> {
        self.send(self.http.get(self.url(&format!("/{}", id))))
            .await
    }

    pub async fn create(&self, form: &ProductForm) -> Result<Product, ClientError> {
        self.send(self.http.post(self.url("")).json(form)).await
    }

    pub async fn update(&self, id: i32, form: &ProductForm) -> Result<Product, ClientError> {
        self.send(self.http.put(self.url(&format!("/{}", id))).json(form))
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<Product, ClientError> {
        self.send(self.http.delete(self.url(&format!("/{}", id))))
            .await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        self.send(self.http.get(self.url("/categorias"))).await
    }

    /// The term is sent as a single percent-encoded path segment.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, ClientError> {
        let mut url =
            Url::parse(&self.url("/buscar")).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(term);

        self.send(self.http.get(url)).await
    }
}
