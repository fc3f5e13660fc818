#![allow(dead_code)]

use productos::store::{InMemoryProductStore, ProductStore};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryProductStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn api_url(&self) -> String {
        format!("{}/api", self.address)
    }

    pub fn productos_url(&self, path: &str) -> String {
        format!("{}/api/productos{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.productos_url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.productos_url(""))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.productos_url(&format!("/{}", id)))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(self.productos_url(&format!("/{}", id)))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a product and returns its id.
    pub async fn create(&self, body: Value) -> i64 {
        let response = self.post(&body).await;
        assert_eq!(201, response.status().as_u16(), "create failed for {}", body);
        let envelope: Value = response.json().await.unwrap();
        envelope["data"]["id"].as_i64().unwrap()
    }

    pub async fn seed(&self) -> Vec<i64> {
        let mut ids = vec![];
        for body in [
            json!({"nombre": "Café molido", "precio": 12.5, "categoria": "Bebidas", "stock": 10}),
            json!({"nombre": "Té verde", "descripcion": "Hojas sueltas", "precio": "4.75", "categoria": "Bebidas"}),
            json!({"nombre": "Galletas", "precio": 3, "categoria": "Snacks", "stock": 40}),
            json!({"nombre": "Cuaderno", "descripcion": "Tapa dura, ideal para café", "precio": 25}),
        ] {
            ids.push(self.create(body).await);
        }
        ids
    }
}

pub async fn spawn_app() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryProductStore::new());
    let dyn_store: Arc<dyn ProductStore> = store.clone();

    let server = productos::startup::run(listener, dyn_store)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}
