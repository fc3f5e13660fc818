use crate::errors::ProductError;
use crate::helpers::JsonResponse;
use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use std::time::Instant;

/// Moment the server started, for the uptime reported by `/health`.
#[derive(Debug, Clone, Copy)]
pub struct StartedAt(pub Instant);

impl Default for StartedAt {
    fn default() -> Self {
        Self(Instant::now())
    }
}

#[get("/health")]
pub async fn health_check(started_at: web::Data<StartedAt>) -> HttpResponse {
    JsonResponse::build()
        .set_item(json!({
            "timestamp": Utc::now().to_rfc3339(),
            "uptime_seconds": started_at.0.elapsed().as_secs_f64(),
        }))
        .ok("API de Productos funcionando correctamente")
}

#[get("/")]
pub async fn index() -> HttpResponse {
    JsonResponse::build()
        .set_item(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "GET /api/productos": "Obtener todos los productos",
                "GET /api/productos/:id": "Obtener producto por ID",
                "POST /api/productos": "Crear nuevo producto",
                "PUT /api/productos/:id": "Actualizar producto",
                "DELETE /api/productos/:id": "Eliminar producto",
                "GET /api/productos/categorias": "Obtener categorías",
                "GET /api/productos/buscar/:termino": "Buscar productos"
            }
        }))
        .ok("Bienvenido a la API de Productos")
}

/// Fallback for every unmatched route.
pub async fn not_found() -> Result<HttpResponse, ProductError> {
    Err(ProductError::NotFound("Ruta no encontrada".to_string()))
}
