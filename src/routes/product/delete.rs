use super::parse_id;
use crate::errors::ProductError;
use crate::helpers::JsonResponse;
use crate::services::ProductService;
use actix_web::{delete, web, HttpResponse};

/// Soft delete: the row stays in the table with `activo = false`.
#[tracing::instrument(name = "Delete product.", skip(service))]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<String>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    let id = parse_id(&path)?;
    let product = service.delete(id).await?;
    tracing::info!("Product {} deactivated", product.id);

    Ok(JsonResponse::build()
        .set_item(product)
        .ok("Producto eliminado exitosamente"))
}
