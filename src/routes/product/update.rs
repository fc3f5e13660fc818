use super::parse_id;
use crate::errors::ProductError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ProductService;
use actix_web::{put, web, HttpResponse};

#[tracing::instrument(name = "Update product.", skip(service))]
#[put("/{id}")]
pub async fn update_handler(
    path: web::Path<String>,
    form: web::Json<forms::ProductForm>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    let id = parse_id(&path)?;
    let product = service.update(id, form.into_inner()).await?;

    Ok(JsonResponse::build()
        .set_item(product)
        .ok("Producto actualizado exitosamente"))
}
