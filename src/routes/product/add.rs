use crate::errors::ProductError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ProductService;
use actix_web::{post, web, HttpResponse};

#[tracing::instrument(name = "Add product.", skip(service))]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::ProductForm>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    let product = service.create(form.into_inner()).await?;
    tracing::info!("Product {} created", product.id);

    Ok(JsonResponse::build()
        .set_item(product)
        .created("Producto creado exitosamente"))
}
