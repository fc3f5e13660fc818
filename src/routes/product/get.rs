use super::parse_id;
use crate::errors::ProductError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ProductService;
use actix_web::{get, web, HttpResponse};

#[tracing::instrument(name = "List products.", skip(service))]
#[get("")]
pub async fn list_handler(
    query: web::Query<forms::ProductFilterQuery>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    service
        .list(&query)
        .await
        .map(|products| {
            JsonResponse::build()
                .set_list(products)
                .ok("Productos obtenidos exitosamente")
        })
}

#[tracing::instrument(name = "Get product.", skip(service))]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<String>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    let id = parse_id(&path)?;
    let product = service.get(id).await?;

    Ok(JsonResponse::build()
        .set_item(product)
        .ok("Producto obtenido exitosamente"))
}

#[tracing::instrument(name = "List categories.", skip(service))]
#[get("/categorias")]
pub async fn categories_handler(
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    service.categories().await.map(|categories| {
        JsonResponse::build()
            .set_list(categories)
            .ok("Categorías obtenidas exitosamente")
    })
}
