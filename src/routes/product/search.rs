use crate::errors::ProductError;
use crate::helpers::JsonResponse;
use crate::services::ProductService;
use actix_web::{get, web, HttpResponse};

#[tracing::instrument(name = "Search products.", skip(service))]
#[get("/buscar/{termino}")]
pub async fn search_handler(
    path: web::Path<String>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ProductError> {
    let (term, products) = service.search(&path).await?;

    Ok(JsonResponse::build()
        .set_list(products)
        .ok(format!("Búsqueda completada para: {}", term)))
}
