use crate::errors::ProductError;
use crate::routes;
use crate::services::ProductService;
use crate::store::ProductStore;
use actix_cors::Cors;
use actix_web::{dev::Server, error, middleware, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

const JSON_LIMIT: usize = 10 * 1024 * 1024;

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn ProductStore>,
) -> Result<Server, std::io::Error> {
    let product_service = web::Data::new(ProductService::new(store));
    let started_at = web::Data::new(routes::StartedAt::default());

    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            tracing::warn!("Rejected request body: {}", err);
            let message = match err {
                error::JsonPayloadError::Deserialize(err) => format!(
                    "JSON inválido en el cuerpo de la petición (línea {}, columna {}): {}",
                    err.line(),
                    err.column(),
                    err
                ),
                error::JsonPayloadError::OverflowKnownLength { .. }
                | error::JsonPayloadError::Overflow { .. } => {
                    "El cuerpo de la petición es demasiado grande".to_string()
                }
                _ => "JSON inválido en el cuerpo de la petición".to_string(),
            };
            ProductError::MalformedRequest(message).into()
        });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        tracing::warn!("Rejected query string: {}", err);
        ProductError::MalformedRequest(format!("Parámetros de consulta inválidos: {}", err)).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Compress::default())
            .wrap(Cors::permissive())
            .service(routes::index)
            .service(routes::health_check)
            .service(
                web::scope("/api/productos")
                    // fixed segments before `/{id}`
                    .service(routes::product::categories_handler)
                    .service(routes::product::search_handler)
                    .service(routes::product::list_handler)
                    .service(routes::product::item_handler)
                    .service(routes::product::add_handler)
                    .service(routes::product::update_handler)
                    .service(routes::product::delete_handler),
            )
            .default_service(web::to(routes::not_found))
            .app_data(json_config.clone())
            .app_data(query_config.clone())
            .app_data(product_service.clone())
            .app_data(started_at.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
