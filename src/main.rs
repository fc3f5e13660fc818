use productos::configuration::{get_configuration, StorageKind};
use productos::startup::run;
use productos::store::{InMemoryProductStore, PgProductStore, ProductStore};
use productos::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("productos".into(), "info".into());
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");

    let store: Arc<dyn ProductStore> = match settings.storage {
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            Arc::new(InMemoryProductStore::new())
        }
        StorageKind::Postgres => {
            tracing::info!(
                db_host = %settings.database.host,
                db_port = settings.database.port,
                db_name = %settings.database.database_name,
                "Connecting to PostgreSQL"
            );

            let connect_options = PgConnectOptions::new()
                .host(&settings.database.host)
                .port(settings.database.port)
                .username(&settings.database.username)
                .password(&settings.database.password)
                .database(&settings.database.database_name)
                .ssl_mode(PgSslMode::Prefer);

            let pg_pool = PgPoolOptions::new()
                .max_connections(settings.database.max_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect_with(connect_options)
                .await
                .expect("Failed to connect to database.");

            Arc::new(PgProductStore::new(pg_pool))
        }
    };

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address)
        .unwrap_or_else(|err| panic!("failed to bind to {}: {}", address, err));

    run(listener, store).await?.await
}
