use crate::errors::{store_error, ProductError};
use crate::models;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;

/// Column list returned by every read and `RETURNING` clause.
pub const COLUMNS: &str = "id, nombre, descripcion, precio, categoria, stock, imagen_url, activo, \
     fecha_creacion, fecha_actualizacion";

/// Escapes `ILIKE` wildcards so user input matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

pub fn list_query(filter: &models::ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "SELECT {} FROM productos WHERE activo = true",
        COLUMNS
    ));

    if let Some(categoria) = &filter.categoria {
        query
            .push(" AND categoria ILIKE ")
            .push_bind(contains_pattern(categoria));
    }
    if let Some(nombre) = &filter.nombre {
        query
            .push(" AND nombre ILIKE ")
            .push_bind(contains_pattern(nombre));
    }
    if let Some(precio_min) = filter.precio_min {
        query.push(" AND precio >= ").push_bind(precio_min);
    }
    if let Some(precio_max) = filter.precio_max {
        query.push(" AND precio <= ").push_bind(precio_max);
    }

    query.push(" ORDER BY fecha_creacion DESC, id DESC");
    query
}

/// `None` when the change set is empty: there is nothing to write.
pub fn update_query(
    id: i32,
    changes: &models::ProductChanges,
) -> Option<QueryBuilder<'static, Postgres>> {
    let assignments = changes.assignments();
    if assignments.is_empty() {
        return None;
    }

    let mut query = QueryBuilder::new("UPDATE productos SET ");
    let mut set = query.separated(", ");
    for (column, value) in assignments {
        set.push(format!("{} = ", column));
        match value {
            models::FieldValue::Text(value) => set.push_bind_unseparated(value),
            models::FieldValue::Decimal(value) => set.push_bind_unseparated(value),
            models::FieldValue::Integer(value) => set.push_bind_unseparated(value),
        };
    }
    set.push("fecha_actualizacion = NOW()");

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND activo = true RETURNING ")
        .push(COLUMNS);
    Some(query)
}

pub async fn fetch_all(
    pool: &PgPool,
    filter: &models::ProductFilter,
) -> Result<Vec<models::Product>, ProductError> {
    let query_span = tracing::info_span!("Fetch active products.", ?filter);
    list_query(filter)
        .build_query_as::<models::Product>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| store_error("Error al obtener productos", err))
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Product>, ProductError> {
    let query_span = tracing::info_span!("Fetch active product by id.", id);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT {} FROM productos WHERE id = $1 AND activo = true",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Error al obtener producto", err))
}

pub async fn insert(
    pool: &PgPool,
    product: models::NewProduct,
) -> Result<models::Product, ProductError> {
    let query_span = tracing::info_span!("Saving new product into the database");
    sqlx::query_as::<_, models::Product>(&format!(
        r#"
        INSERT INTO productos (nombre, descripcion, precio, categoria, stock, imagen_url,
            activo, fecha_creacion, fecha_actualizacion)
        VALUES ($1, $2, $3, $4, $5, $6, true, NOW(), NOW())
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(product.nombre)
    .bind(product.descripcion)
    .bind(product.precio)
    .bind(product.categoria)
    .bind(product.stock)
    .bind(product.imagen_url)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|product| {
        tracing::info!("New product {} has been saved to database", product.id);
        product
    })
    .map_err(|err| store_error("Error al crear producto", err))
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    changes: &models::ProductChanges,
) -> Result<Option<models::Product>, ProductError> {
    let Some(mut query) = update_query(id, changes) else {
        return Err(ProductError::Validation(
            "No se proporcionaron datos para actualizar".to_string(),
        ));
    };

    let query_span = tracing::info_span!("Updating product", id);
    query
        .build_query_as::<models::Product>()
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| store_error("Error al actualizar producto", err))
}

pub async fn deactivate(pool: &PgPool, id: i32) -> Result<Option<models::Product>, ProductError> {
    let query_span = tracing::info_span!("Soft deleting product", id);
    sqlx::query_as::<_, models::Product>(&format!(
        r#"
        UPDATE productos
        SET activo = false, fecha_actualizacion = NOW()
        WHERE id = $1 AND activo = true
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Error al eliminar producto", err))
}

pub async fn fetch_categories(pool: &PgPool) -> Result<Vec<String>, ProductError> {
    let query_span = tracing::info_span!("Fetch distinct categories.");
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT categoria
        FROM productos
        WHERE activo = true AND categoria IS NOT NULL AND TRIM(categoria) <> ''
        ORDER BY categoria
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Error al obtener categorías", err))
}

pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<models::Product>, ProductError> {
    let query_span = tracing::info_span!("Search products.", term);
    sqlx::query_as::<_, models::Product>(&format!(
        r#"
        SELECT {}
        FROM productos
        WHERE activo = true AND (
            nombre ILIKE $1 OR
            descripcion ILIKE $1 OR
            categoria ILIKE $1
        )
        ORDER BY fecha_creacion DESC, id DESC
        "#,
        COLUMNS
    ))
    .bind(contains_pattern(term))
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Error al buscar productos", err))
}
