use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the `productos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub categoria: Option<String>,
    pub stock: i32,
    pub imagen_url: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Validated input for a new product. `id`, `activo` and the timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub categoria: Option<String>,
    pub stock: i32,
    pub imagen_url: Option<String>,
}

/// Sparse set of validated changes. `None` means "leave the column alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Decimal>,
    pub categoria: Option<String>,
    pub stock: Option<i32>,
    pub imagen_url: Option<String>,
}

/// Typed value of one column in an UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Decimal(Decimal),
    Integer(i32),
}

pub struct UpdatableField {
    pub column: &'static str,
    pub value: fn(&ProductChanges) -> Option<FieldValue>,
}

/// Columns an update may touch, in statement order.
pub const UPDATABLE_FIELDS: &[UpdatableField] = &[
    UpdatableField {
        column: "nombre",
        value: |c| c.nombre.clone().map(FieldValue::Text),
    },
    UpdatableField {
        column: "descripcion",
        value: |c| c.descripcion.clone().map(FieldValue::Text),
    },
    UpdatableField {
        column: "precio",
        value: |c| c.precio.map(FieldValue::Decimal),
    },
    UpdatableField {
        column: "categoria",
        value: |c| c.categoria.clone().map(FieldValue::Text),
    },
    UpdatableField {
        column: "stock",
        value: |c| c.stock.map(FieldValue::Integer),
    },
    UpdatableField {
        column: "imagen_url",
        value: |c| c.imagen_url.clone().map(FieldValue::Text),
    },
];

impl ProductChanges {
    /// `(column, value)` for every supplied field.
    pub fn assignments(&self) -> Vec<(&'static str, FieldValue)> {
        UPDATABLE_FIELDS
            .iter()
            .filter_map(|field| (field.value)(self).map(|value| (field.column, value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Writes the supplied fields onto `product`. Timestamps are the caller's job.
    pub fn apply(&self, product: &mut Product) {
        if let Some(nombre) = &self.nombre {
            product.nombre = nombre.clone();
        }
        if let Some(descripcion) = &self.descripcion {
            product.descripcion = Some(descripcion.clone());
        }
        if let Some(precio) = self.precio {
            product.precio = precio;
        }
        if let Some(categoria) = &self.categoria {
            product.categoria = Some(categoria.clone());
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(imagen_url) = &self.imagen_url {
            product.imagen_url = Some(imagen_url.clone());
        }
    }
}

/// Parsed list filters. Text filters are already trimmed and non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub categoria: Option<String>,
    pub nombre: Option<String>,
    pub precio_min: Option<Decimal>,
    pub precio_max: Option<Decimal>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.categoria.is_none()
            && self.nombre.is_none()
            && self.precio_min.is_none()
            && self.precio_max.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let contains = |haystack: Option<&str>, needle: &Option<String>| match needle {
            Some(needle) => haystack
                .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            None => true,
        };

        contains(product.categoria.as_deref(), &self.categoria)
            && contains(Some(product.nombre.as_str()), &self.nombre)
            && self.precio_min.map_or(true, |min| product.precio >= min)
            && self.precio_max.map_or(true, |max| product.precio <= max)
    }
}

impl Product {
    /// Case-insensitive match of `term` against nombre, descripcion or categoria.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            Some(self.nombre.as_str()),
            self.descripcion.as_deref(),
            self.categoria.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&term))
    }
}
