use crate::errors::ProductError;
use crate::models;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::str::FromStr;

/// A number as it arrives from a client: JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    pub fn to_decimal(&self) -> Option<Decimal> {
        let raw = match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().to_string(),
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .ok()
    }

    /// Whole numbers only: `5`, `5.0` and `"5"` parse, `5.5` does not.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// Body of `POST /api/productos` and `PUT /api/productos/{id}`.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(max_length = 255)]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(max_length = 100)]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(max_length = 500)]
    pub imagen_url: Option<String>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_nombre(nombre: &str, errors: &mut Vec<String>) -> bool {
    if nombre.trim().is_empty() {
        errors.push("El nombre no puede estar vacío".to_string());
        return false;
    }
    true
}

fn parse_precio(precio: &NumericInput, errors: &mut Vec<String>) -> Option<Decimal> {
    match precio.to_decimal() {
        Some(value) if value > Decimal::ZERO => Some(value),
        _ => {
            errors.push("El precio debe ser un número mayor que 0".to_string());
            None
        }
    }
}

fn parse_stock(stock: &NumericInput, errors: &mut Vec<String>) -> Option<i32> {
    match stock.to_integer().map(i32::try_from) {
        Some(Ok(value)) if value >= 0 => Some(value),
        _ => {
            errors.push("El stock debe ser un número entero no negativo".to_string());
            None
        }
    }
}

fn check_imagen_url(imagen_url: Option<&str>, errors: &mut Vec<String>) {
    match imagen_url.map(str::trim) {
        Some(url) if !url.is_empty() => {
            if reqwest::Url::parse(url).is_err() {
                errors.push("La URL de la imagen no es válida".to_string());
            }
        }
        _ => {}
    }
}

impl ProductForm {
    fn length_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(errors) => vec![format!("Campos demasiado largos: {}", errors)],
        }
    }

    /// Validates a creation request. Blank optional text is stored as `NULL`,
    /// a missing `stock` as 0.
    pub fn into_new_product(self) -> Result<models::NewProduct, ProductError> {
        let mut errors = self.length_errors();

        let nombre = match self.nombre {
            Some(nombre) if check_nombre(&nombre, &mut errors) => Some(nombre),
            Some(_) => None,
            None => {
                errors.push("El nombre es obligatorio".to_string());
                None
            }
        };
        let precio = match &self.precio {
            Some(precio) => parse_precio(precio, &mut errors),
            None => {
                errors.push("El precio es obligatorio".to_string());
                None
            }
        };
        let stock = match &self.stock {
            Some(stock) => parse_stock(stock, &mut errors),
            None => Some(0),
        };
        check_imagen_url(self.imagen_url.as_deref(), &mut errors);

        match (nombre, precio, stock) {
            (Some(nombre), Some(precio), Some(stock)) if errors.is_empty() => {
                Ok(models::NewProduct {
                    nombre,
                    descripcion: blank_to_none(self.descripcion),
                    precio,
                    categoria: blank_to_none(self.categoria),
                    stock,
                    imagen_url: blank_to_none(self.imagen_url),
                })
            }
            _ => Err(ProductError::Validation(errors.join(". "))),
        }
    }

    /// Validates an update request. Only supplied (non-null) fields end up in
    /// the change set; an empty string is a legitimate value except for
    /// `nombre`.
    pub fn into_changes(self) -> Result<models::ProductChanges, ProductError> {
        let mut errors = self.length_errors();

        let nombre = self
            .nombre
            .filter(|nombre| check_nombre(nombre, &mut errors));
        let precio = self
            .precio
            .as_ref()
            .and_then(|precio| parse_precio(precio, &mut errors));
        let stock = self
            .stock
            .as_ref()
            .and_then(|stock| parse_stock(stock, &mut errors));
        check_imagen_url(self.imagen_url.as_deref(), &mut errors);

        if !errors.is_empty() {
            return Err(ProductError::Validation(errors.join(". ")));
        }

        let changes = models::ProductChanges {
            nombre,
            descripcion: self.descripcion,
            precio,
            categoria: self.categoria,
            stock,
            imagen_url: self.imagen_url,
        };
        if changes.is_empty() {
            return Err(ProductError::Validation(
                "Debe proporcionar al menos un campo para actualizar".to_string(),
            ));
        }

        Ok(changes)
    }
}

/// Query string of `GET /api/productos`. Values stay raw strings here and
/// are parsed by [`ProductFilterQuery::to_filter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_max: Option<String>,
}

fn trimmed(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_bound(name: &str, value: Option<&String>) -> Result<Option<Decimal>, ProductError> {
    match trimmed(value) {
        Some(raw) => Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map(Some)
            .map_err(|_| ProductError::Validation(format!("{} debe ser un número", name))),
        None => Ok(None),
    }
}

impl ProductFilterQuery {
    /// Blank values are dropped; bounds must be numeric.
    pub fn to_filter(&self) -> Result<models::ProductFilter, ProductError> {
        Ok(models::ProductFilter {
            categoria: trimmed(self.categoria.as_ref()),
            nombre: trimmed(self.nombre.as_ref()),
            precio_min: parse_bound("precio_min", self.precio_min.as_ref())?,
            precio_max: parse_bound("precio_max", self.precio_max.as_ref())?,
        })
    }

    /// Overlays the fields supplied in `patch`.
    pub fn merge(&mut self, patch: ProductFilterQuery) {
        if patch.categoria.is_some() {
            self.categoria = patch.categoria;
        }
        if patch.nombre.is_some() {
            self.nombre = patch.nombre;
        }
        if patch.precio_min.is_some() {
            self.precio_min = patch.precio_min;
        }
        if patch.precio_max.is_some() {
            self.precio_max = patch.precio_max;
        }
    }
}
