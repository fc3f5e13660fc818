use crate::helpers::JsonResponse;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Every failure a product operation can end in.
///
/// Handlers return this directly; `error_response` is the one place where
/// failures are turned into the `{success, data, message}` envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Bad or missing input. Raised before any store call.
    #[error("{0}")]
    Validation(String),
    /// No active row matches the requested id, or no route matched.
    #[error("{0}")]
    NotFound(String),
    /// Request body or query string that could not be parsed at all.
    #[error("{0}")]
    MalformedRequest(String),
    /// Persistence failure. The message is descriptive, never the raw driver error.
    #[error("{0}")]
    Store(String),
}

impl ProductError {
    pub fn product_not_found() -> Self {
        Self::NotFound("Producto no encontrado".to_string())
    }

    pub fn invalid_id() -> Self {
        Self::Validation("ID de producto inválido".to_string())
    }
}

impl ResponseError for ProductError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        JsonResponse::<()>::build().error(self.status_code(), self.to_string())
    }
}

/// Classifies a sqlx failure the way the API reports it.
///
/// Constraint violations are the caller's fault (400); anything else is
/// logged and reported as `Store` with `context` as the message.
pub fn store_error(context: &str, err: sqlx::Error) -> ProductError {
    if let sqlx::Error::Database(db_err) = &err {
        let message = match db_err.code().as_deref() {
            Some("23505") => Some("Ya existe un registro con estos datos"),
            Some("23503") => Some("Referencia inválida en la base de datos"),
            Some("23514") => Some("Los datos no cumplen con las restricciones"),
            _ => None,
        };
        if let Some(message) = message {
            tracing::warn!("{}: constraint violation: {:?}", context, db_err);
            return ProductError::Validation(message.to_string());
        }
    }

    tracing::error!("{}: {:?}", context, err);
    ProductError::Store(context.to_string())
}
