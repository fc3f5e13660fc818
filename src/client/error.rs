use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a failure envelope; `message` is the server's.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("No se pudo conectar con la API: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Respuesta inválida de la API: {0}")]
    InvalidResponse(String),
    #[error("URL inválida: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
