use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

/// Uniform response envelope: `{ success, data, message, count? }`.
///
/// `data` is always present (`null` on errors); `count` only accompanies
/// list payloads.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

pub struct JsonResponseBuilder<T> {
    data: Option<T>,
    count: Option<usize>,
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            data: None,
            count: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_item(mut self, item: T) -> Self {
        self.data = Some(item);
        self
    }

    fn into_envelope(self, success: bool, message: String) -> JsonResponse<T> {
        JsonResponse {
            success,
            data: self.data,
            message,
            count: self.count,
        }
    }

    pub fn ok<M: Into<String>>(self, message: M) -> HttpResponse {
        self.respond(StatusCode::OK, message)
    }

    pub fn created<M: Into<String>>(self, message: M) -> HttpResponse {
        self.respond(StatusCode::CREATED, message)
    }

    pub fn respond<M: Into<String>>(self, status: StatusCode, message: M) -> HttpResponse {
        HttpResponse::build(status).json(self.into_envelope(true, message.into()))
    }

    /// Failure envelope; any payload set on the builder is dropped.
    pub fn error<M: Into<String>>(self, status: StatusCode, message: M) -> HttpResponse {
        let message = message.into();
        let message = if message.trim().is_empty() {
            String::from("Error interno del servidor")
        } else {
            message
        };

        HttpResponse::build(status).json(JsonResponse::<T> {
            success: false,
            data: None,
            message,
            count: None,
        })
    }
}

impl<T> JsonResponseBuilder<Vec<T>>
where
    T: Serialize,
{
    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.count = Some(list.len());
        self.data = Some(list);
        self
    }
}
