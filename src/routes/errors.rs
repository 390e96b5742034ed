use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;

/// Extractor failure rendered as an `ErrorResponse` body
#[derive(Debug)]
pub struct PayloadError(ErrorResponse);

impl PayloadError {
    fn bad_request(error: &str, message: String) -> Self {
        Self(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: StatusCode::BAD_REQUEST.as_u16(),
        })
    }
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PayloadError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    PayloadError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}
