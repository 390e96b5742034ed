// Route exports
pub mod errors;
pub mod matches;
pub mod portfolio;
pub mod requests;

use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{Catalog, RequestStore};

pub use errors::{json_config, query_config};

/// Application state shared across all handlers
///
/// The request store sits behind a single async mutex, so lifecycle
/// operations are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matcher: Matcher,
    pub store: Arc<Mutex<RequestStore>>,
    pub default_limit: u16,
    pub max_limit: u16,
}

impl AppState {
    pub fn new(catalog: Catalog, matcher: Matcher, store: RequestStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            matcher,
            store: Arc::new(Mutex::new(store)),
            default_limit: 20,
            max_limit: 100,
        }
    }

    pub fn with_limits(mut self, default_limit: u16, max_limit: u16) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit;
        self
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(requests::configure)
            .configure(portfolio::configure),
    );
}

/// JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}
