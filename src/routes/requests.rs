use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::LifecycleError;
use crate::models::{
    AutoMatchRequest, CreateSessionRequest, MatchFilters, MatchRequest, QuickMatchRequest, RequestView,
    SessionRequest, TopicRequest,
};
use crate::routes::{error_response, AppState};

/// Configure request lifecycle routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/requests", web::get().to(list_requests))
        .route("/requests", web::post().to(create_request))
        .route("/requests/quick-match", web::post().to(quick_match))
        .route("/requests/{id}", web::get().to(get_request))
        .route("/requests/{id}/match", web::post().to(match_request))
        .route("/requests/{id}/auto-match", web::post().to(auto_match))
        .route("/requests/{id}/complete", web::post().to(complete_request))
        .route("/requests/{id}/topic", web::put().to(set_topic));
}

fn lifecycle_error_response(err: &LifecycleError) -> HttpResponse {
    let (status, error) = match err {
        LifecycleError::NotFound(_) => (StatusCode::NOT_FOUND, "Request not found"),
        LifecycleError::InvalidTransition { .. } => (StatusCode::CONFLICT, "Invalid transition"),
        LifecycleError::NoCandidates(_) => (StatusCode::UNPROCESSABLE_ENTITY, "No candidates"),
    };
    error_response(status, error, err.to_string())
}

fn view(state: &AppState, request: &SessionRequest) -> RequestView {
    RequestView::build(request, &state.catalog)
}

fn respond(state: &AppState, result: Result<SessionRequest, LifecycleError>) -> HttpResponse {
    match result {
        Ok(request) => HttpResponse::Ok().json(view(state, &request)),
        Err(e) => {
            tracing::info!("Rejected lifecycle operation: {}", e);
            lifecycle_error_response(&e)
        }
    }
}

/// All requests, newest first
async fn list_requests(state: web::Data<AppState>) -> impl Responder {
    let store = state.store.lock().await;
    let views: Vec<RequestView> = store.requests().iter().map(|r| view(&state, r)).collect();

    HttpResponse::Ok().json(views)
}

async fn get_request(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let store = state.store.lock().await;

    match store.get(&id) {
        Some(request) => HttpResponse::Ok().json(view(&state, request)),
        None => lifecycle_error_response(&LifecycleError::NotFound(id)),
    }
}

/// Create request endpoint
///
/// POST /api/v1/requests
///
/// Request body:
/// ```json
/// {
///   "filters": { "roleNeeded": "mentor", "seekerGrade": 8, "subjectId": "math" },
///   "topic": "Fractions"
/// }
/// ```
async fn create_request(
    state: web::Data<AppState>,
    req: web::Json<CreateSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let body = req.into_inner();
    let request = state.store.lock().await.create(&body.filters, body.topic);

    HttpResponse::Created().json(view(&state, &request))
}

/// Create a request already confirmed with the chosen mentor
async fn quick_match(
    state: web::Data<AppState>,
    req: web::Json<QuickMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let request = state.store.lock().await.quick_match(&req.filters, &req.mentor_id);

    HttpResponse::Created().json(view(&state, &request))
}

async fn match_request(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let id = path.into_inner();
    let result = state.store.lock().await.match_request(&id, &req.mentor_id);

    respond(&state, result)
}

/// Match with the best-ranked mentor
///
/// An empty body rebuilds the mentor search from the request's own
/// subject, grade and preferred times. A body that does not parse is
/// rejected before the store is touched.
async fn auto_match(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    let id = path.into_inner();

    let requested = match parse_auto_match(&body) {
        Ok(req) => req.filters,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, "invalid_json", message),
    };

    if let Some(filters) = &requested {
        if let Err(errors) = filters.validate() {
            return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
        }
    }

    let mut store = state.store.lock().await;

    let filters = match (requested, store.get(&id)) {
        (Some(filters), _) => filters,
        (None, Some(request)) => MatchFilters::for_request(request),
        (None, None) => return lifecycle_error_response(&LifecycleError::NotFound(id)),
    };

    let ranked = state.matcher.rank(&filters, &state.catalog.people);
    tracing::debug!("Auto-match for {} considered {} ranked candidates", id, ranked.matches.len());

    let result = store.auto_match(&id, &ranked.matches);
    drop(store);

    respond(&state, result)
}

fn parse_auto_match(body: &[u8]) -> Result<AutoMatchRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AutoMatchRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {}", e))
}

async fn complete_request(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let result = state.store.lock().await.complete(&id);

    respond(&state, result)
}

/// Replace a request's topic; permitted in every state
async fn set_topic(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<TopicRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let result = state.store.lock().await.set_topic(&id, &req.topic);

    respond(&state, result)
}
