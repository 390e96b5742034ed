use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{HealthResponse, MatchFilters, RankQuery, RankResponse};
use crate::routes::{error_response, AppState};

/// Configure catalog and ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalog/subjects", web::get().to(list_subjects))
        .route("/catalog/timeslots", web::get().to(list_timeslots))
        .route("/catalog/people/{id}", web::get().to(get_person))
        .route("/matches/rank", web::post().to(rank_candidates));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let requests = state.store.lock().await.len();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        requests,
    })
}

async fn list_subjects(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.catalog.subjects)
}

async fn list_timeslots(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.catalog.timeslots)
}

async fn get_person(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match state.catalog.person_by_id(&id) {
        Some(person) => HttpResponse::Ok().json(person),
        None => error_response(StatusCode::NOT_FOUND, "Person not found", format!("No person with id {}", id)),
    }
}

/// Rank candidates endpoint
///
/// POST /api/v1/matches/rank?limit=20
///
/// Request body:
/// ```json
/// {
///   "roleNeeded": "mentor",
///   "seekerGrade": 8,
///   "subjectId": "math",
///   "format": "video",
///   "durationMin": 20,
///   "timeIds": ["wed-17"],
///   "onlyVerified": true,
///   "query": ""
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    filters: web::Json<MatchFilters>,
    query: web::Query<RankQuery>,
) -> impl Responder {
    if let Err(errors) = filters.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    // Cap limit to keep responses small
    let limit = query.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    if state.catalog.subject_by_id(&filters.subject_id).is_none() {
        tracing::debug!("Ranking for unknown subject {}", filters.subject_id);
    }

    let mut result = state.matcher.rank(&filters, &state.catalog.people);
    let total_matches = result.matches.len();
    result.matches.truncate(limit);

    tracing::info!(
        "Returning {} of {} matches for subject {} (from {} candidates)",
        result.matches.len(),
        total_matches,
        filters.subject_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RankResponse {
        matches: result.matches,
        total_matches,
        total_candidates: result.total_candidates,
    })
}
