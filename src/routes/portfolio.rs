use actix_web::{web, HttpResponse, Responder};
use crate::core::{leaderboard, rating_stars};
use crate::models::LeaderboardEntry;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/stats", web::get().to(get_stats))
        .route("/portfolio/leaderboard", web::get().to(get_leaderboard));
}

/// Request counters by status plus mentor counts
async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let stats = state.store.lock().await.stats(&state.catalog.people);
    HttpResponse::Ok().json(stats)
}

/// Mentors ranked by portfolio points
async fn get_leaderboard(state: web::Data<AppState>) -> impl Responder {
    let entries: Vec<LeaderboardEntry> = leaderboard(&state.catalog.people)
        .into_iter()
        .enumerate()
        .map(|(idx, person)| LeaderboardEntry {
            rank: idx + 1,
            stars: rating_stars(person.rating),
            person: person.clone(),
        })
        .collect();

    HttpResponse::Ok().json(entries)
}
