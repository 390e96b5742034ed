use serde::{Deserialize, Serialize};
use crate::models::{Person, RequestStatus, Role, SessionRequest};

/// Counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    pub total: usize,
    pub open: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub mentors: usize,
    #[serde(rename = "verifiedMentors")]
    pub verified_mentors: usize,
}

/// Count requests by status and mentors in the candidate pool
pub fn calculate_stats(requests: &[SessionRequest], people: &[Person]) -> RequestStats {
    let count = |status: RequestStatus| requests.iter().filter(|r| r.status == status).count();
    let mentors = people.iter().filter(|p| p.role == Role::Mentor);

    RequestStats {
        total: requests.len(),
        open: count(RequestStatus::Open),
        confirmed: count(RequestStatus::Confirmed),
        completed: count(RequestStatus::Completed),
        mentors: mentors.clone().count(),
        verified_mentors: mentors.filter(|p| p.verified).count(),
    }
}

/// Mentors ordered by portfolio points, highest first
pub fn leaderboard(people: &[Person]) -> Vec<&Person> {
    let mut mentors: Vec<&Person> = people.iter().filter(|p| p.role == Role::Mentor).collect();
    mentors.sort_by(|a, b| b.points.cmp(&a.points));
    mentors
}

/// Five-star rendering of a rating, e.g. `★★★★☆`
pub fn rating_stars(rating: f64) -> String {
    let full = (rating.round().clamp(0.0, 5.0)) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}
