use serde::{Deserialize, Serialize};
use crate::models::domain::{Person, RequestStatus, ScoredCandidate, SessionDuration, SessionFormat, SessionRequest};
use crate::services::Catalog;

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<ScoredCandidate>,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Session request with display labels resolved against the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestView {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    #[serde(rename = "subjectName")]
    pub subject_name: String,
    pub topic: String,
    #[serde(rename = "studentGrade")]
    pub student_grade: u8,
    #[serde(rename = "preferredTimes")]
    pub preferred_times: Vec<String>,
    #[serde(rename = "timeLabels")]
    pub time_labels: Vec<String>,
    pub format: SessionFormat,
    #[serde(rename = "durationMin")]
    pub duration_min: SessionDuration,
    pub status: RequestStatus,
    #[serde(rename = "matchedMentorId", skip_serializing_if = "Option::is_none")]
    pub matched_mentor_id: Option<String>,
    #[serde(rename = "mentorName", skip_serializing_if = "Option::is_none")]
    pub mentor_name: Option<String>,
}

impl RequestView {
    pub fn build(request: &SessionRequest, catalog: &Catalog) -> Self {
        let mentor_name = request
            .matched_mentor_id
            .as_deref()
            .and_then(|id| catalog.person_by_id(id))
            .map(|p| p.name.clone());

        Self {
            id: request.id.clone(),
            created_at: request.created_at,
            subject_id: request.subject_id.clone(),
            subject_name: catalog.subject_name(&request.subject_id).to_string(),
            topic: request.topic.clone(),
            student_grade: request.student_grade,
            preferred_times: request.preferred_times.clone(),
            time_labels: request
                .preferred_times
                .iter()
                .map(|t| catalog.time_label(t).to_string())
                .collect(),
            format: request.format,
            duration_min: request.duration_min,
            status: request.status,
            matched_mentor_id: request.matched_mentor_id.clone(),
            mentor_name,
        }
    }
}

/// Mentor row on the portfolio leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub person: Person,
    pub stars: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub requests: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
