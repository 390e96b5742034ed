use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::MatchFilters;

/// Query parameters for the rank endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankQuery {
    pub limit: Option<u16>,
}

/// Request to open a new session request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(nested)]
    pub filters: MatchFilters,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Request to create an already-confirmed session with a chosen mentor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuickMatchRequest {
    #[validate(nested)]
    pub filters: MatchFilters,
    #[validate(length(min = 1))]
    #[serde(alias = "mentor_id", rename = "mentorId")]
    pub mentor_id: String,
}

/// Request to confirm an open request with a mentor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "mentor_id", rename = "mentorId")]
    pub mentor_id: String,
}

/// Request to confirm an open request with the best-ranked mentor
///
/// Without filters the search is rebuilt from the request itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoMatchRequest {
    #[serde(default)]
    pub filters: Option<MatchFilters>,
}

/// Request to replace a request's topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}
