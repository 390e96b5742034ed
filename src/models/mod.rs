// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Person, Role, Subject, Timeslot, MatchFilters, SessionFormat, SessionDuration, SessionRequest, RequestStatus, ScoredCandidate, ScoringWeights};
pub use requests::{RankQuery, CreateSessionRequest, QuickMatchRequest, MatchRequest, AutoMatchRequest, TopicRequest};
pub use responses::{RankResponse, RequestView, LeaderboardEntry, HealthResponse, ErrorResponse};
