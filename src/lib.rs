//! SkillPort - peer-tutoring matchmaking service
//!
//! This library provides the candidate ranking used to pair students with
//! peer mentors, and the lifecycle of session requests
//! (open -> confirmed -> completed) with pluggable persistence.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, RankResult, LifecycleError, calculate_match_score};
pub use models::{Person, MatchFilters, SessionRequest, RequestStatus, ScoredCandidate, ScoringWeights};
pub use services::{Catalog, RequestStore};
