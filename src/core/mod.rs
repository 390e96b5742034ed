// Core algorithm exports
pub mod filters;
pub mod lifecycle;
pub mod matcher;
pub mod scoring;
pub mod stats;

pub use filters::{passes_filters, matches_query, shared_timeslots};
pub use lifecycle::{apply_match, apply_complete, apply_topic, LifecycleError, Transition, QUICK_MATCH_TOPIC};
pub use matcher::{Matcher, RankResult};
pub use scoring::{calculate_match_score, rating_bonus};
pub use stats::{calculate_stats, leaderboard, rating_stars, RequestStats};
