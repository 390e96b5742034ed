use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use crate::models::{MatchFilters, RequestStatus, SessionRequest};

/// Topic given to requests created through quick match
pub const QUICK_MATCH_TOPIC: &str = "Quick session: need help with the topic";

/// Lifecycle operations that move a request between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Match,
    Complete,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Match => write!(f, "match"),
            Transition::Complete => write!(f, "complete"),
        }
    }
}

/// Errors raised by lifecycle operations
///
/// The request collection is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Request not found: {0}")]
    NotFound(String),

    #[error("Cannot {transition} request {id} while it is {from:?}")]
    InvalidTransition {
        id: String,
        from: RequestStatus,
        transition: Transition,
    },

    #[error("No candidates available to match request {0}")]
    NoCandidates(String),
}

impl RequestStatus {
    /// Transition table: Open -> Confirmed -> Completed, nothing else
    pub fn next(self, transition: Transition) -> Option<RequestStatus> {
        match (self, transition) {
            (RequestStatus::Open, Transition::Match) => Some(RequestStatus::Confirmed),
            (RequestStatus::Confirmed, Transition::Complete) => Some(RequestStatus::Completed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RequestStatus::Completed
    }

    /// Whether a request in this state carries a matched mentor
    pub fn has_mentor(self) -> bool {
        matches!(self, RequestStatus::Confirmed | RequestStatus::Completed)
    }
}

impl SessionRequest {
    /// New request in the `Open` state
    pub fn open(id: String, created_at: DateTime<Utc>, filters: &MatchFilters, topic: String) -> Self {
        Self {
            id,
            created_at,
            subject_id: filters.subject_id.clone(),
            topic,
            student_grade: filters.seeker_grade,
            preferred_times: filters.time_ids.clone(),
            format: filters.format,
            duration_min: filters.duration_min,
            status: RequestStatus::Open,
            matched_mentor_id: None,
        }
    }

    /// Quick match: a request created directly in `Confirmed`
    ///
    /// This is a constructor, not a transition; it is the only way a
    /// request skips the `Open` state.
    pub fn pre_confirmed(
        id: String,
        created_at: DateTime<Utc>,
        filters: &MatchFilters,
        mentor_id: String,
    ) -> Self {
        let mut request = Self::open(id, created_at, filters, QUICK_MATCH_TOPIC.to_string());
        request.status = RequestStatus::Confirmed;
        request.matched_mentor_id = Some(mentor_id);
        request
    }

    /// `matched_mentor_id` is present iff the status carries a mentor
    pub fn is_consistent(&self) -> bool {
        self.status.has_mentor() == self.matched_mentor_id.is_some()
    }
}

fn advance(request: &SessionRequest, transition: Transition) -> Result<RequestStatus, LifecycleError> {
    request
        .status
        .next(transition)
        .ok_or_else(|| LifecycleError::InvalidTransition {
            id: request.id.clone(),
            from: request.status,
            transition,
        })
}

/// Confirm an open request with a mentor
///
/// The mentor id is not checked against the catalog.
pub fn apply_match(request: &mut SessionRequest, mentor_id: &str) -> Result<(), LifecycleError> {
    let status = advance(request, Transition::Match)?;
    request.status = status;
    request.matched_mentor_id = Some(mentor_id.to_string());
    Ok(())
}

/// Complete a confirmed request; the matched mentor is kept
pub fn apply_complete(request: &mut SessionRequest) -> Result<(), LifecycleError> {
    request.status = advance(request, Transition::Complete)?;
    Ok(())
}

/// Replace the topic; allowed in every state
pub fn apply_topic(request: &mut SessionRequest, topic: &str) {
    request.topic = topic.to_string();
}
