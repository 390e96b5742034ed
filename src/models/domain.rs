use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which side of the tutoring relationship a person is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Student,
}

impl Role {
    /// The role a seeker of this role searches for
    pub fn opposite(self) -> Self {
        match self {
            Role::Mentor => Role::Student,
            Role::Student => Role::Mentor,
        }
    }
}

/// School subject (reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// Weekly timeslot (reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: String,
    pub day: Weekday,
    /// Start time, `HH:MM`
    pub start: String,
    /// End time, `HH:MM`
    pub end: String,
    pub label: String,
}

/// Candidate profile from the people catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub about: String,
    pub role: Role,
    pub grade: u8,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "reviewsCount", default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub verified: bool,
}

impl Person {
    pub fn teaches(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|s| s == subject_id)
    }

    /// Text searched by the free-text query, already lower-cased
    pub fn search_haystack(&self) -> String {
        format!("{} {} {} {}", self.name, self.about, self.school, self.city).to_lowercase()
    }
}

/// Session format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFormat {
    #[default]
    Video,
    Chat,
}

/// Session length; only 20 and 30 minute sessions exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum SessionDuration {
    #[default]
    Twenty,
    Thirty,
}

impl SessionDuration {
    pub fn minutes(self) -> u16 {
        match self {
            SessionDuration::Twenty => 20,
            SessionDuration::Thirty => 30,
        }
    }
}

impl TryFrom<u16> for SessionDuration {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            20 => Ok(SessionDuration::Twenty),
            30 => Ok(SessionDuration::Thirty),
            other => Err(format!("session duration must be 20 or 30 minutes, got {}", other)),
        }
    }
}

impl From<SessionDuration> for u16 {
    fn from(value: SessionDuration) -> Self {
        value.minutes()
    }
}

/// Seeker's search criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchFilters {
    #[serde(rename = "roleNeeded")]
    pub role_needed: Role,
    #[validate(range(min = 7, max = 11))]
    #[serde(rename = "seekerGrade")]
    pub seeker_grade: u8,
    #[validate(length(min = 1))]
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    #[serde(default)]
    pub format: SessionFormat,
    #[serde(rename = "durationMin", default)]
    pub duration_min: SessionDuration,
    #[serde(rename = "timeIds", default)]
    pub time_ids: Vec<String>,
    #[serde(rename = "onlyVerified", default)]
    pub only_verified: bool,
    #[serde(default)]
    pub query: String,
}

impl MatchFilters {
    /// Lower-cased query, or `None` when it is blank
    pub fn normalized_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Mentor search rebuilt from an existing request's fields
    pub fn for_request(request: &SessionRequest) -> Self {
        Self {
            role_needed: Role::Mentor,
            seeker_grade: request.student_grade,
            subject_id: request.subject_id.clone(),
            format: request.format,
            duration_min: request.duration_min,
            time_ids: request.preferred_times.clone(),
            only_verified: false,
            query: String::new(),
        }
    }
}

/// Lifecycle state of a session request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Confirmed,
    Completed,
}

/// One sought tutoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(rename = "studentGrade")]
    pub student_grade: u8,
    #[serde(rename = "preferredTimes", default)]
    pub preferred_times: Vec<String>,
    pub format: SessionFormat,
    #[serde(rename = "durationMin")]
    pub duration_min: SessionDuration,
    pub status: RequestStatus,
    #[serde(rename = "matchedMentorId", default, skip_serializing_if = "Option::is_none")]
    pub matched_mentor_id: Option<String>,
}

/// Ranked candidate with its compatibility score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub person: Person,
    pub score: i32,
    #[serde(rename = "sharedTimeslots")]
    pub shared_timeslots: Vec<String>,
}

/// Score table deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub role: i32,
    pub subject: i32,
    pub grade_fit: i32,
    pub grade_misfit: i32,
    pub overlap_cap: usize,
    pub verified: i32,
    pub query: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            role: 3,
            subject: 4,
            grade_fit: 2,
            grade_misfit: 2,
            overlap_cap: 3,
            verified: 1,
            query: 2,
        }
    }
}
