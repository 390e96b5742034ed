use chrono::{DateTime, TimeZone, Utc};
use crate::core::{apply_complete, apply_match, apply_topic, calculate_stats, LifecycleError, RequestStats};
use crate::models::{
    MatchFilters, Person, RequestStatus, ScoredCandidate, SessionDuration, SessionFormat, SessionRequest,
};
use crate::services::ids::IdGenerator;
use crate::services::snapshot::{RequestSnapshot, SnapshotBackend};

/// Owner of the mutable request collection
///
/// Every mutation goes through the lifecycle rules and is followed by a
/// best-effort save. Requests are kept newest first.
pub struct RequestStore {
    requests: Vec<SessionRequest>,
    backend: Box<dyn SnapshotBackend>,
    ids: Box<dyn IdGenerator>,
}

impl RequestStore {
    /// Load the collection from `backend`, falling back to `seed`
    ///
    /// A missing, unreadable or corrupt snapshot never fails startup.
    pub fn open(
        backend: Box<dyn SnapshotBackend>,
        ids: Box<dyn IdGenerator>,
        seed: Vec<SessionRequest>,
    ) -> Self {
        let requests = match backend.load() {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    "Loaded {} requests from {}",
                    snapshot.requests.len(),
                    backend.describe()
                );
                snapshot.requests
            }
            Ok(None) => {
                tracing::info!("No saved requests in {}, starting from seed", backend.describe());
                seed
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load requests from {} ({}), starting from seed",
                    backend.describe(),
                    e
                );
                seed
            }
        };

        Self {
            requests,
            backend,
            ids,
        }
    }

    pub fn requests(&self) -> &[SessionRequest] {
        &self.requests
    }

    pub fn get(&self, id: &str) -> Option<&SessionRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot::new(self.requests.clone())
    }

    /// Open a new request from the seeker's filters
    pub fn create(&mut self, filters: &MatchFilters, topic: Option<String>) -> SessionRequest {
        let id = self.fresh_id();
        let request = SessionRequest::open(id, Utc::now(), filters, topic.unwrap_or_default());

        tracing::info!("Created request {} for subject {}", request.id, request.subject_id);
        self.insert(request)
    }

    /// Create a request already confirmed with `mentor_id`
    pub fn quick_match(&mut self, filters: &MatchFilters, mentor_id: &str) -> SessionRequest {
        let id = self.fresh_id();
        let request = SessionRequest::pre_confirmed(id, Utc::now(), filters, mentor_id.to_string());

        tracing::info!("Quick-matched request {} with mentor {}", request.id, mentor_id);
        self.insert(request)
    }

    /// Open -> Confirmed
    pub fn match_request(&mut self, id: &str, mentor_id: &str) -> Result<SessionRequest, LifecycleError> {
        let request = self.find_mut(id)?;
        apply_match(request, mentor_id)?;
        let updated = request.clone();

        tracing::info!("Request {} confirmed with mentor {}", id, mentor_id);
        self.persist();
        Ok(updated)
    }

    /// Confirmed -> Completed
    pub fn complete(&mut self, id: &str) -> Result<SessionRequest, LifecycleError> {
        let request = self.find_mut(id)?;
        apply_complete(request)?;
        let updated = request.clone();

        tracing::info!("Request {} completed", id);
        self.persist();
        Ok(updated)
    }

    pub fn set_topic(&mut self, id: &str, topic: &str) -> Result<SessionRequest, LifecycleError> {
        let request = self.find_mut(id)?;
        apply_topic(request, topic);
        let updated = request.clone();

        tracing::debug!("Request {} topic updated", id);
        self.persist();
        Ok(updated)
    }

    /// Match with the top-ranked candidate
    pub fn auto_match(
        &mut self,
        id: &str,
        ranked: &[ScoredCandidate],
    ) -> Result<SessionRequest, LifecycleError> {
        match ranked.first() {
            Some(best) => self.match_request(id, &best.person.id),
            None => {
                // Unknown ids still report NotFound first
                self.get(id).ok_or_else(|| LifecycleError::NotFound(id.to_string()))?;
                Err(LifecycleError::NoCandidates(id.to_string()))
            }
        }
    }

    pub fn stats(&self, people: &[Person]) -> RequestStats {
        calculate_stats(&self.requests, people)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut SessionRequest, LifecycleError> {
        self.requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))
    }

    /// Next generator id not already taken by a stored request
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
            tracing::debug!("Generated id {} already in use, drawing another", id);
        }
    }

    fn insert(&mut self, request: SessionRequest) -> SessionRequest {
        self.requests.insert(0, request.clone());
        self.persist();
        request
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.backend.save(&snapshot) {
            tracing::warn!("Failed to save requests to {}: {}", self.backend.describe(), e);
        }
    }
}

fn seed_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Demo requests used when no saved state exists
pub fn seed_requests() -> Vec<SessionRequest> {
    vec![
        SessionRequest {
            id: "r1".to_string(),
            created_at: seed_time(2026, 2, 19, 9, 30),
            subject_id: "math".to_string(),
            topic: "Fractions and common denominators".to_string(),
            student_grade: 8,
            preferred_times: vec!["wed-17".to_string(), "sun-16".to_string()],
            format: SessionFormat::Video,
            duration_min: SessionDuration::Twenty,
            status: RequestStatus::Open,
            matched_mentor_id: None,
        },
        SessionRequest {
            id: "r2".to_string(),
            created_at: seed_time(2026, 2, 18, 16, 10),
            subject_id: "rus".to_string(),
            topic: "Exam essay: structure and arguments".to_string(),
            student_grade: 9,
            preferred_times: vec!["tue-18".to_string(), "thu-19".to_string()],
            format: SessionFormat::Chat,
            duration_min: SessionDuration::Thirty,
            status: RequestStatus::Confirmed,
            matched_mentor_id: Some("p2".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Matcher, Transition, QUICK_MATCH_TOPIC};
    use crate::models::Role;
    use crate::services::ids::SequentialIds;
    use crate::services::snapshot::{MemoryBackend, PersistenceError};

    /// Backend whose every call fails
    struct BrokenBackend;

    impl SnapshotBackend for BrokenBackend {
        fn load(&self) -> Result<Option<RequestSnapshot>, PersistenceError> {
            Err(PersistenceError::Unavailable("disk on fire".to_string()))
        }

        fn save(&mut self, _snapshot: &RequestSnapshot) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("disk on fire".to_string()))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn create_filters() -> MatchFilters {
        MatchFilters {
            role_needed: Role::Mentor,
            seeker_grade: 8,
            subject_id: "math".to_string(),
            format: SessionFormat::Video,
            duration_min: SessionDuration::Twenty,
            time_ids: vec!["wed-17".to_string()],
            only_verified: true,
            query: String::new(),
        }
    }

    fn create_store(backend: MemoryBackend) -> RequestStore {
        RequestStore::open(Box::new(backend), Box::new(SequentialIds::new("t", 1)), vec![])
    }

    #[test]
    fn test_open_uses_seed_when_empty() {
        let store = RequestStore::open(
            Box::new(MemoryBackend::new()),
            Box::new(SequentialIds::default()),
            seed_requests(),
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("r2").and_then(|r| r.matched_mentor_id.as_deref()), Some("p2"));
    }

    #[test]
    fn test_open_prefers_saved_snapshot() {
        let saved = RequestSnapshot::new(vec![seed_requests().remove(1)]);
        let store = RequestStore::open(
            Box::new(MemoryBackend::with_snapshot(saved)),
            Box::new(SequentialIds::default()),
            seed_requests(),
        );

        assert_eq!(store.len(), 1);
        assert!(store.get("r1").is_none());
    }

    #[test]
    fn test_broken_backend_is_not_fatal() {
        let mut store = RequestStore::open(
            Box::new(BrokenBackend),
            Box::new(SequentialIds::new("t", 1)),
            seed_requests(),
        );
        assert_eq!(store.len(), 2);

        let created = store.create(&create_filters(), None);
        let confirmed = store.match_request(&created.id, "p1").unwrap();

        assert_eq!(confirmed.status, RequestStatus::Confirmed);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let backend = MemoryBackend::new();
        let mut store = create_store(backend.clone());

        let first = store.create(&create_filters(), None);
        let second = store.create(&create_filters(), Some("Fractions".to_string()));

        assert_eq!(first.id, "t1");
        assert_eq!(first.status, RequestStatus::Open);
        assert_eq!(first.matched_mentor_id, None);
        assert_eq!(first.topic, "");
        assert_eq!(second.topic, "Fractions");
        assert_eq!(store.requests()[0].id, "t2");

        let saved = backend.snapshot().unwrap();
        assert_eq!(saved.requests, store.requests());
    }

    #[test]
    fn test_generated_ids_skip_existing() {
        let mut store = RequestStore::open(
            Box::new(MemoryBackend::new()),
            Box::new(SequentialIds::default()),
            seed_requests(),
        );

        let created = store.create(&create_filters(), None);
        assert_eq!(created.id, "r3");
    }

    #[test]
    fn test_quick_match_is_confirmed() {
        let mut store = create_store(MemoryBackend::new());
        let request = store.quick_match(&create_filters(), "p3");

        assert_eq!(request.status, RequestStatus::Confirmed);
        assert_eq!(request.matched_mentor_id.as_deref(), Some("p3"));
        assert_eq!(request.topic, QUICK_MATCH_TOPIC);
    }

    #[test]
    fn test_lifecycle_through_store() {
        let mut store = create_store(MemoryBackend::new());
        let id = store.create(&create_filters(), None).id;

        store.match_request(&id, "m1").unwrap();
        let completed = store.complete(&id).unwrap();
        assert_eq!(completed.status, RequestStatus::Completed);
        assert_eq!(completed.matched_mentor_id.as_deref(), Some("m1"));

        let before = store.requests().to_vec();
        let err = store.match_request(&id, "m2").unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { transition: Transition::Match, .. }));
        assert_eq!(store.requests(), before.as_slice());
    }

    #[test]
    fn test_rejected_operation_does_not_save() {
        let backend = MemoryBackend::new();
        let mut store = create_store(backend.clone());
        let id = store.create(&create_filters(), None).id;
        let saved_before = backend.snapshot();

        assert!(store.complete(&id).is_err());
        assert_eq!(backend.snapshot(), saved_before);
    }

    #[test]
    fn test_unknown_request_not_found() {
        let mut store = create_store(MemoryBackend::new());

        assert_eq!(
            store.complete("missing").unwrap_err(),
            LifecycleError::NotFound("missing".to_string())
        );
        assert!(store.set_topic("missing", "x").is_err());
        assert!(store.auto_match("missing", &[]).is_err());
    }

    #[test]
    fn test_set_topic_on_confirmed_request() {
        let mut store = create_store(MemoryBackend::new());
        let id = store.quick_match(&create_filters(), "p1").id;

        let updated = store.set_topic(&id, "Quadratic equations").unwrap();
        assert_eq!(updated.topic, "Quadratic equations");
        assert_eq!(updated.status, RequestStatus::Confirmed);
    }

    #[test]
    fn test_auto_match_takes_top_candidate() {
        let mut store = create_store(MemoryBackend::new());
        let id = store.create(&create_filters(), None).id;
        let ranked = Matcher::with_default_weights()
            .rank(&create_filters(), &crate::services::Catalog::sample().people)
            .matches;

        let updated = store.auto_match(&id, &ranked).unwrap();
        assert_eq!(updated.matched_mentor_id.as_deref(), Some(ranked[0].person.id.as_str()));
    }

    #[test]
    fn test_auto_match_without_candidates() {
        let mut store = create_store(MemoryBackend::new());
        let id = store.create(&create_filters(), None).id;

        let err = store.auto_match(&id, &[]).unwrap_err();
        assert_eq!(err, LifecycleError::NoCandidates(id.clone()));
        assert_eq!(store.get(&id).map(|r| r.status), Some(RequestStatus::Open));
    }

    #[test]
    fn test_seed_requests_are_consistent() {
        let snapshot = RequestSnapshot::new(seed_requests());
        assert!(snapshot.validate().is_ok());
    }
}
