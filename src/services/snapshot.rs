use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use crate::models::SessionRequest;

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur at the persistence boundary
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Serializable state of the request collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub version: u32,
    pub requests: Vec<SessionRequest>,
}

impl RequestSnapshot {
    pub fn new(requests: Vec<SessionRequest>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            requests,
        }
    }

    /// Reject snapshots that break collection invariants
    pub fn validate(&self) -> Result<(), PersistenceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::Corrupt(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }

        let mut seen = HashSet::new();
        for request in &self.requests {
            if !seen.insert(request.id.as_str()) {
                return Err(PersistenceError::Corrupt(format!("duplicate request id {}", request.id)));
            }
            if !request.is_consistent() {
                return Err(PersistenceError::Corrupt(format!(
                    "request {} is {:?} but matched mentor is {:?}",
                    request.id, request.status, request.matched_mentor_id
                )));
            }
        }

        Ok(())
    }
}

/// Load/save contract for the request collection
pub trait SnapshotBackend: Send {
    /// `Ok(None)` when no state has been saved yet
    fn load(&self) -> Result<Option<RequestSnapshot>, PersistenceError>;

    fn save(&mut self, snapshot: &RequestSnapshot) -> Result<(), PersistenceError>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// Pretty-printed JSON file on local disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<RequestSnapshot>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let snapshot: RequestSnapshot = serde_json::from_str(&content)?;
        snapshot.validate()?;

        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &RequestSnapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write then rename so a crash never leaves a half-written snapshot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(snapshot)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::trace!("Saved {} requests to {}", snapshot.requests.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-process backend; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<Mutex<Option<RequestSnapshot>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: RequestSnapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// Last saved snapshot, if any
    pub fn snapshot(&self) -> Option<RequestSnapshot> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self) -> Result<Option<RequestSnapshot>, PersistenceError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;

        match slot.as_ref() {
            Some(snapshot) => {
                snapshot.validate()?;
                Ok(Some(snapshot.clone()))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &RequestSnapshot) -> Result<(), PersistenceError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::models::{RequestStatus, SessionDuration, SessionFormat};

    fn create_request(id: &str, status: RequestStatus, mentor: Option<&str>) -> SessionRequest {
        SessionRequest {
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 2, 19, 9, 30, 0).unwrap(),
            subject_id: "math".to_string(),
            topic: "Fractions".to_string(),
            student_grade: 8,
            preferred_times: vec!["wed-17".to_string(), "sun-16".to_string()],
            format: SessionFormat::Chat,
            duration_min: SessionDuration::Thirty,
            status,
            matched_mentor_id: mentor.map(str::to_string),
        }
    }

    fn create_snapshot() -> RequestSnapshot {
        RequestSnapshot::new(vec![
            create_request("r1", RequestStatus::Open, None),
            create_request("r2", RequestStatus::Confirmed, Some("p2")),
            create_request("r3", RequestStatus::Completed, Some("p1")),
        ])
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path().join("nested").join("requests.json"));
        let snapshot = create_snapshot();

        backend.save(&snapshot).unwrap();
        let loaded = backend.load().unwrap();

        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("requests.json"));

        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_garbage_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileBackend::new(&path).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Serialization(_)));
    }

    #[test]
    fn test_invariant_violation_is_corrupt() {
        let snapshot = RequestSnapshot::new(vec![create_request("r1", RequestStatus::Confirmed, None)]);
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Corrupt(_))));

        let duplicate = RequestSnapshot::new(vec![
            create_request("r1", RequestStatus::Open, None),
            create_request("r1", RequestStatus::Open, None),
        ]);
        assert!(matches!(duplicate.validate(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(create_request("r2", RequestStatus::Confirmed, Some("p2"))).unwrap();

        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["matchedMentorId"], "p2");
        assert_eq!(json["durationMin"], 30);
        assert_eq!(json["format"], "chat");
        assert_eq!(json["preferredTimes"][1], "sun-16");

        let open = serde_json::to_value(create_request("r1", RequestStatus::Open, None)).unwrap();
        assert!(open.get("matchedMentorId").is_none());
    }

    #[test]
    fn test_memory_backend_shares_state() {
        let backend = MemoryBackend::new();
        let mut writer = backend.clone();

        writer.save(&create_snapshot()).unwrap();

        assert_eq!(backend.snapshot(), Some(create_snapshot()));
        assert_eq!(backend.load().unwrap(), Some(create_snapshot()));
    }
}
