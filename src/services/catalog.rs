use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use crate::models::{Person, Role, Subject, Timeslot};

/// Errors that can occur when loading a catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate {kind} id: {id}")]
    Duplicate { kind: &'static str, id: String },
}

/// Read-only reference data: subjects, timeslots and the candidate pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub timeslots: Vec<Timeslot>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl Catalog {
    /// Load a catalog from a `.json` or `.toml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let catalog: Catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(CatalogError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        catalog.check_unique_ids()?;

        tracing::info!(
            "Loaded catalog from {}: {} subjects, {} timeslots, {} people",
            path.display(),
            catalog.subjects.len(),
            catalog.timeslots.len(),
            catalog.people.len()
        );

        Ok(catalog)
    }

    fn check_unique_ids(&self) -> Result<(), CatalogError> {
        fn check<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(id) {
                    return Err(CatalogError::Duplicate { kind, id: id.to_string() });
                }
            }
            Ok(())
        }

        check("subject", self.subjects.iter().map(|s| s.id.as_str()))?;
        check("timeslot", self.timeslots.iter().map(|t| t.id.as_str()))?;
        check("person", self.people.iter().map(|p| p.id.as_str()))
    }

    pub fn subject_by_id(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn timeslot_by_id(&self, id: &str) -> Option<&Timeslot> {
        self.timeslots.iter().find(|t| t.id == id)
    }

    pub fn person_by_id(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Subject display name, or the raw id when the subject is unknown
    pub fn subject_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.subject_by_id(id).map_or(id, |s| s.name.as_str())
    }

    /// Timeslot label, or the raw id when the slot is unknown
    pub fn time_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.timeslot_by_id(id).map_or(id, |t| t.label.as_str())
    }

    /// Built-in demo catalog
    pub fn sample() -> Self {
        Self {
            subjects: vec![
                subject("math", "Mathematics", "∑"),
                subject("rus", "Russian language", "A"),
                subject("phys", "Physics", "⚡"),
                subject("chem", "Chemistry", "⚗"),
                subject("eng", "English", "EN"),
                subject("inf", "Computer science", "</>"),
            ],
            timeslots: vec![
                timeslot("mon-17", Weekday::Mon, "17:00", "17:30"),
                timeslot("mon-19", Weekday::Mon, "19:00", "19:30"),
                timeslot("tue-18", Weekday::Tue, "18:00", "18:30"),
                timeslot("wed-17", Weekday::Wed, "17:00", "17:30"),
                timeslot("thu-19", Weekday::Thu, "19:00", "19:30"),
                timeslot("fri-18", Weekday::Fri, "18:00", "18:30"),
                timeslot("sat-12", Weekday::Sat, "12:00", "12:30"),
                timeslot("sun-16", Weekday::Sun, "16:00", "16:30"),
            ],
            people: vec![
                Person {
                    id: "p1".to_string(),
                    name: "Egor, grade 10".to_string(),
                    city: "Vladivostok".to_string(),
                    school: "School No. 12".to_string(),
                    about: "Preparing for the advanced math and CS finals. I explain briefly and step by step.".to_string(),
                    role: Role::Mentor,
                    grade: 10,
                    subjects: ids(&["math", "inf"]),
                    available: ids(&["mon-19", "wed-17", "sat-12"]),
                    rating: 4.8,
                    reviews_count: 23,
                    points: 1240,
                    verified: true,
                },
                Person {
                    id: "p2".to_string(),
                    name: "Alina, grade 11".to_string(),
                    city: "Vladivostok".to_string(),
                    school: "Gymnasium No. 1".to_string(),
                    about: "Helping with essays and grammar rules. Can review homework and draw up a plan.".to_string(),
                    role: Role::Mentor,
                    grade: 11,
                    subjects: ids(&["rus", "eng"]),
                    available: ids(&["tue-18", "thu-19", "sun-16"]),
                    rating: 4.9,
                    reviews_count: 41,
                    points: 2030,
                    verified: true,
                },
                Person {
                    id: "p3".to_string(),
                    name: "Ivan, grade 9".to_string(),
                    city: "Vladivostok".to_string(),
                    school: "School No. 12".to_string(),
                    about: "Physics exam prep. I like motion and electricity problems.".to_string(),
                    role: Role::Mentor,
                    grade: 9,
                    subjects: ids(&["phys", "math"]),
                    available: ids(&["fri-18", "sat-12"]),
                    rating: 4.6,
                    reviews_count: 12,
                    points: 760,
                    verified: false,
                },
                Person {
                    id: "p4".to_string(),
                    name: "Sasha, grade 8".to_string(),
                    city: "Vladivostok".to_string(),
                    school: "School No. 7".to_string(),
                    about: "Struggling with fractions and word problems. Need short explanations.".to_string(),
                    role: Role::Student,
                    grade: 8,
                    subjects: ids(&["math", "rus"]),
                    available: ids(&["mon-17", "wed-17", "sun-16"]),
                    rating: 0.0,
                    reviews_count: 0,
                    points: 120,
                    verified: true,
                },
                Person {
                    id: "p5".to_string(),
                    name: "Lera, grade 7".to_string(),
                    city: "Vladivostok".to_string(),
                    school: "School No. 5".to_string(),
                    about: "Want to catch up on math and understand the basics of chemistry.".to_string(),
                    role: Role::Student,
                    grade: 7,
                    subjects: ids(&["chem", "math"]),
                    available: ids(&["tue-18", "thu-19"]),
                    rating: 0.0,
                    reviews_count: 0,
                    points: 80,
                    verified: false,
                },
            ],
        }
    }
}

fn subject(id: &str, name: &str, icon: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn timeslot(id: &str, day: Weekday, start: &str, end: &str) -> Timeslot {
    Timeslot {
        id: id.to_string(),
        day,
        start: start.to_string(),
        end: end.to_string(),
        label: format!("{} {}–{}", day, start, end),
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
