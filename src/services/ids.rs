use serde::Deserialize;

/// Source of fresh request ids
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random ids, `r-<uuid>`
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        format!("r-{}", uuid::Uuid::new_v4().simple())
    }
}

/// Deterministic ids `r1`, `r2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("r", 1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Id generator selected by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl IdStrategy {
    pub fn build(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Uuid => Box::new(UuidIds),
            IdStrategy::Sequential => Box::new(SequentialIds::default()),
        }
    }
}
