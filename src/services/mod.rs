// Service exports
pub mod catalog;
pub mod ids;
pub mod snapshot;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use ids::{IdGenerator, IdStrategy, SequentialIds, UuidIds};
pub use snapshot::{JsonFileBackend, MemoryBackend, PersistenceError, RequestSnapshot, SnapshotBackend};
pub use store::{seed_requests, RequestStore};
