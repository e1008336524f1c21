//! Infrastructure layer: goal store service, persistence adapters, config.

pub mod bootstrap;
pub mod config;
pub mod repository;
pub mod store;

pub use bootstrap::{DynGoalStore, open_store, open_store_with_clock};
pub use config::{StorageBackend, StoreConfig};
pub use repository::{GoalRepository, InMemoryGoalRepository, JsonFileGoalRepository, RepositoryError};
pub use store::{GoalStore, StoreError};
