//! Goal persistence boundary.
//!
//! The store talks to storage only through [`GoalRepository`]; adapters decide
//! where the records live.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryGoalRepository;
pub use json_file::JsonFileGoalRepository;
pub use r#trait::{GoalRepository, RepositoryError};
