use std::sync::Arc;

use thiserror::Error;

use cue_core::GoalId;
use cue_goals::Goal;

/// Goal repository operation error.
///
/// These are **infrastructure errors** (storage, encoding) as opposed to domain
/// errors (validation). The store propagates them to its caller unchanged.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("goal not found: {0}")]
    NotFound(GoalId),

    #[error("goal already exists: {0}")]
    AlreadyExists(GoalId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Durable home of goal records.
///
/// Every call must be durable when it returns `Ok`. Implementations do not retry.
pub trait GoalRepository: Send + Sync {
    /// Persist a goal that does not exist yet.
    fn insert(&self, goal: &Goal) -> Result<(), RepositoryError>;

    /// Overwrite the stored record of an existing goal.
    fn update(&self, goal: &Goal) -> Result<(), RepositoryError>;

    /// Remove a goal permanently.
    fn delete(&self, id: GoalId) -> Result<(), RepositoryError>;

    /// All stored goals, in insertion order.
    fn list(&self) -> Result<Vec<Goal>, RepositoryError>;
}

impl<R> GoalRepository for Arc<R>
where
    R: GoalRepository + ?Sized,
{
    fn insert(&self, goal: &Goal) -> Result<(), RepositoryError> {
        (**self).insert(goal)
    }

    fn update(&self, goal: &Goal) -> Result<(), RepositoryError> {
        (**self).update(goal)
    }

    fn delete(&self, id: GoalId) -> Result<(), RepositoryError> {
        (**self).delete(id)
    }

    fn list(&self) -> Result<Vec<Goal>, RepositoryError> {
        (**self).list()
    }
}

impl<R> GoalRepository for Box<R>
where
    R: GoalRepository + ?Sized,
{
    fn insert(&self, goal: &Goal) -> Result<(), RepositoryError> {
        (**self).insert(goal)
    }

    fn update(&self, goal: &Goal) -> Result<(), RepositoryError> {
        (**self).update(goal)
    }

    fn delete(&self, id: GoalId) -> Result<(), RepositoryError> {
        (**self).delete(id)
    }

    fn list(&self) -> Result<Vec<Goal>, RepositoryError> {
        (**self).list()
    }
}
