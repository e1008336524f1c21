use std::sync::RwLock;

use cue_core::GoalId;
use cue_goals::Goal;

use super::r#trait::{GoalRepository, RepositoryError};

/// In-memory goal repository.
///
/// Intended for tests/dev. Records keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryGoalRepository {
    goals: RwLock<Vec<Goal>>,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `goals`, as if each had been inserted in order.
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self {
            goals: RwLock::new(goals),
        }
    }

    pub fn len(&self) -> usize {
        self.goals.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("lock poisoned".to_string())
}

impl GoalRepository for InMemoryGoalRepository {
    fn insert(&self, goal: &Goal) -> Result<(), RepositoryError> {
        let mut goals = self.goals.write().map_err(|_| poisoned())?;
        let id = goal.id_typed();
        if goals.iter().any(|g| g.id_typed() == id) {
            return Err(RepositoryError::AlreadyExists(id));
        }
        goals.push(goal.clone());
        Ok(())
    }

    fn update(&self, goal: &Goal) -> Result<(), RepositoryError> {
        let mut goals = self.goals.write().map_err(|_| poisoned())?;
        let id = goal.id_typed();
        let slot = goals
            .iter_mut()
            .find(|g| g.id_typed() == id)
            .ok_or(RepositoryError::NotFound(id))?;
        *slot = goal.clone();
        Ok(())
    }

    fn delete(&self, id: GoalId) -> Result<(), RepositoryError> {
        let mut goals = self.goals.write().map_err(|_| poisoned())?;
        let before = goals.len();
        goals.retain(|g| g.id_typed() != id);
        if goals.len() == before {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Goal>, RepositoryError> {
        let goals = self.goals.read().map_err(|_| poisoned())?;
        Ok(goals.clone())
    }
}
