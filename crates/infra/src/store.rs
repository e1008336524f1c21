//! Goal store: the application-level owner of all goals.
//!
//! The store keeps an insertion-ordered, in-memory copy of every goal and
//! delegates durability to an injected [`GoalRepository`]. Every mutation runs
//! the same pipeline:
//!
//! ```text
//! locate goal by id
//!   ↓
//! apply the change to a copy (pure, via the goal's own methods)
//!   ↓
//! persist the copy through the repository
//!   ↓
//! commit the copy in memory
//! ```
//!
//! A repository failure therefore leaves the in-memory goal untouched. "Now" comes
//! from the injected [`Clock`]; day boundaries come from the injected [`Calendar`].
//!
//! Mutations take `&mut self`: the store is single-writer. Callers sharing one
//! across threads must serialize access themselves.

use std::sync::Arc;

use thiserror::Error;

use cue_core::{Calendar, Clock, GoalId};
use cue_goals::{AnchorPolicy, Goal, GoalStatus, StreakEngine};

use crate::repository::{GoalRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum StoreError {
    /// No goal with this id is known to the store (or to its repository).
    #[error("goal not found: {0}")]
    NotFound(GoalId),

    /// The persistence collaborator failed; nothing was committed.
    #[error("persistence failed: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for StoreError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound(id) => StoreError::NotFound(id),
            other => StoreError::Repository(other),
        }
    }
}

pub struct GoalStore<R, C> {
    repository: R,
    clock: C,
    calendar: Arc<dyn Calendar>,
    policy: AnchorPolicy,
    goals: Vec<Goal>,
}

impl<R, C> core::fmt::Debug for GoalStore<R, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GoalStore")
            .field("calendar", &self.calendar)
            .field("policy", &self.policy)
            .field("goals", &self.goals.len())
            .finish_non_exhaustive()
    }
}

impl<R, C> GoalStore<R, C>
where
    R: GoalRepository,
    C: Clock,
{
    /// Load every goal the repository holds and take ownership of them.
    pub fn open(repository: R, clock: C, calendar: Arc<dyn Calendar>) -> Result<Self, StoreError> {
        let goals = repository.list()?;
        tracing::info!(goals = goals.len(), "goal store opened");
        Ok(Self {
            repository,
            clock,
            calendar,
            policy: AnchorPolicy::default(),
            goals,
        })
    }

    /// Use `policy` for streaks reported by [`GoalStore::status`].
    pub fn with_policy(mut self, policy: AnchorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn into_parts(self) -> (R, C) {
        (self.repository, self.clock)
    }

    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// All goals, in insertion order.
    pub fn list(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id_typed() == id)
    }

    /// Create a goal with a fresh id, `created_at = now` and no completions.
    ///
    /// Callers validate the text (see [`cue_goals::validate_goal_text`]).
    pub fn create(
        &mut self,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<Goal, StoreError> {
        let goal = Goal::new(content, reason, self.clock.now());
        if let Err(err) = self.repository.insert(&goal) {
            tracing::warn!(goal_id = %goal.id_typed(), "failed to persist new goal: {err}");
            return Err(err.into());
        }
        tracing::info!(goal_id = %goal.id_typed(), "goal created");
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Replace content and reason; id, creation time and history are kept.
    pub fn edit(
        &mut self,
        id: GoalId,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<Goal, StoreError> {
        let idx = self.position(id)?;
        let mut updated = self.goals[idx].clone();
        updated.edit(content, reason);
        self.commit(idx, updated)
    }

    /// Remove a goal from the repository and the store. Irreversible.
    pub fn delete(&mut self, id: GoalId) -> Result<Goal, StoreError> {
        let idx = self.position(id)?;
        if let Err(err) = self.repository.delete(id) {
            tracing::warn!(goal_id = %id, "failed to delete goal: {err}");
            return Err(err.into());
        }
        tracing::info!(goal_id = %id, "goal deleted");
        Ok(self.goals.remove(idx))
    }

    /// Record a completion for today. No-op if today is already completed.
    pub fn mark_complete(&mut self, id: GoalId) -> Result<Goal, StoreError> {
        let idx = self.position(id)?;
        let now = self.clock.now();
        let mut updated = self.goals[idx].clone();
        if !updated.record_completion(now, &self.calendar) {
            tracing::debug!(goal_id = %id, "already completed today");
            return Ok(updated);
        }
        self.commit(idx, updated)
    }

    /// Remove every completion recorded today. No-op if there are none.
    pub fn mark_incomplete(&mut self, id: GoalId) -> Result<Goal, StoreError> {
        let idx = self.position(id)?;
        let now = self.clock.now();
        let mut updated = self.goals[idx].clone();
        if updated.clear_completions_on(now, &self.calendar) == 0 {
            tracing::debug!(goal_id = %id, "nothing completed today");
            return Ok(updated);
        }
        self.commit(idx, updated)
    }

    /// Completed-today flag and streak for a goal, computed at the clock's now.
    pub fn status(&self, id: GoalId) -> Result<GoalStatus, StoreError> {
        let goal = self.get(id).ok_or(StoreError::NotFound(id))?;
        let engine = StreakEngine::with_policy(&self.calendar, self.policy);
        Ok(engine.status(goal.completed_dates(), self.clock.now()))
    }

    /// Insert `goals` when the store is empty. Returns how many were inserted.
    pub fn seed_if_empty(&mut self, goals: Vec<Goal>) -> Result<usize, StoreError> {
        if !self.goals.is_empty() {
            return Ok(0);
        }
        let mut inserted = 0;
        for goal in goals {
            self.repository.insert(&goal)?;
            self.goals.push(goal);
            inserted += 1;
        }
        tracing::info!(goals = inserted, "seeded goal store");
        Ok(inserted)
    }

    fn position(&self, id: GoalId) -> Result<usize, StoreError> {
        self.goals
            .iter()
            .position(|g| g.id_typed() == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn commit(&mut self, idx: usize, updated: Goal) -> Result<Goal, StoreError> {
        if let Err(err) = self.repository.update(&updated) {
            tracing::warn!(goal_id = %updated.id_typed(), "failed to persist goal update: {err}");
            return Err(err.into());
        }
        self.goals[idx] = updated.clone();
        Ok(updated)
    }
}
