use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cue_core::{Calendar, DomainError, DomainResult, Entity, GoalId};

use crate::streak::{GoalStatus, StreakEngine};

/// A tracked personal habit with its completion history.
///
/// The mutating methods are meant to be driven by the goal store only; callers
/// outside it should treat a `Goal` as a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    content: String,
    reason: String,
    created_at: DateTime<Utc>,
    completed_dates: Vec<DateTime<Utc>>,
}

impl Goal {
    /// New goal with a fresh id and no completions.
    pub fn new(content: impl Into<String>, reason: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(GoalId::new(), content, reason, created_at)
    }

    pub fn with_id(
        id: GoalId,
        content: impl Into<String>,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            reason: reason.into(),
            created_at,
            completed_dates: Vec::new(),
        }
    }

    /// Rebuild a goal from its persisted fields.
    pub fn restore(
        id: GoalId,
        content: impl Into<String>,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
        completed_dates: Vec<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            reason: reason.into(),
            created_at,
            completed_dates,
        }
    }

    pub fn id_typed(&self) -> GoalId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_dates(&self) -> &[DateTime<Utc>] {
        &self.completed_dates
    }

    pub fn is_completed_today<C: Calendar + ?Sized>(&self, now: DateTime<Utc>, calendar: &C) -> bool {
        StreakEngine::new(calendar).is_completed_today(&self.completed_dates, now)
    }

    pub fn streak<C: Calendar + ?Sized>(&self, now: DateTime<Utc>, calendar: &C) -> u32 {
        StreakEngine::new(calendar).calculate_streak(&self.completed_dates, now)
    }

    pub fn status<C: Calendar + ?Sized>(&self, now: DateTime<Utc>, calendar: &C) -> GoalStatus {
        StreakEngine::new(calendar).status(&self.completed_dates, now)
    }

    /// Replace the text fields. Id, creation time and history are untouched.
    pub fn edit(&mut self, content: impl Into<String>, reason: impl Into<String>) {
        self.content = content.into();
        self.reason = reason.into();
    }

    /// Append `now` unless a completion already exists on that calendar day.
    ///
    /// Returns whether the history changed.
    pub fn record_completion<C: Calendar + ?Sized>(&mut self, now: DateTime<Utc>, calendar: &C) -> bool {
        if self.is_completed_today(now, calendar) {
            return false;
        }
        self.completed_dates.push(now);
        true
    }

    /// Drop every completion on the calendar day of `now`.
    ///
    /// Returns how many entries were removed.
    pub fn clear_completions_on<C: Calendar + ?Sized>(&mut self, now: DateTime<Utc>, calendar: &C) -> usize {
        let today = calendar.day_of(now);
        let before = self.completed_dates.len();
        self.completed_dates.retain(|at| calendar.day_of(*at) != today);
        before - self.completed_dates.len()
    }
}

impl Entity for Goal {
    type Id = GoalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Caller-side check for goal text. Blank content or reason must not reach the store.
pub fn validate_goal_text(content: &str, reason: &str) -> DomainResult<()> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("content cannot be empty"));
    }
    if reason.trim().is_empty() {
        return Err(DomainError::validation("reason cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use cue_core::FixedOffsetCalendar;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 7, 9, 0, 0).unwrap()
    }

    fn cal() -> FixedOffsetCalendar {
        FixedOffsetCalendar::utc()
    }

    fn test_goal() -> Goal {
        Goal::new("Stretch for 20 minutes", "Flexibility", test_time())
    }

    #[test]
    fn new_goal_starts_without_history() {
        let goal = test_goal();
        assert_eq!(goal.content(), "Stretch for 20 minutes");
        assert_eq!(goal.reason(), "Flexibility");
        assert_eq!(goal.created_at(), test_time());
        assert!(goal.completed_dates().is_empty());
        assert_eq!(goal.status(test_time(), &cal()), GoalStatus::default());
    }

    #[test]
    fn edit_keeps_identity_and_history() {
        let mut goal = test_goal();
        goal.record_completion(test_time(), &cal());
        let id = goal.id_typed();

        goal.edit("Walk the dog", "Fresh air");

        assert_eq!(goal.content(), "Walk the dog");
        assert_eq!(goal.reason(), "Fresh air");
        assert_eq!(goal.id_typed(), id);
        assert_eq!(*goal.id(), id);
        assert_eq!(goal.created_at(), test_time());
        assert_eq!(goal.completed_dates(), &[test_time()]);
    }

    #[test]
    fn record_completion_is_idempotent_per_day() {
        let mut goal = test_goal();
        assert!(goal.record_completion(test_time(), &cal()));
        assert!(!goal.record_completion(test_time() + Duration::hours(5), &cal()));
        assert_eq!(goal.completed_dates().len(), 1);

        assert!(goal.record_completion(test_time() + Duration::days(1), &cal()));
        assert_eq!(goal.completed_dates().len(), 2);
        assert_eq!(goal.streak(test_time() + Duration::days(1), &cal()), 2);
    }

    #[test]
    fn clear_removes_every_entry_of_the_day() {
        let yesterday = test_time() - Duration::days(1);
        let mut goal = Goal::restore(
            GoalId::new(),
            "Read",
            "Focus",
            yesterday,
            vec![yesterday, test_time(), test_time() + Duration::hours(1), test_time() + Duration::hours(2)],
        );

        assert_eq!(goal.clear_completions_on(test_time(), &cal()), 3);
        assert!(!goal.is_completed_today(test_time(), &cal()));
        assert_eq!(goal.completed_dates(), &[yesterday]);

        assert_eq!(goal.clear_completions_on(test_time(), &cal()), 0);
    }

    #[test]
    fn validate_rejects_blank_text() {
        assert!(validate_goal_text("Read", "Focus").is_ok());

        match validate_goal_text("   ", "Focus").unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("content")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
        match validate_goal_text("Read", "").unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("reason")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn persisted_shape_uses_snake_case_fields() {
        let goal = test_goal();
        let json = serde_json::to_value(&goal).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["completed_dates", "content", "created_at", "id", "reason"]);

        let back: Goal = serde_json::from_value(json).unwrap();
        assert_eq!(back, goal);
    }
}
