//! Streak engine: pure computations over a goal's completion timestamps.
//!
//! Every computation first normalizes timestamps to calendar days through the
//! injected [`Calendar`], so the time of day at which a completion was recorded
//! never matters, and several completions on one day count once.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use cue_core::Calendar;

/// Which days may start a streak count.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Count from today if completed today, otherwise from yesterday. A streak
    /// only breaks once a whole day has been skipped.
    #[default]
    TodayOrYesterday,
    /// Count from today only; the streak reads 0 until today is completed.
    TodayOnly,
}

/// Derived, never-persisted status of a goal at a given instant.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatus {
    pub completed_today: bool,
    pub streak: u32,
}

/// Streak engine bound to a calendar and an anchor policy.
#[derive(Debug, Clone)]
pub struct StreakEngine<C> {
    calendar: C,
    policy: AnchorPolicy,
}

impl<C: Calendar> StreakEngine<C> {
    pub fn new(calendar: C) -> Self {
        Self::with_policy(calendar, AnchorPolicy::default())
    }

    pub fn with_policy(calendar: C, policy: AnchorPolicy) -> Self {
        Self { calendar, policy }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn policy(&self) -> AnchorPolicy {
        self.policy
    }

    /// True iff any completion falls on the same calendar day as `now`.
    pub fn is_completed_today(&self, completed_dates: &[DateTime<Utc>], now: DateTime<Utc>) -> bool {
        let today = self.calendar.day_of(now);
        completed_dates
            .iter()
            .any(|at| self.calendar.day_of(*at) == today)
    }

    /// Number of consecutive calendar days with a completion, counted backward
    /// from the anchor day chosen by the policy.
    pub fn calculate_streak(&self, completed_dates: &[DateTime<Utc>], now: DateTime<Utc>) -> u32 {
        let days: HashSet<NaiveDate> = completed_dates
            .iter()
            .map(|at| self.calendar.day_of(*at))
            .collect();

        let Some(anchor) = self.anchor(&days, self.calendar.day_of(now)) else {
            return 0;
        };

        let mut streak = 0;
        let mut cursor = Some(anchor);
        while let Some(day) = cursor {
            if !days.contains(&day) {
                break;
            }
            streak += 1;
            // pred_opt is None at NaiveDate::MIN; that ends the walk.
            cursor = day.pred_opt();
        }
        streak
    }

    pub fn status(&self, completed_dates: &[DateTime<Utc>], now: DateTime<Utc>) -> GoalStatus {
        GoalStatus {
            completed_today: self.is_completed_today(completed_dates, now),
            streak: self.calculate_streak(completed_dates, now),
        }
    }

    fn anchor(&self, days: &HashSet<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
        if days.contains(&today) {
            return Some(today);
        }
        match self.policy {
            AnchorPolicy::TodayOnly => None,
            AnchorPolicy::TodayOrYesterday => today.pred_opt().filter(|y| days.contains(y)),
        }
    }
}

/// [`StreakEngine::is_completed_today`] with the default policy.
pub fn is_completed_today<C: Calendar + ?Sized>(
    completed_dates: &[DateTime<Utc>],
    now: DateTime<Utc>,
    calendar: &C,
) -> bool {
    StreakEngine::new(calendar).is_completed_today(completed_dates, now)
}

/// [`StreakEngine::calculate_streak`] with the default policy.
pub fn calculate_streak<C: Calendar + ?Sized>(
    completed_dates: &[DateTime<Utc>],
    now: DateTime<Utc>,
    calendar: &C,
) -> u32 {
    StreakEngine::new(calendar).calculate_streak(completed_dates, now)
}
