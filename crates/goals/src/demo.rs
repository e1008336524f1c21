//! Sample goals for previews and first-run seeding.

use chrono::{DateTime, Duration, Utc};

use cue_core::GoalId;

use crate::goal::Goal;

fn days_ago(now: DateTime<Utc>, days: &[i64]) -> Vec<DateTime<Utc>> {
    days.iter().map(|d| now - Duration::days(*d)).collect()
}

/// Three goals with histories relative to `now`: a streak running through
/// yesterday, a week-long streak including today, and a streak broken by a gap.
pub fn demo_goals(now: DateTime<Utc>) -> Vec<Goal> {
    vec![
        Goal::restore(
            GoalId::new(),
            "Stretch for at least 20 minutes a day",
            "Flexibility is good for the body, mind and soul!",
            now,
            days_ago(now, &[1, 2, 3, 4]),
        ),
        Goal::restore(
            GoalId::new(),
            "Smile at a stranger",
            "Kindness makes me feel good",
            now,
            days_ago(now, &[0, 1, 2, 3, 4, 5, 6]),
        ),
        Goal::restore(
            GoalId::new(),
            "Take the dog on a walk twice a day",
            "When we both get outside, we both feel better",
            now,
            days_ago(now, &[0, 2, 2, 3]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cue_core::FixedOffsetCalendar;

    #[test]
    fn demo_histories_produce_expected_streaks() {
        let now = Utc.with_ymd_and_hms(2026, 2, 7, 12, 0, 0).unwrap();
        let cal = FixedOffsetCalendar::utc();
        let goals = demo_goals(now);

        let summary: Vec<_> = goals
            .iter()
            .map(|g| (g.streak(now, &cal), g.is_completed_today(now, &cal)))
            .collect();
        assert_eq!(summary, vec![(4, false), (7, true), (1, true)]);
    }
}
