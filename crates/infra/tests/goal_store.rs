//! End-to-end store behaviour over the JSON file repository.
//!
//! Verifies:
//! - Mutations are durable across a reopen
//! - Streak status follows the injected clock across day boundaries
//! - Configuration wiring picks the right backend and policy

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use cue_core::{FixedClock, FixedOffsetCalendar};
use cue_goals::{AnchorPolicy, GoalStatus, validate_goal_text};
use cue_infra::{
    GoalStore, JsonFileGoalRepository, StorageBackend, StoreConfig, StoreError, open_store_with_clock,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 3, 7, 45, 0).unwrap()
}

fn open(path: &std::path::Path, clock: Arc<FixedClock>) -> GoalStore<JsonFileGoalRepository, Arc<FixedClock>> {
    GoalStore::open(
        JsonFileGoalRepository::new(path),
        clock,
        Arc::new(FixedOffsetCalendar::utc()),
    )
    .unwrap()
}

#[test]
fn mutations_survive_reopen() {
    cue_observability::init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goals.json");
    let clock = Arc::new(FixedClock::new(start()));

    let (kept, dropped) = {
        let mut store = open(&path, clock.clone());
        validate_goal_text("Stretch", "Flexibility").unwrap();
        let kept = store.create("Stretch", "Flexibility").unwrap();
        let dropped = store.create("Doomscroll less", "Sleep").unwrap();

        store.mark_complete(kept.id_typed()).unwrap();
        clock.advance(Duration::days(1));
        store.mark_complete(kept.id_typed()).unwrap();
        store.edit(kept.id_typed(), "Stretch 20 minutes", "Flexibility").unwrap();
        store.delete(dropped.id_typed()).unwrap();
        (kept, dropped)
    };

    let store = open(&path, clock.clone());
    assert_eq!(store.list().len(), 1);
    assert!(store.get(dropped.id_typed()).is_none());

    let goal = store.get(kept.id_typed()).unwrap();
    assert_eq!(goal.content(), "Stretch 20 minutes");
    assert_eq!(goal.created_at(), kept.created_at());
    assert_eq!(goal.completed_dates().len(), 2);
    assert_eq!(
        store.status(kept.id_typed()).unwrap(),
        GoalStatus { completed_today: true, streak: 2 }
    );
}

#[test]
fn week_of_habit_tracking() {
    cue_observability::init();
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(FixedClock::new(start()));
    let mut store = open(&dir.path().join("goals.json"), clock.clone());
    let id = store.create("Smile at a stranger", "Kindness").unwrap().id_typed();

    // Complete on days 0..=4, with a morning re-tap that must not double count.
    for _ in 0..5 {
        store.mark_complete(id).unwrap();
        clock.advance(Duration::hours(3));
        store.mark_complete(id).unwrap();
        clock.advance(Duration::hours(21));
    }
    assert_eq!(store.get(id).unwrap().completed_dates().len(), 5);

    // Day 5 morning: not done yet, streak still counts through yesterday.
    assert_eq!(store.status(id).unwrap(), GoalStatus { completed_today: false, streak: 5 });

    store.mark_complete(id).unwrap();
    assert_eq!(store.status(id).unwrap().streak, 6);

    // Undo today's completion: back to the run ending yesterday.
    store.mark_incomplete(id).unwrap();
    assert_eq!(store.status(id).unwrap(), GoalStatus { completed_today: false, streak: 5 });

    // Skip day 5 entirely; on day 6 the streak has lapsed.
    clock.advance(Duration::days(1));
    assert_eq!(store.status(id).unwrap().streak, 0);
}

#[test]
fn deleted_goal_cannot_be_completed() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(FixedClock::new(start()));
    let mut store = open(&dir.path().join("goals.json"), clock);
    let id = store.create("Temp", "r").unwrap().id_typed();
    store.delete(id).unwrap();

    assert!(matches!(store.mark_complete(id), Err(StoreError::NotFound(e)) if e == id));
    assert!(store.list().iter().all(|g| g.id_typed() != id));
}

#[test]
fn bootstrap_wires_config() {
    cue_observability::init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("goals.json");
    let config = StoreConfig {
        storage: StorageBackend::JsonFile(path.clone()),
        utc_offset: Some(chrono::FixedOffset::east_opt(0).unwrap()),
        anchor_policy: AnchorPolicy::TodayOnly,
        seed_demo: true,
    };
    let clock = Arc::new(FixedClock::new(start()));

    let store = open_store_with_clock(&config, clock.clone()).unwrap();
    assert_eq!(store.list().len(), 3);
    assert!(path.exists());

    // The first sample goal runs through yesterday only; strict policy reads 0.
    let first = store.list()[0].id_typed();
    assert_eq!(store.status(first).unwrap().streak, 0);
    let second = store.list()[1].id_typed();
    assert_eq!(store.status(second).unwrap().streak, 7);
    drop(store);

    // Reopening does not seed a second time.
    let store = open_store_with_clock(&config, clock).unwrap();
    assert_eq!(store.list().len(), 3);
}

#[test]
fn in_memory_config_starts_empty() {
    let clock = Arc::new(FixedClock::new(start()));
    let store = open_store_with_clock(&StoreConfig::in_memory(), clock).unwrap();
    assert!(store.list().is_empty());
}
