//! Wiring: turn a [`StoreConfig`] into a ready [`GoalStore`].

use anyhow::Context;

use cue_core::{Clock, SystemClock};
use cue_goals::demo::demo_goals;

use crate::config::{StorageBackend, StoreConfig};
use crate::repository::{GoalRepository, InMemoryGoalRepository, JsonFileGoalRepository};
use crate::store::GoalStore;

/// Store over whichever repository the configuration selected.
pub type DynGoalStore<C = SystemClock> = GoalStore<Box<dyn GoalRepository>, C>;

pub fn open_store(config: &StoreConfig) -> anyhow::Result<DynGoalStore> {
    open_store_with_clock(config, SystemClock)
}

pub fn open_store_with_clock<C: Clock>(config: &StoreConfig, clock: C) -> anyhow::Result<DynGoalStore<C>> {
    let repository: Box<dyn GoalRepository> = match &config.storage {
        StorageBackend::InMemory => Box::new(InMemoryGoalRepository::new()),
        StorageBackend::JsonFile(path) => {
            tracing::info!(path = %path.display(), "using JSON goal file");
            Box::new(JsonFileGoalRepository::new(path.clone()))
        }
    };

    let now = clock.now();
    let mut store = GoalStore::open(repository, clock, config.calendar())
        .context("failed to open goal store")?
        .with_policy(config.anchor_policy);

    if config.seed_demo {
        store
            .seed_if_empty(demo_goals(now))
            .context("failed to seed demo goals")?;
    }

    Ok(store)
}
