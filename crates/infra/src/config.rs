//! Environment-driven configuration.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `CUE_STORAGE` | `json` or `memory` | `json` |
//! | `CUE_DATA_FILE` | path of the JSON goal file | `<data dir>/cue/goals.json` |
//! | `CUE_UTC_OFFSET` | fixed day-boundary offset, e.g. `+02:00` | device-local calendar |
//! | `CUE_STREAK_ANCHOR` | `today_or_yesterday` or `today_only` | `today_or_yesterday` |
//! | `CUE_SEED_DEMO` | seed sample goals into an empty store | `false` |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use chrono::FixedOffset;

use cue_core::{Calendar, FixedOffsetCalendar, LocalCalendar};
use cue_goals::AnchorPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage: StorageBackend,
    /// `None` means the device-local calendar.
    pub utc_offset: Option<FixedOffset>,
    pub anchor_policy: AnchorPolicy,
    pub seed_demo: bool,
}

impl StoreConfig {
    /// In-memory storage, local calendar, default policy. Handy for tests.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::InMemory,
            utc_offset: None,
            anchor_policy: AnchorPolicy::default(),
            seed_demo: false,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let storage = match get("CUE_STORAGE").as_deref().unwrap_or("json") {
            "memory" => StorageBackend::InMemory,
            "json" => {
                let path = match get("CUE_DATA_FILE") {
                    Some(path) => PathBuf::from(path),
                    None => default_data_file()?,
                };
                StorageBackend::JsonFile(path)
            }
            other => bail!("CUE_STORAGE must be 'json' or 'memory', got '{other}'"),
        };

        let utc_offset = get("CUE_UTC_OFFSET")
            .map(|raw| {
                raw.parse::<FixedOffset>()
                    .map_err(|e| anyhow!("invalid CUE_UTC_OFFSET '{raw}': {e}"))
            })
            .transpose()?;

        let anchor_policy = match get("CUE_STREAK_ANCHOR").as_deref() {
            None | Some("today_or_yesterday") => AnchorPolicy::TodayOrYesterday,
            Some("today_only") => AnchorPolicy::TodayOnly,
            Some(other) => bail!(
                "CUE_STREAK_ANCHOR must be 'today_or_yesterday' or 'today_only', got '{other}'"
            ),
        };

        let seed_demo = match get("CUE_SEED_DEMO").as_deref() {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => bail!("CUE_SEED_DEMO must be a boolean, got '{other}'"),
        };

        Ok(Self {
            storage,
            utc_offset,
            anchor_policy,
            seed_demo,
        })
    }

    /// Calendar implied by `utc_offset`.
    pub fn calendar(&self) -> Arc<dyn Calendar> {
        match self.utc_offset {
            Some(offset) => Arc::new(FixedOffsetCalendar::new(offset)),
            None => Arc::new(LocalCalendar),
        }
    }
}

/// `<platform data dir>/cue/goals.json`.
pub fn default_data_file() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().context("failed to determine the platform data directory")?;
    Ok(base.join("cue").join("goals.json"))
}
