//! Single-file JSON goal repository.
//!
//! The file holds a JSON array of goal records in insertion order. Each write
//! replaces the whole file via a sibling temp file + rename, so a crash leaves
//! either the old or the new contents, never a torn file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cue_core::GoalId;
use cue_goals::Goal;

use super::r#trait::{GoalRepository, RepositoryError};

#[derive(Debug)]
pub struct JsonFileGoalRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileGoalRepository {
    /// Repository backed by `path`. The file is created on first write; a
    /// missing file reads as an empty list.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Goal>, RepositoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, goals: &[Goal]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(goals)?;
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), goals = goals.len(), "goal file written");
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut Vec<Goal>) -> Result<(), RepositoryError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;
        let mut goals = self.load()?;
        f(&mut goals)?;
        self.save(&goals)
    }
}

impl GoalRepository for JsonFileGoalRepository {
    fn insert(&self, goal: &Goal) -> Result<(), RepositoryError> {
        self.modify(|goals| {
            let id = goal.id_typed();
            if goals.iter().any(|g| g.id_typed() == id) {
                return Err(RepositoryError::AlreadyExists(id));
            }
            goals.push(goal.clone());
            Ok(())
        })
    }

    fn update(&self, goal: &Goal) -> Result<(), RepositoryError> {
        self.modify(|goals| {
            let id = goal.id_typed();
            let slot = goals
                .iter_mut()
                .find(|g| g.id_typed() == id)
                .ok_or(RepositoryError::NotFound(id))?;
            *slot = goal.clone();
            Ok(())
        })
    }

    fn delete(&self, id: GoalId) -> Result<(), RepositoryError> {
        self.modify(|goals| {
            let before = goals.len();
            goals.retain(|g| g.id_typed() != id);
            if goals.len() == before {
                return Err(RepositoryError::NotFound(id));
            }
            Ok(())
        })
    }

    fn list(&self) -> Result<Vec<Goal>, RepositoryError> {
        self.load()
    }
}
