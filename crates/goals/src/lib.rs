//! Goals domain module.
//!
//! This crate contains the goal entity and the streak engine, implemented purely
//! as deterministic domain logic (no IO, no storage, no ambient clock).

pub mod demo;
pub mod goal;
pub mod streak;

pub use goal::{Goal, validate_goal_text};
pub use streak::{AnchorPolicy, GoalStatus, StreakEngine, calculate_streak, is_completed_today};
