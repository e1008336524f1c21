//! `cue-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity marker, the domain error model, and the injected
//! clock/calendar collaborators.

pub mod entity;
pub mod error;
pub mod id;
pub mod time;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::GoalId;
pub use time::{Calendar, Clock, FixedClock, FixedOffsetCalendar, LocalCalendar, SystemClock};
