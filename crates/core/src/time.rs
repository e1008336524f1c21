//! Injected time collaborators.
//!
//! Domain code never reads ambient time. "Now" comes from a [`Clock`] and day
//! boundaries come from a [`Calendar`], so tests can pin both.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.write() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Day-boundary rules: maps an instant to the calendar day it falls on.
///
/// Implementations decide the time zone (and with it DST handling). Everything
/// that compares completions does so on the returned [`NaiveDate`], never below
/// day resolution.
pub trait Calendar: Send + Sync + core::fmt::Debug {
    /// Calendar day containing `instant`.
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// Whether two instants fall on the same calendar day.
    fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }
}

impl<C> Calendar for Arc<C>
where
    C: Calendar + ?Sized,
{
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).day_of(instant)
    }
}

impl<C> Calendar for &C
where
    C: Calendar + ?Sized,
{
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).day_of(instant)
    }
}

/// Device-local calendar (system time zone, DST aware).
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }
}

/// Calendar pinned to a fixed UTC offset. Deterministic; used in tests and when
/// a zone is configured explicitly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedOffsetCalendar {
    offset: FixedOffset,
}

impl FixedOffsetCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Calendar for FixedOffsetCalendar {
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}
