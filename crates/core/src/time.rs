use chrono::{DateTime, Duration, Utc};

use crate::curriculum::seed_start_date;
use crate::model::WeekData;

/// Where "now" comes from when deciding which day of the week is today.
///
/// Only the dashboard reads it; the reducer never looks at the time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Wall clock time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::System
    }

    /// Pinned to `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Day bucket of `week` that contains the current instant.
    #[must_use]
    pub fn today_in(&self, week: &WeekData) -> Option<u8> {
        week.day_at(self.now())
    }
}

/// Offset of the test instant from the seed week's start: day 3.
const FIXED_TEST_OFFSET_DAYS: i64 = 2;

/// Deterministic instant for tests (2026-01-03T00:00:00Z).
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    seed_start_date() + Duration::days(FIXED_TEST_OFFSET_DAYS)
}

/// A `Clock` pinned at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
