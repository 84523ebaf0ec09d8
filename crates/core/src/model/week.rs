use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::ids::TaskId;
use crate::model::stats::{ProgressStats, percent};
use crate::model::task::{FIRST_DAY, LAST_DAY, Task, TaskError};

/// Short labels for the seven day buckets, Monday first.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Weeks that belong to phase 1; every later week is phase 2.
pub const PHASE_ONE_WEEKS: u32 = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WeekError {
    #[error("week number must be >= 1")]
    InvalidWeekNumber,

    #[error("phase number must be >= 1")]
    InvalidPhaseNumber,

    #[error("duplicate task id in week: {0}")]
    DuplicateTaskId(TaskId),

    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Phase a week belongs to under the fixed four-weeks-then-phase-two rule.
#[must_use]
pub fn phase_for_week(week_number: u32) -> u32 {
    if week_number <= PHASE_ONE_WEEKS { 1 } else { 2 }
}

/// Label for a 1-based day bucket, if it is in range.
#[must_use]
pub fn day_label(day: u8) -> Option<&'static str> {
    DAY_LABELS.get(usize::from(day.checked_sub(1)?)).copied()
}

//
// ─── WEEK ──────────────────────────────────────────────────────────────────────
//

/// One curriculum week and its tasks.
///
/// `total_hours` and `completed_hours` are caches of values derivable from
/// `tasks`; `ProgressStats::calculate` is the authority.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekData {
    week_number: u32,
    phase_number: u32,
    start_date: DateTime<Utc>,
    tasks: Vec<Task>,
    total_hours: f64,
    completed_hours: f64,
}

impl WeekData {
    /// Creates a validated week and fills the hour caches.
    ///
    /// # Errors
    ///
    /// Returns `WeekError` if a number is zero, a task is invalid, or two
    /// tasks share an id.
    pub fn new(
        week_number: u32,
        phase_number: u32,
        start_date: DateTime<Utc>,
        tasks: Vec<Task>,
    ) -> Result<Self, WeekError> {
        let mut week = Self::from_persisted(week_number, phase_number, start_date, tasks, 0.0, 0.0);
        week.validate()?;
        week.refresh_hours();
        Ok(week)
    }

    /// Rehydrate a week without checking invariants; caches are taken as given.
    #[must_use]
    pub fn from_persisted(
        week_number: u32,
        phase_number: u32,
        start_date: DateTime<Utc>,
        tasks: Vec<Task>,
        total_hours: f64,
        completed_hours: f64,
    ) -> Self {
        Self {
            week_number,
            phase_number,
            start_date,
            tasks,
            total_hours,
            completed_hours,
        }
    }

    /// Check the week invariants.
    ///
    /// # Errors
    ///
    /// Returns the first `WeekError` found.
    pub fn validate(&self) -> Result<(), WeekError> {
        if self.week_number == 0 {
            return Err(WeekError::InvalidWeekNumber);
        }
        if self.phase_number == 0 {
            return Err(WeekError::InvalidPhaseNumber);
        }
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            task.validate()?;
            if !seen.insert(task.id()) {
                return Err(WeekError::DuplicateTaskId(task.id().clone()));
            }
        }
        Ok(())
    }

    /// The week that follows this one: no tasks, next number, start + 7 days.
    #[must_use]
    pub fn next(&self) -> Self {
        let week_number = self.week_number.saturating_add(1);
        Self::from_persisted(
            week_number,
            phase_for_week(week_number),
            self.start_date + Duration::days(7),
            Vec::new(),
            0.0,
            0.0,
        )
    }

    /// Flip every task with the given id. Returns false if none matched.
    ///
    /// Ids are unique in a valid week, but a loaded week may repeat one.
    pub(crate) fn toggle_task(&mut self, id: &TaskId) -> bool {
        let mut matched = false;
        for task in self.tasks.iter_mut().filter(|task| task.id() == id) {
            task.toggle();
            matched = true;
        }
        matched
    }

    pub(crate) fn set_completed_hours(&mut self, hours: f64) {
        self.completed_hours = hours;
    }

    pub(crate) fn refresh_hours(&mut self) {
        let stats = ProgressStats::calculate(self);
        self.total_hours = stats.total_hours;
        self.completed_hours = stats.completed_hours;
    }

    // Accessors
    #[must_use]
    pub fn week_number(&self) -> u32 {
        self.week_number
    }

    #[must_use]
    pub fn phase_number(&self) -> u32 {
        self.phase_number
    }

    #[must_use]
    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    #[must_use]
    pub fn completed_hours(&self) -> f64 {
        self.completed_hours
    }

    //
    // ─── DAY BUCKETS ───────────────────────────────────────────────────────────
    //

    /// Tasks scheduled for a day, in display order.
    pub fn tasks_for_day(&self, day: u8) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.day() == day)
    }

    /// Rounded percentage of a day's tasks that are completed; 0 for an empty day.
    #[must_use]
    pub fn day_progress(&self, day: u8) -> u32 {
        let (total, completed) = self
            .tasks_for_day(day)
            .fold((0_usize, 0_usize), |(total, done), task| {
                (total + 1, done + usize::from(task.completed()))
            });
        percent(completed as f64, total as f64)
    }

    /// The 1-based day bucket `now` falls into, or `None` outside this week.
    #[must_use]
    pub fn day_at(&self, now: DateTime<Utc>) -> Option<u8> {
        if now < self.start_date {
            return None;
        }
        let elapsed = (now - self.start_date).num_days();
        let day = u8::try_from(elapsed.checked_add(1)?).ok()?;
        (FIRST_DAY..=LAST_DAY).contains(&day).then_some(day)
    }
}
