use thiserror::Error;
use url::Url;

use crate::model::ids::TaskId;

/// First and last day bucket of a week.
pub const FIRST_DAY: u8 = 1;
pub const LAST_DAY: u8 = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskError {
    #[error("task id cannot be empty")]
    EmptyId,

    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("task day must be between 1 and 7, got {0}")]
    InvalidDay(u8),

    #[error("task link is not a valid URL: {0}")]
    InvalidLink(String),
}

/// Unvalidated task fields, as authored in the curriculum or read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub time_estimate: String,
    pub link: Option<String>,
    pub motivational_line: Option<String>,
    pub day: u8,
}

impl TaskDraft {
    /// Validate the draft into a `Task`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError` if the id or title is blank, the day is outside
    /// 1..=7, or the link is not an absolute URL.
    pub fn validate(self) -> Result<Task, TaskError> {
        let task = Task::from_persisted(self);
        task.validate()?;
        Ok(task)
    }
}

/// A single completable unit of curriculum work.
///
/// Everything except `completed` is fixed once the task exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    title: String,
    completed: bool,
    time_estimate: String,
    link: Option<String>,
    motivational_line: Option<String>,
    day: u8,
}

impl Task {
    /// Rehydrate a task without checking invariants.
    #[must_use]
    pub fn from_persisted(draft: TaskDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            completed: draft.completed,
            time_estimate: draft.time_estimate,
            link: draft.link,
            motivational_line: draft.motivational_line,
            day: draft.day,
        }
    }

    /// Check the task invariants.
    ///
    /// # Errors
    ///
    /// Returns the first `TaskError` found.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TaskError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if !(FIRST_DAY..=LAST_DAY).contains(&self.day) {
            return Err(TaskError::InvalidDay(self.day));
        }
        if let Some(link) = self.link.as_ref() {
            if Url::parse(link).is_err() {
                return Err(TaskError::InvalidLink(link.clone()));
            }
        }
        Ok(())
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn time_estimate(&self) -> &str {
        &self.time_estimate
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    #[must_use]
    pub fn motivational_line(&self) -> Option<&str> {
        self.motivational_line.as_deref()
    }

    #[must_use]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Parsed hours for this task's estimate.
    #[must_use]
    pub fn hours(&self) -> f64 {
        crate::estimate::parse_time_estimate(&self.time_estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TaskDraft {
        TaskDraft {
            id: TaskId::new("day1-task1"),
            title: "Install the toolchain".into(),
            completed: false,
            time_estimate: "1-2 hours".into(),
            link: Some("https://nextjs.org/learn".into()),
            motivational_line: None,
            day: 1,
        }
    }

    #[test]
    fn draft_validates() {
        let task = draft().validate().unwrap();
        assert_eq!(task.id(), &TaskId::new("day1-task1"));
        assert_eq!(task.link(), Some("https://nextjs.org/learn"));
        assert!((task.hours() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_day() {
        let mut d = draft();
        d.day = 0;
        assert_eq!(d.clone().validate().unwrap_err(), TaskError::InvalidDay(0));
        d.day = 8;
        assert_eq!(d.validate().unwrap_err(), TaskError::InvalidDay(8));
    }

    #[test]
    fn rejects_blank_title_and_bad_link() {
        let mut d = draft();
        d.title = "   ".into();
        assert_eq!(d.validate().unwrap_err(), TaskError::EmptyTitle);

        let mut d = draft();
        d.link = Some("not a url".into());
        assert!(matches!(d.validate(), Err(TaskError::InvalidLink(_))));
    }

    #[test]
    fn from_persisted_skips_checks() {
        let mut d = draft();
        d.day = 42;
        let task = Task::from_persisted(d);
        assert_eq!(task.day(), 42);
        assert_eq!(task.validate(), Err(TaskError::InvalidDay(42)));
    }

    #[test]
    fn toggle_flips_completion() {
        let mut task = draft().validate().unwrap();
        task.toggle();
        assert!(task.completed());
        task.toggle();
        assert!(!task.completed());
    }
}
