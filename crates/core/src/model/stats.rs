use crate::estimate::round_to_tenth;
use crate::model::week::WeekData;

/// Rounded percentage of `part` in `whole`; 0 when `whole` is not positive.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Aggregate statistics derived from a week's tasks. Never stored as truth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressStats {
    pub total_hours: f64,
    pub completed_hours: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub weekly_progress: u32,
    pub overall_progress: u32,
}

impl ProgressStats {
    /// Recompute statistics from the week's tasks.
    ///
    /// Hours are reported rounded to one decimal; both percentages are taken
    /// from the unrounded sums.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate(week: &WeekData) -> Self {
        let mut total_hours = 0.0;
        let mut completed_hours = 0.0;
        let mut completed_tasks = 0;

        for task in week.tasks() {
            let hours = task.hours();
            total_hours += hours;
            if task.completed() {
                completed_hours += hours;
                completed_tasks += 1;
            }
        }
        let total_tasks = week.tasks().len();

        Self {
            total_hours: round_to_tenth(total_hours),
            completed_hours: round_to_tenth(completed_hours),
            total_tasks,
            completed_tasks,
            weekly_progress: percent(completed_tasks as f64, total_tasks as f64),
            overall_progress: percent(completed_hours, total_hours),
        }
    }

    /// Every task of the week is done.
    #[must_use]
    pub fn is_week_complete(&self) -> bool {
        self.weekly_progress == 100
    }

    #[must_use]
    pub fn remaining_tasks(&self) -> usize {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskDraft, TaskId};
    use crate::time::fixed_now;

    fn week(entries: &[(&str, bool)]) -> WeekData {
        let tasks = entries
            .iter()
            .enumerate()
            .map(|(i, (estimate, completed))| {
                TaskDraft {
                    id: TaskId::new(format!("t{i}")),
                    title: format!("Task {i}"),
                    completed: *completed,
                    time_estimate: (*estimate).into(),
                    link: None,
                    motivational_line: None,
                    day: 1,
                }
                .validate()
                .unwrap()
            })
            .collect();
        WeekData::new(1, 1, fixed_now(), tasks).unwrap()
    }

    #[test]
    fn empty_week_reports_zero() {
        let stats = ProgressStats::calculate(&week(&[]));
        assert_eq!(stats, ProgressStats::default());
        assert!(!stats.is_week_complete());
    }

    #[test]
    fn counts_and_percentages() {
        let stats = ProgressStats::calculate(&week(&[
            ("1-2 hours", true),
            ("30-45 minutes", false),
            ("1 hour", false),
        ]));
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.remaining_tasks(), 2);
        assert_eq!(stats.weekly_progress, 33);
        assert!((stats.total_hours - 3.1).abs() < 1e-9);
        assert!((stats.completed_hours - 1.5).abs() < 1e-9);
        // 1.5 / 3.125
        assert_eq!(stats.overall_progress, 48);
    }

    #[test]
    fn unparseable_estimates_leave_overall_at_zero() {
        let stats = ProgressStats::calculate(&week(&[("Ongoing", true), ("TBD", false)]));
        assert_eq!(stats.weekly_progress, 50);
        assert_eq!(stats.overall_progress, 0);
        assert!(stats.total_hours.abs() < f64::EPSILON);
    }

    #[test]
    fn all_done_is_complete() {
        let stats = ProgressStats::calculate(&week(&[("1 hour", true), ("2 hours", true)]));
        assert_eq!(stats.weekly_progress, 100);
        assert_eq!(stats.overall_progress, 100);
        assert!(stats.is_week_complete());
    }

    #[test]
    fn percent_handles_zero_whole() {
        assert_eq!(percent(3.0, 0.0), 0);
        assert_eq!(percent(1.0, 2.0), 50);
        assert_eq!(percent(2.0, 3.0), 67);
    }
}
