//! Root progress state and the reducer that drives it.

use crate::curriculum::seed_week;
use crate::model::{ProgressStats, TaskId, WeekData};

/// Everything the dashboard needs, and everything that gets persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    current_week: WeekData,
    stats: ProgressStats,
    /// Reserved for finished weeks. Advancing a week does not archive into it.
    all_weeks: Vec<WeekData>,
}

/// State transitions accepted by `ProgressState::apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressAction {
    /// Flip completion of one task in the current week.
    ToggleTask { task_id: TaskId },
    /// Move to the next week. The caller checks that the week is complete.
    AdvanceWeek,
    /// Replace the whole state, used when rehydrating from storage.
    LoadProgress(Box<ProgressState>),
    /// Drop everything and start over from the seed week.
    ResetProgress,
}

impl ProgressAction {
    #[must_use]
    pub fn toggle(task_id: impl Into<TaskId>) -> Self {
        Self::ToggleTask {
            task_id: task_id.into(),
        }
    }

    #[must_use]
    pub fn load(state: ProgressState) -> Self {
        Self::LoadProgress(Box::new(state))
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToggleTask { .. } => "toggle_task",
            Self::AdvanceWeek => "advance_week",
            Self::LoadProgress(_) => "load_progress",
            Self::ResetProgress => "reset_progress",
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::seed()
    }
}

impl ProgressState {
    /// Fresh state: the seed week with nothing completed.
    #[must_use]
    pub fn seed() -> Self {
        Self::from_parts(seed_week(), Vec::new())
    }

    /// Build a state whose stats are derived from `current_week`.
    #[must_use]
    pub fn from_parts(current_week: WeekData, all_weeks: Vec<WeekData>) -> Self {
        let stats = ProgressStats::calculate(&current_week);
        Self {
            current_week,
            stats,
            all_weeks,
        }
    }

    /// Apply an action and return the resulting state.
    #[must_use]
    pub fn apply(&self, action: ProgressAction) -> ProgressState {
        match action {
            ProgressAction::ToggleTask { task_id } => {
                let mut week = self.current_week.clone();
                if !week.toggle_task(&task_id) {
                    return self.clone();
                }
                let stats = ProgressStats::calculate(&week);
                week.set_completed_hours(stats.completed_hours);
                Self {
                    current_week: week,
                    stats,
                    all_weeks: self.all_weeks.clone(),
                }
            }
            ProgressAction::AdvanceWeek => {
                let week = self.current_week.next();
                Self {
                    stats: ProgressStats::calculate(&week),
                    current_week: week,
                    all_weeks: self.all_weeks.clone(),
                }
            }
            ProgressAction::LoadProgress(state) => *state,
            ProgressAction::ResetProgress => Self::seed(),
        }
    }

    #[must_use]
    pub fn current_week(&self) -> &WeekData {
        &self.current_week
    }

    #[must_use]
    pub fn stats(&self) -> &ProgressStats {
        &self.stats
    }

    #[must_use]
    pub fn all_weeks(&self) -> &[WeekData] {
        &self.all_weeks
    }

    /// Whether the caller may advance: every task of the current week is done.
    #[must_use]
    pub fn is_week_complete(&self) -> bool {
        self.stats.is_week_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskDraft, TaskId};
    use crate::time::fixed_now;
    use chrono::Duration;

    fn completed_count(state: &ProgressState) -> usize {
        state
            .current_week()
            .tasks()
            .iter()
            .filter(|t| t.completed())
            .count()
    }

    fn assert_stats_consistent(state: &ProgressState) {
        let stats = state.stats();
        assert_eq!(*stats, ProgressStats::calculate(state.current_week()));
        assert!(stats.completed_tasks <= stats.total_tasks);
        assert!(stats.weekly_progress <= 100);
        assert!(stats.overall_progress <= 100);
    }

    #[test]
    fn seed_scenario() {
        let state = ProgressState::seed();
        assert_eq!(state.stats().total_tasks, 11);
        assert_eq!(state.stats().completed_tasks, 0);
        assert_eq!(state.stats().weekly_progress, 0);
        assert_eq!(state.current_week().phase_number(), 1);
        assert_eq!(state.current_week().week_number(), 1);
        assert!(state.all_weeks().is_empty());
    }

    #[test]
    fn toggle_updates_stats_and_week_cache() {
        let state = ProgressState::seed().apply(ProgressAction::toggle("day1-task1"));
        let task = state
            .current_week()
            .task(&TaskId::new("day1-task1"))
            .unwrap();
        assert!(task.completed());
        assert_eq!(state.stats().completed_tasks, 1);
        assert_eq!(state.stats().weekly_progress, 9);
        assert!((state.stats().completed_hours - 1.5).abs() < 1e-9);
        assert!((state.current_week().completed_hours() - 1.5).abs() < 1e-9);
        assert_stats_consistent(&state);
    }

    #[test]
    fn double_toggle_restores_flag() {
        let seed = ProgressState::seed();
        let once = seed.apply(ProgressAction::toggle("day3-task2"));
        let twice = once.apply(ProgressAction::toggle("day3-task2"));
        assert_eq!(completed_count(&once), 1);
        assert_eq!(twice, seed);
        assert_stats_consistent(&twice);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let seed = ProgressState::seed();
        let next = seed.apply(ProgressAction::toggle("no-such-task"));
        assert_eq!(next, seed);
    }

    #[test]
    fn stats_stay_consistent_across_toggles() {
        let mut state = ProgressState::seed();
        let ids: Vec<TaskId> = state
            .current_week()
            .tasks()
            .iter()
            .map(|t| t.id().clone())
            .collect();
        for (i, id) in ids.iter().enumerate() {
            state = state.apply(ProgressAction::toggle(id.clone()));
            assert_stats_consistent(&state);
            assert_eq!(state.stats().completed_tasks, i + 1);
        }
        assert!(state.is_week_complete());
        assert_eq!(state.stats().overall_progress, 100);
    }

    #[test]
    fn advance_from_week_four_enters_phase_two() {
        let week = WeekData::new(
            4,
            1,
            fixed_now(),
            vec![
                TaskDraft {
                    id: TaskId::new("w4"),
                    title: "Capstone".into(),
                    completed: true,
                    time_estimate: "2 hours".into(),
                    link: None,
                    motivational_line: None,
                    day: 1,
                }
                .validate()
                .unwrap(),
            ],
        )
        .unwrap();
        let state = ProgressState::from_parts(week, Vec::new());
        let next = state.apply(ProgressAction::AdvanceWeek);

        assert_eq!(next.current_week().week_number(), 5);
        assert_eq!(next.current_week().phase_number(), 2);
        assert_eq!(
            next.current_week().start_date(),
            fixed_now() + Duration::days(7)
        );
        assert!(next.current_week().tasks().is_empty());
        assert_eq!(next.stats().total_tasks, 0);
        assert_eq!(next.stats().weekly_progress, 0);
        assert!(next.all_weeks().is_empty());
    }

    #[test]
    fn advance_is_not_gated_by_the_reducer() {
        let state = ProgressState::seed()
            .apply(ProgressAction::AdvanceWeek)
            .apply(ProgressAction::AdvanceWeek);
        assert_eq!(state.current_week().week_number(), 3);
        assert_eq!(state.current_week().phase_number(), 1);
    }

    #[test]
    fn load_replaces_wholesale() {
        let other = ProgressState::seed()
            .apply(ProgressAction::toggle("day2-task2"))
            .apply(ProgressAction::AdvanceWeek);
        let loaded = ProgressState::seed().apply(ProgressAction::load(other.clone()));
        assert_eq!(loaded, other);
    }

    #[test]
    fn reset_restores_seed() {
        let state = ProgressState::seed()
            .apply(ProgressAction::toggle("day1-task1"))
            .apply(ProgressAction::AdvanceWeek)
            .apply(ProgressAction::ResetProgress);
        assert_eq!(state, ProgressState::seed());
    }

    #[test]
    fn toggle_flips_every_task_sharing_an_id() {
        let draft = |title: &str, day: u8| TaskDraft {
            id: TaskId::new("dup"),
            title: title.into(),
            completed: false,
            time_estimate: "1 hour".into(),
            link: None,
            motivational_line: None,
            day,
        };
        let tasks = vec![
            Task::from_persisted(draft("A", 1)),
            Task::from_persisted(draft("B", 2)),
        ];
        let week = WeekData::from_persisted(2, 1, fixed_now(), tasks, 2.0, 0.0);
        let state = ProgressState::from_parts(week, Vec::new());

        let next = state.apply(ProgressAction::toggle("dup"));
        let flags: Vec<bool> = next.current_week().tasks().iter().map(Task::completed).collect();
        assert_eq!(flags, vec![true, true]);
        assert_eq!(next.stats().completed_tasks, 2);
        assert_stats_consistent(&next);
    }

    #[test]
    fn action_kinds() {
        assert_eq!(ProgressAction::toggle("x").kind(), "toggle_task");
        assert_eq!(ProgressAction::AdvanceWeek.kind(), "advance_week");
        assert_eq!(ProgressAction::ResetProgress.kind(), "reset_progress");
    }
}
