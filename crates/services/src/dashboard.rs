use chrono::{DateTime, Utc};
use serde::Serialize;

use roadmap_core::model::{FIRST_DAY, LAST_DAY, Task, WeekData, day_label};
use roadmap_core::{Clock, ProgressState};

/// One task as shown in a day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub time_estimate: String,
    pub link: Option<String>,
    pub motivational_line: Option<String>,
}

impl TaskRow {
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            completed: task.completed(),
            time_estimate: task.time_estimate().to_owned(),
            link: task.link().map(str::to_owned),
            motivational_line: task.motivational_line().map(str::to_owned),
        }
    }
}

/// Progress for one of the seven day buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayProgress {
    pub day: u8,
    pub label: &'static str,
    pub total: usize,
    pub completed: usize,
    pub percent: u32,
    pub is_today: bool,
    pub tasks: Vec<TaskRow>,
}

/// Everything the dashboard renders, computed from a state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub phase_number: u32,
    pub week_number: u32,
    pub start_date: DateTime<Utc>,
    pub hours: String,
    pub tasks: String,
    pub remaining_tasks: usize,
    pub weekly_progress: u32,
    pub overall_progress: u32,
    pub today: Option<u8>,
    pub days: Vec<DayProgress>,
    pub can_advance: bool,
}

impl DashboardView {
    #[must_use]
    pub fn from_state(state: &ProgressState, clock: Clock) -> Self {
        let week = state.current_week();
        let stats = state.stats();
        let today = clock.today_in(week);

        Self {
            phase_number: week.phase_number(),
            week_number: week.week_number(),
            start_date: week.start_date(),
            hours: format!(
                "{}/{}",
                format_hours(stats.completed_hours),
                format_hours(stats.total_hours)
            ),
            tasks: format!("{}/{}", stats.completed_tasks, stats.total_tasks),
            remaining_tasks: stats.remaining_tasks(),
            weekly_progress: stats.weekly_progress,
            overall_progress: stats.overall_progress,
            today,
            days: day_rows(week, today),
            can_advance: state.is_week_complete(),
        }
    }

    /// "Phase 1, Week 3"
    #[must_use]
    pub fn title(&self) -> String {
        format!("Phase {}, Week {}", self.phase_number, self.week_number)
    }

    #[must_use]
    pub fn day(&self, day: u8) -> Option<&DayProgress> {
        self.days.iter().find(|row| row.day == day)
    }
}

fn day_rows(week: &WeekData, today: Option<u8>) -> Vec<DayProgress> {
    (FIRST_DAY..=LAST_DAY)
        .filter_map(|day| {
            let label = day_label(day)?;
            let tasks: Vec<TaskRow> = week.tasks_for_day(day).map(TaskRow::from_task).collect();
            Some(DayProgress {
                day,
                label,
                total: tasks.len(),
                completed: tasks.iter().filter(|t| t.completed).count(),
                percent: week.day_progress(day),
                is_today: today == Some(day),
                tasks,
            })
        })
        .collect()
}

/// Hours with at most one decimal, no trailing ".0".
fn format_hours(hours: f64) -> String {
    let tenths = (hours * 10.0).round();
    if tenths % 10.0 == 0.0 {
        format!("{:.0}", tenths / 10.0)
    } else {
        format!("{:.1}", tenths / 10.0)
    }
}
