//! JSON shape of the persisted progress blob.
//!
//! Field names are camelCase so blobs written by earlier clients load as is.
//! There is no schema version: unknown fields are ignored, a few missing
//! cache fields default to zero, anything else that does not fit fails to
//! decode.

use chrono::{DateTime, NaiveDate, Utc};
use roadmap_core::ProgressState;
use roadmap_core::model::{ProgressStats, Task, TaskDraft, TaskId, WeekData};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// Key under which the progress blob is stored.
pub const PROGRESS_KEY: &str = "nextjs-mastery-progress";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_week: WeekRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsRecord>,
    #[serde(default)]
    pub all_weeks: Vec<WeekRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    pub week_number: u32,
    pub phase_number: u32,
    #[serde(with = "iso_date")]
    pub start_date: DateTime<Utc>,
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub completed_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub time_estimate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivational_line: Option<String>,
    pub day: u8,
}

/// Written for readers of the blob; ignored on load since stats are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub total_hours: f64,
    pub completed_hours: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub weekly_progress: u32,
    pub overall_progress: u32,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &ProgressState) -> Self {
        Self {
            current_week: WeekRecord::from_week(state.current_week()),
            stats: Some(StatsRecord::from_stats(state.stats())),
            all_weeks: state.all_weeks().iter().map(WeekRecord::from_week).collect(),
        }
    }

    /// Convert back into domain state. Task and week fields are taken
    /// verbatim; stats are recomputed from the tasks.
    #[must_use]
    pub fn into_state(self) -> ProgressState {
        ProgressState::from_parts(
            self.current_week.into_week(),
            self.all_weeks.into_iter().map(WeekRecord::into_week).collect(),
        )
    }
}

impl WeekRecord {
    #[must_use]
    pub fn from_week(week: &WeekData) -> Self {
        Self {
            week_number: week.week_number(),
            phase_number: week.phase_number(),
            start_date: week.start_date(),
            tasks: week.tasks().iter().map(TaskRecord::from_task).collect(),
            total_hours: week.total_hours(),
            completed_hours: week.completed_hours(),
        }
    }

    #[must_use]
    pub fn into_week(self) -> WeekData {
        WeekData::from_persisted(
            self.week_number,
            self.phase_number,
            self.start_date,
            self.tasks.into_iter().map(TaskRecord::into_task).collect(),
            self.total_hours,
            self.completed_hours,
        )
    }
}

impl TaskRecord {
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            title: task.title().to_owned(),
            completed: task.completed(),
            time_estimate: task.time_estimate().to_owned(),
            link: task.link().map(str::to_owned),
            motivational_line: task.motivational_line().map(str::to_owned),
            day: task.day(),
        }
    }

    #[must_use]
    pub fn into_task(self) -> Task {
        Task::from_persisted(TaskDraft {
            id: self.id,
            title: self.title,
            completed: self.completed,
            time_estimate: self.time_estimate,
            link: self.link,
            motivational_line: self.motivational_line,
            day: self.day,
        })
    }
}

impl StatsRecord {
    #[must_use]
    pub fn from_stats(stats: &ProgressStats) -> Self {
        Self {
            total_hours: stats.total_hours,
            completed_hours: stats.completed_hours,
            total_tasks: stats.total_tasks,
            completed_tasks: stats.completed_tasks,
            weekly_progress: stats.weekly_progress,
            overall_progress: stats.overall_progress,
        }
    }
}

/// Serialize state into the JSON blob.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if a value cannot be represented
/// in JSON (non-finite hours).
pub fn encode_state(state: &ProgressState) -> Result<String, StorageError> {
    serde_json::to_string(&ProgressRecord::from_state(state))
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Parse a JSON blob back into state.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the blob is not valid JSON or
/// does not have the expected shape.
pub fn decode_state(blob: &str) -> Result<ProgressState, StorageError> {
    serde_json::from_str::<ProgressRecord>(blob)
        .map(ProgressRecord::into_state)
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// RFC 3339 on write; RFC 3339 with any offset or a bare `YYYY-MM-DD` on read.
mod iso_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO date: {raw}")))
    }
}

fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::ProgressAction;
    use roadmap_core::curriculum::seed_start_date;

    #[test]
    fn round_trip_preserves_state() {
        let state = ProgressState::seed()
            .apply(ProgressAction::toggle("day1-task1"))
            .apply(ProgressAction::toggle("day3-task2"));
        let blob = encode_state(&state).unwrap();
        let restored = decode_state(&blob).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.current_week().start_date(), seed_start_date());
        assert_eq!(restored.stats().completed_tasks, 2);
    }

    #[test]
    fn blob_uses_camel_case_and_iso_dates() {
        let blob = encode_state(&ProgressState::seed()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

        assert_eq!(value["currentWeek"]["weekNumber"], 1);
        assert_eq!(value["currentWeek"]["phaseNumber"], 1);
        assert_eq!(
            value["currentWeek"]["startDate"],
            "2026-01-01T00:00:00.000Z"
        );
        assert_eq!(value["currentWeek"]["tasks"][0]["timeEstimate"], "1-2 hours");
        assert_eq!(value["stats"]["totalTasks"], 11);
        assert_eq!(value["allWeeks"], serde_json::json!([]));
        assert!(value["currentWeek"]["tasks"][2].get("link").is_none());
    }

    #[test]
    fn stale_stats_are_recomputed_on_load() {
        let blob = r#"{
            "currentWeek": {
                "weekNumber": 2,
                "phaseNumber": 1,
                "startDate": "2026-01-08T00:00:00.000Z",
                "tasks": [
                    {"id": "a", "title": "A", "completed": true, "timeEstimate": "2 hours", "day": 1},
                    {"id": "b", "title": "B", "completed": false, "timeEstimate": "2 hours", "day": 2}
                ],
                "totalHours": 4,
                "completedHours": 2
            },
            "stats": {"totalHours": 99, "completedHours": 0, "totalTasks": 9,
                      "completedTasks": 9, "weeklyProgress": 100, "overallProgress": 0},
            "allWeeks": []
        }"#;
        let state = decode_state(blob).unwrap();
        assert_eq!(state.stats().total_tasks, 2);
        assert_eq!(state.stats().completed_tasks, 1);
        assert_eq!(state.stats().weekly_progress, 50);
        assert_eq!(state.current_week().week_number(), 2);
    }

    #[test]
    fn accepts_offsets_and_bare_dates() {
        let with_offset = parse_iso_date("2026-01-01T02:00:00+02:00").unwrap();
        assert_eq!(with_offset, seed_start_date());
        let bare = parse_iso_date("2026-01-01").unwrap();
        assert_eq!(bare, seed_start_date());
        assert!(parse_iso_date("yesterday").is_none());
    }

    #[test]
    fn missing_caches_and_history_default() {
        let blob = r#"{"currentWeek": {"weekNumber": 1, "phaseNumber": 1,
            "startDate": "2026-01-01", "tasks": []}}"#;
        let state = decode_state(blob).unwrap();
        assert!(state.current_week().tasks().is_empty());
        assert!(state.all_weeks().is_empty());
        assert_eq!(state.stats().weekly_progress, 0);
    }

    #[test]
    fn invalid_payloads_fail_to_decode() {
        assert!(matches!(
            decode_state("{not json"),
            Err(StorageError::Serialization(_))
        ));
        assert!(decode_state(r#"{"currentWeek": 3}"#).is_err());
        assert!(decode_state(r#"{"currentWeek": {"weekNumber": 1, "phaseNumber": 1,
            "startDate": "soon", "tasks": []}}"#)
        .is_err());
    }

    #[test]
    fn out_of_range_day_loads_unvalidated() {
        let blob = r#"{"currentWeek": {"weekNumber": 1, "phaseNumber": 1,
            "startDate": "2026-01-01", "tasks": [
                {"id": "x", "title": "X", "completed": false, "timeEstimate": "1 hour", "day": 9}
            ]}}"#;
        let state = decode_state(blob).unwrap();
        assert_eq!(state.current_week().tasks()[0].day(), 9);
        assert!(state.current_week().validate().is_err());
    }

    #[test]
    fn toggle_on_loaded_duplicate_ids_flips_both() {
        let blob = r#"{"currentWeek": {"weekNumber": 3, "phaseNumber": 1,
            "startDate": "2026-01-15T00:00:00.000Z", "tasks": [
                {"id": "dup", "title": "A", "completed": false, "timeEstimate": "1 hour", "day": 1},
                {"id": "dup", "title": "B", "completed": false, "timeEstimate": "1 hour", "day": 2}
            ]}, "allWeeks": []}"#;
        let state = decode_state(blob).unwrap().apply(ProgressAction::toggle("dup"));

        let flags: Vec<bool> = state
            .current_week()
            .tasks()
            .iter()
            .map(|t| t.completed())
            .collect();
        assert_eq!(flags, vec![true, true]);
        assert_eq!(state.stats().completed_tasks, 2);
    }
}
