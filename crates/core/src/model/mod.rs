mod ids;
mod stats;
mod task;
mod week;

pub use ids::TaskId;

pub use stats::{ProgressStats, percent};
pub use task::{FIRST_DAY, LAST_DAY, Task, TaskDraft, TaskError};
pub use week::{DAY_LABELS, PHASE_ONE_WEEKS, WeekData, WeekError, day_label, phase_for_week};
