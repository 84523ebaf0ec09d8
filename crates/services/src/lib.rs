#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard;
pub mod error;
pub mod progress_store;

pub use roadmap_core::Clock;

pub use app_services::AppServices;
pub use dashboard::{DashboardView, DayProgress, TaskRow};
pub use error::{AdvanceWeekError, AppServicesError};
pub use progress_store::ProgressStore;
