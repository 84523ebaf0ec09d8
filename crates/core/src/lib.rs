#![forbid(unsafe_code)]

pub mod curriculum;
pub mod estimate;
pub mod model;
pub mod state;
pub mod time;

pub use state::{ProgressAction, ProgressState};
pub use time::Clock;
