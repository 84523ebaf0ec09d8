#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::{PROGRESS_KEY, decode_state, encode_state};
pub use repository::{InMemoryRepository, ProgressRepository, Storage, StorageError};
