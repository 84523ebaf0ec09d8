use std::fmt;
use std::sync::Arc;

use storage::repository::{ProgressRepository, Storage};

use crate::Clock;
use crate::dashboard::DashboardView;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;

/// Assembles the progress store with its storage backend and clock.
///
/// This is the object a front end owns and passes down; there is no global state.
pub struct AppServices {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
    store: ProgressStore,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock).await)
    }

    /// Build services on top of an already assembled `Storage`.
    pub async fn from_storage(storage: Storage, clock: Clock) -> Self {
        let repo = Arc::clone(&storage.progress);
        let store = ProgressStore::open(Arc::clone(&repo)).await;
        Self { clock, repo, store }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore {
        &mut self.store
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        DashboardView::from_state(self.store.state(), self.clock)
    }

    /// The raw blob as currently saved, for export.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the backend cannot be read.
    pub async fn saved_blob(&self) -> Result<Option<String>, AppServicesError> {
        Ok(self.repo.get_blob(self.store.key()).await?)
    }
}

impl fmt::Debug for AppServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppServices")
            .field("clock", &self.clock)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
