use std::fmt;
use std::sync::Arc;

use roadmap_core::model::TaskId;
use roadmap_core::{ProgressAction, ProgressState};
use storage::repository::{ProgressRepository, StorageError};
use storage::{PROGRESS_KEY, decode_state, encode_state};

use crate::error::AdvanceWeekError;

//
// ─── STORE ─────────────────────────────────────────────────────────────────────
//

/// Single owner of the progress state.
///
/// Every change goes through `dispatch`, which applies the reducer and then
/// writes the new state to the repository. Storage failures never reach the
/// caller: they are logged and the in-memory state stays authoritative.
pub struct ProgressStore {
    repo: Arc<dyn ProgressRepository>,
    key: String,
    state: ProgressState,
}

impl ProgressStore {
    /// Open the store under the default key, rehydrating from `repo`.
    pub async fn open(repo: Arc<dyn ProgressRepository>) -> Self {
        Self::open_with_key(repo, PROGRESS_KEY).await
    }

    /// Open the store under `key`.
    ///
    /// A stored blob that decodes is loaded as is, even if it breaks week
    /// invariants (those are only logged). A missing, unreadable or corrupt
    /// blob is replaced by the seed state.
    pub async fn open_with_key(repo: Arc<dyn ProgressRepository>, key: impl Into<String>) -> Self {
        let mut store = Self {
            repo,
            key: key.into(),
            state: ProgressState::seed(),
        };

        match store.load_saved().await {
            Some(saved) => {
                store.state = store.state.apply(ProgressAction::load(saved));
            }
            None => store.persist().await,
        }
        store
    }

    async fn load_saved(&self) -> Option<ProgressState> {
        let blob = match self.repo.get_blob(&self.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::debug!("no saved progress under {}", self.key);
                return None;
            }
            Err(err) => {
                log::error!("failed to read saved progress: {err}");
                return None;
            }
        };

        match decode_state(&blob) {
            Ok(state) => {
                if let Err(err) = state.current_week().validate() {
                    log::warn!("saved progress breaks week invariants, loading anyway: {err}");
                }
                Some(state)
            }
            Err(err) => {
                log::warn!("discarding corrupt saved progress: {err}");
                None
            }
        }
    }

    /// Current state. Consumers read it and send actions; they never mutate it.
    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Apply `action` and persist the result if anything changed.
    pub async fn dispatch(&mut self, action: ProgressAction) -> &ProgressState {
        let kind = action.kind();
        let next = self.state.apply(action);
        if next == self.state {
            log::debug!("{kind}: no change");
            return &self.state;
        }

        self.state = next;
        log::debug!(
            "{kind}: week {} now {}/{} tasks",
            self.state.current_week().week_number(),
            self.state.stats().completed_tasks,
            self.state.stats().total_tasks
        );
        self.persist().await;
        &self.state
    }

    pub async fn toggle(&mut self, task_id: TaskId) -> &ProgressState {
        self.dispatch(ProgressAction::ToggleTask { task_id }).await
    }

    pub async fn reset(&mut self) -> &ProgressState {
        self.dispatch(ProgressAction::ResetProgress).await
    }

    /// Advance only when every task of the current week is done.
    ///
    /// `dispatch(ProgressAction::AdvanceWeek)` itself is not gated; this is
    /// the check callers are expected to make first.
    ///
    /// # Errors
    ///
    /// Returns `AdvanceWeekError::WeekIncomplete` without touching the state
    /// if the week is not finished.
    pub async fn advance_if_complete(&mut self) -> Result<&ProgressState, AdvanceWeekError> {
        if !self.state.is_week_complete() {
            let stats = self.state.stats();
            return Err(AdvanceWeekError::WeekIncomplete {
                completed: stats.completed_tasks,
                total: stats.total_tasks,
            });
        }
        Ok(self.dispatch(ProgressAction::AdvanceWeek).await)
    }

    /// Delete the saved record and start over from the seed, without writing.
    ///
    /// The next dispatch writes a fresh record.
    pub async fn clear(&mut self) -> &ProgressState {
        match self.repo.delete_blob(&self.key).await {
            Ok(()) | Err(StorageError::NotFound) => {}
            Err(err) => log::error!("failed to clear saved progress: {err}"),
        }
        self.state = ProgressState::seed();
        &self.state
    }

    async fn persist(&self) {
        let blob = match encode_state(&self.state) {
            Ok(blob) => blob,
            Err(err) => {
                log::error!("failed to encode progress: {err}");
                return;
            }
        };
        if let Err(err) = self.repo.put_blob(&self.key, &blob).await {
            log::error!("failed to save progress: {err}");
        }
    }
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressStore")
            .field("key", &self.key)
            .field("week", &self.state.current_week().week_number())
            .field("stats", self.state.stats())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
