use std::collections::HashMap;

use ratatui::widgets::ListState;

use crate::domain::email::{Thread, ThreadId};

/// One settled summary, stamped with the fetch cycle that produced it.
#[derive(Debug, Clone)]
pub struct SummaryUpdate {
    pub epoch: u64,
    pub thread_id: ThreadId,
    pub text: String,
}

/// Render state for the thread list. The summary and loading maps are only
/// ever touched through `set_threads` and `apply`, so a row is always in
/// exactly one of: loading, resolved, or unknown to the current cycle.
pub struct AppState {
    pub folder_name: String,
    pub threads: Vec<Thread>,
    pub list_state: ListState,

    summaries: HashMap<ThreadId, String>,
    loading: HashMap<ThreadId, bool>,
    epoch: u64,
}

impl AppState {
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            threads: vec![],
            list_state: ListState::default(),
            summaries: HashMap::new(),
            loading: HashMap::new(),
            epoch: 0,
        }
    }

    /// Install a new thread list: every id is marked loading before any
    /// request goes out, both maps start fresh, and the epoch advances so
    /// results from older cycles can be told apart. Returns the new epoch
    /// for the fetch cycle to carry.
    pub fn set_threads(&mut self, threads: Vec<Thread>) -> u64 {
        self.loading = threads.iter().map(|t| (t.id, true)).collect();
        self.summaries = HashMap::new();
        self.threads = threads;
        self.epoch += 1;

        if self.threads.is_empty() {
            self.list_state.select(None);
        } else if self
            .list_state
            .selected()
            .is_none_or(|i| i >= self.threads.len())
        {
            self.list_state.select(Some(0));
        }

        self.epoch
    }

    /// Fold one settled result into the maps.
    ///
    /// Results from the current cycle always land. Results from an older
    /// cycle land only while their thread is still listed; for ids that were
    /// dropped from the list the update is discarded, so a defunct cycle can
    /// never re-create state for them. Loading flags are only ever cleared
    /// here, never set.
    pub fn apply(&mut self, update: SummaryUpdate) {
        if update.epoch != self.epoch && !self.contains(update.thread_id) {
            log::debug!(
                "dropping summary for thread {} from cycle {}",
                update.thread_id,
                update.epoch
            );
            return;
        }
        self.summaries.insert(update.thread_id, update.text);
        self.loading.insert(update.thread_id, false);
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_loading(&self, id: ThreadId) -> bool {
        self.loading.get(&id).copied().unwrap_or(false)
    }

    pub fn summary(&self, id: ThreadId) -> Option<&str> {
        self.summaries.get(&id).map(String::as_str)
    }

    fn contains(&self, id: ThreadId) -> bool {
        self.threads.iter().any(|t| t.id == id)
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.threads.is_empty() {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let len = self.threads.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }
}
