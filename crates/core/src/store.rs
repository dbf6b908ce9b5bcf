use crate::domain::view::ViewState;
use std::sync::Arc;
use tokio::sync::watch;

/// Single source of truth for a session. Handles are cheap to clone and all
/// address the same state. Writers keep a single-writer-per-field
/// discipline: the fetch orchestrator owns `watchlist`, `top_movers`,
/// `initial_loading` and `load_error`; the search controller owns
/// `search_outcome` and `search_loading`.
#[derive(Debug, Clone)]
pub struct ViewStore {
    tx: Arc<watch::Sender<ViewState>>,
}

impl ViewStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Applies one mutation and notifies subscribers.
    pub fn update(&self, apply: impl FnOnce(&mut ViewState)) {
        self.tx.send_modify(apply);
    }

    /// Observer contract for the rendering layer: an awaitable change
    /// stream over the whole state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    /// One-shot read of the current state.
    pub fn snapshot(&self) -> ViewState {
        self.tx.borrow().clone()
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_are_visible_to_snapshots_and_clones() {
        let store = ViewStore::new();
        let other = store.clone();

        store.update(|s| s.search_loading = true);
        assert!(other.snapshot().search_loading);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let store = ViewStore::new();
        let mut rx = store.subscribe();

        store.update(|s| s.load_error = Some("boom".to_string()));

        let state = rx
            .wait_for(|s| s.load_error.is_some())
            .await
            .unwrap()
            .clone();
        assert_eq!(state.load_error.as_deref(), Some("boom"));
    }
}
