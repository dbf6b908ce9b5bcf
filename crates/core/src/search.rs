use crate::api::SignalApi;
use crate::domain::view::SearchOutcome;
use crate::normalize;
use crate::store::ViewStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Shown for every failure kind; the cause is logged, not surfaced.
const SEARCH_FAILED: &str = "Not found or error";

/// Single-slot lookup triggered by user submission. One search is current
/// at a time; a newer submission supersedes anything still in flight.
#[derive(Clone)]
pub struct SearchController {
    api: Arc<dyn SignalApi>,
    store: ViewStore,
    seq: Arc<AtomicU64>,
}

impl SearchController {
    pub fn new(api: Arc<dyn SignalApi>, store: ViewStore) -> Self {
        Self {
            api,
            store,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submits one lookup and returns immediately; the result arrives
    /// through the store. An empty ticker is a contract-level no-op: no
    /// request, no state write. Case-folding belongs to the input-capture
    /// boundary, not here.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, ticker: &str) {
        if ticker.is_empty() {
            return;
        }

        // Identifies this submission; a completion may only write while its
        // token is still the latest issued.
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        self.store.update(|s| {
            s.search_loading = true;
            s.search_outcome = None;
        });

        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        let seq = Arc::clone(&self.seq);
        let ticker = ticker.to_string();

        tokio::spawn(async move {
            let outcome = match api
                .fetch_ticker(&ticker)
                .await
                .and_then(|raw| normalize::single_view(&raw))
            {
                Ok(view) => SearchOutcome::Found(view),
                Err(err) => {
                    tracing::debug!(%ticker, error = %err, "search failed");
                    SearchOutcome::Failed(SEARCH_FAILED.to_string())
                }
            };

            // The staleness check runs inside the store's write lock so a
            // concurrent newer submission cannot interleave between check
            // and write. A superseded result is dropped along with its
            // loading flag: the newer submission owns both now.
            let mut applied = false;
            store.update(|s| {
                if seq.load(Ordering::SeqCst) == token {
                    s.search_outcome = Some(outcome);
                    s.search_loading = false;
                    applied = true;
                }
            });

            if !applied {
                tracing::debug!(%ticker, "discarded stale search result");
            }
        });
    }
}
