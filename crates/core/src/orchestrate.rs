use crate::api::SignalApi;
use crate::normalize;
use crate::store::ViewStore;
use std::sync::Arc;

const WATCHLIST_ERROR: &str = "Failed to load recommendations";
const TOP_MOVERS_ERROR: &str = "Failed to load top 5";

/// Issues the two unconditional startup requests and reconciles their
/// independently-arriving results into the store.
pub struct FetchOrchestrator {
    api: Arc<dyn SignalApi>,
    store: ViewStore,
}

impl FetchOrchestrator {
    pub fn new(api: Arc<dyn SignalApi>, store: ViewStore) -> Self {
        Self { api, store }
    }

    /// Runs once per session start. Each slot is written the moment its own
    /// request settles, whatever happened to the other; `initial_loading`
    /// clears only after BOTH have settled, so a spinner gated on it never
    /// presents partial data as ready.
    pub async fn initialize(&self) {
        self.store.update(|s| s.initial_loading = true);

        tokio::join!(self.load_watchlist(), self.load_top_movers());

        self.store.update(|s| s.initial_loading = false);
    }

    async fn load_watchlist(&self) {
        let loaded = self
            .api
            .fetch_watchlist()
            .await
            .and_then(|raw| normalize::bulk_views(&raw, "recommendations"));

        match loaded {
            Ok(views) => {
                tracing::debug!(count = views.len(), "watchlist loaded");
                self.store.update(|s| s.watchlist = views);
            }
            Err(err) => {
                tracing::warn!(error = %err, "watchlist fetch failed");
                self.store
                    .update(|s| s.load_error = Some(WATCHLIST_ERROR.to_string()));
            }
        }
    }

    async fn load_top_movers(&self) {
        let loaded = self
            .api
            .fetch_top_movers()
            .await
            .and_then(|raw| normalize::bulk_views(&raw, "top5up"));

        match loaded {
            Ok(views) => {
                tracing::debug!(count = views.len(), "top movers loaded");
                self.store.update(|s| s.top_movers = views);
            }
            Err(err) => {
                tracing::warn!(error = %err, "top movers fetch failed");
                self.store
                    .update(|s| s.load_error = Some(TOP_MOVERS_ERROR.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalError;
    use serde_json::{json, Value};
    use std::time::Duration;

    struct SplitApi;

    #[async_trait::async_trait]
    impl SignalApi for SplitApi {
        async fn fetch_watchlist(&self) -> Result<Value, SignalError> {
            Ok(json!({
                "recommendations": [
                    {"ticker": "AAPL", "signal": "likely up", "trend_percent": 1.2},
                    {"ticker": "MSFT", "signal": "likely down", "trend_percent": -0.4}
                ]
            }))
        }

        async fn fetch_top_movers(&self) -> Result<Value, SignalError> {
            Err(SignalError::Transport("connection refused".to_string()))
        }

        async fn fetch_ticker(&self, _ticker: &str) -> Result<Value, SignalError> {
            unreachable!("initialize never looks up a single ticker")
        }
    }

    #[tokio::test]
    async fn one_slot_failing_does_not_block_the_other() {
        let store = ViewStore::new();
        let orchestrator = FetchOrchestrator::new(Arc::new(SplitApi), store.clone());

        orchestrator.initialize().await;

        let state = store.snapshot();
        assert_eq!(state.watchlist.len(), 2);
        assert!(state.top_movers.is_empty());
        assert_eq!(state.load_error.as_deref(), Some(TOP_MOVERS_ERROR));
        assert!(!state.initial_loading);
    }

    struct DownApi;

    #[async_trait::async_trait]
    impl SignalApi for DownApi {
        async fn fetch_watchlist(&self) -> Result<Value, SignalError> {
            Err(SignalError::Transport("HTTP 500".to_string()))
        }

        async fn fetch_top_movers(&self) -> Result<Value, SignalError> {
            // Envelope without the expected key is as broken as no response.
            Ok(json!({"unexpected": true}))
        }

        async fn fetch_ticker(&self, _ticker: &str) -> Result<Value, SignalError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn total_failure_degrades_to_error_state() {
        let store = ViewStore::new();
        let orchestrator = FetchOrchestrator::new(Arc::new(DownApi), store.clone());

        orchestrator.initialize().await;

        let state = store.snapshot();
        assert!(state.watchlist.is_empty());
        assert!(state.top_movers.is_empty());
        assert!(state.load_error.is_some());
        assert!(!state.initial_loading);
    }

    struct StaggeredApi;

    #[async_trait::async_trait]
    impl SignalApi for StaggeredApi {
        async fn fetch_watchlist(&self) -> Result<Value, SignalError> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(json!({"recommendations": [{"ticker": "AAPL", "signal": "likely up"}]}))
        }

        async fn fetch_top_movers(&self) -> Result<Value, SignalError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(json!({"top5up": [{"ticker": "NVDA", "signal": "likely up"}]}))
        }

        async fn fetch_ticker(&self, _ticker: &str) -> Result<Value, SignalError> {
            unreachable!()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn loading_clears_only_after_both_requests_settle() {
        let store = ViewStore::new();
        let orchestrator = Arc::new(FetchOrchestrator::new(Arc::new(StaggeredApi), store.clone()));

        let mut rx = store.subscribe();
        let run = tokio::spawn({
            let orchestrator = Arc::clone(&orchestrator);
            async move { orchestrator.initialize().await }
        });

        // The faster slot lands while the slower request is still pending;
        // the aggregate flag must still be up.
        let state = rx
            .wait_for(|s| !s.watchlist.is_empty())
            .await
            .unwrap()
            .clone();
        assert!(state.initial_loading);
        assert!(state.top_movers.is_empty());

        run.await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.top_movers.len(), 1);
        assert!(!state.initial_loading);
        assert!(state.load_error.is_none());
    }
}
