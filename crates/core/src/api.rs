use crate::config::Settings;
use crate::error::SignalError;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The remote signal service, behind a trait so the orchestration and
/// search logic can be exercised against stubs.
#[async_trait::async_trait]
pub trait SignalApi: Send + Sync {
    async fn fetch_watchlist(&self) -> Result<Value, SignalError>;
    async fn fetch_top_movers(&self) -> Result<Value, SignalError>;
    async fn fetch_ticker(&self, ticker: &str) -> Result<Value, SignalError>;
}

#[derive(Debug, Clone)]
pub struct HttpSignalApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSignalApi {
    pub fn from_settings(settings: &Settings) -> Result<Self, SignalError> {
        let base_url = settings
            .api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = settings.api_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SignalError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // One attempt per call: a failed request surfaces as state, never as a
    // second request.
    async fn get_json(&self, path: &str) -> Result<Value, SignalError> {
        let url = self.url(path);
        let res = self.http.get(&url).send().await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(SignalError::Transport(format!("HTTP {status} from {url}")));
        }

        serde_json::from_str(&text).map_err(|_| {
            SignalError::MalformedResponse(format!("response from {url} is not valid JSON"))
        })
    }
}

#[async_trait::async_trait]
impl SignalApi for HttpSignalApi {
    async fn fetch_watchlist(&self) -> Result<Value, SignalError> {
        self.get_json("/recommendations").await
    }

    async fn fetch_top_movers(&self) -> Result<Value, SignalError> {
        self.get_json("/top5up").await
    }

    async fn fetch_ticker(&self, ticker: &str) -> Result<Value, SignalError> {
        self.get_json(&format!("/recommendation/{ticker}")).await
    }
}
