pub mod api;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod orchestrate;
pub mod search;
pub mod signal;
pub mod store;

pub mod config {
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: Option<String>,
        pub api_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                api_base_url: std::env::var("SIGNAL_API_BASE_URL").ok(),
                api_timeout_secs: std::env::var("SIGNAL_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }
    }
}
