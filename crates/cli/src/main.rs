use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tradepilot_core::api::{HttpSignalApi, SignalApi};
use tradepilot_core::orchestrate::FetchOrchestrator;
use tradepilot_core::search::SearchController;
use tradepilot_core::store::ViewStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "tradepilot")]
struct Args {
    /// Base URL of the signal service. Overrides SIGNAL_API_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Look up a single ticker, render the outcome, and exit.
    #[arg(long)]
    ticker: Option<String>,

    /// Disable ANSI colors in the output.
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = tradepilot_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if args.base_url.is_some() {
        settings.api_base_url = args.base_url.clone();
    }

    let api: Arc<dyn SignalApi> = match HttpSignalApi::from_settings(&settings) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            let err = anyhow::Error::new(e).context("failed to build signal client");
            sentry_anyhow::capture_anyhow(&err);
            return Err(err);
        }
    };

    let store = ViewStore::new();
    let orchestrator = FetchOrchestrator::new(Arc::clone(&api), store.clone());
    let search = SearchController::new(Arc::clone(&api), store.clone());

    let style = render::Style::new(!args.no_color);

    orchestrator.initialize().await;
    render::session(&store.snapshot(), &style);

    match args.ticker.as_deref() {
        Some(raw) => run_one_search(&search, &store, &style, raw).await,
        None => run_search_loop(&search, &store, &style).await,
    }

    Ok(())
}

async fn run_one_search(
    search: &SearchController,
    store: &ViewStore,
    style: &render::Style,
    raw: &str,
) {
    let ticker = capture_ticker(raw);
    if ticker.is_empty() {
        return;
    }

    let mut rx = store.subscribe();
    search.submit(&ticker);
    println!("Searching...");

    let state = match rx
        .wait_for(|s| !s.search_loading && s.search_outcome.is_some())
        .await
    {
        Ok(state) => state.clone(),
        Err(_) => return,
    };
    render::search_outcome(&state, style);
}

async fn run_search_loop(search: &SearchController, store: &ViewStore, style: &render::Style) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut rx = store.subscribe();

    println!();
    println!("Search stock symbol (e.g. NVDA); Ctrl-D to quit.");

    loop {
        print!("search> ");
        let _ = std::io::Write::flush(&mut std::io::stdout());

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "stdin read failed");
                break;
            }
        };

        let ticker = capture_ticker(&line);
        if ticker.is_empty() {
            continue;
        }

        search.submit(&ticker);
        println!("Searching...");

        let state = match rx
            .wait_for(|s| !s.search_loading && s.search_outcome.is_some())
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => break,
        };
        render::search_outcome(&state, style);
    }
}

/// Input-capture boundary: user text is trimmed and upper-cased before it
/// reaches the controller, which performs no normalization of its own.
fn capture_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn init_sentry(settings: &tradepilot_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::capture_ticker;

    #[test]
    fn capture_upper_cases_and_trims() {
        assert_eq!(capture_ticker("  nvda "), "NVDA");
        assert_eq!(capture_ticker("Brk-b"), "BRK-B");
    }

    #[test]
    fn capture_of_blank_input_is_empty() {
        assert_eq!(capture_ticker("   "), "");
        assert_eq!(capture_ticker(""), "");
    }
}
