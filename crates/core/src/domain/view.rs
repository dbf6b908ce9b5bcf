use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChange {
    pub date: String,
    pub dollar_change: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockView {
    pub ticker: String,
    pub signal: String,
    pub daily_changes: Vec<DailyChange>,
    /// `None` suppresses the trend line entirely; `Some(0.0)` still renders
    /// as "+0%". The two states are never collapsed.
    pub trend_percent: Option<f64>,
}

/// Result of one user-initiated lookup: a view or an error marker, never
/// both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found(StockView),
    Failed(String),
}

/// The reconciled state the rendering layer projects. `watchlist`,
/// `top_movers` and `initial_loading` are written once per session;
/// `search_outcome` and `search_loading` are fully replaced on every
/// search submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub watchlist: Vec<StockView>,
    pub top_movers: Vec<StockView>,
    pub search_outcome: Option<SearchOutcome>,
    pub initial_loading: bool,
    pub search_loading: bool,
    pub load_error: Option<String>,
}
