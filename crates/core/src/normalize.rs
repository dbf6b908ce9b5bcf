use crate::domain::view::{DailyChange, StockView};
use crate::error::SignalError;
use serde_json::Value;

/// Lifts a bulk envelope (`{"recommendations": [...]}`, `{"top5up": [...]}`)
/// into views. The envelope key must be present and list-shaped; items
/// without a usable ticker are skipped rather than failing the batch.
pub fn bulk_views(payload: &Value, list_key: &str) -> Result<Vec<StockView>, SignalError> {
    let items = payload
        .get(list_key)
        .and_then(Value::as_array)
        .ok_or_else(|| SignalError::MalformedResponse(format!("missing {list_key} list")))?;

    Ok(items.iter().filter_map(view_from_item).collect())
}

/// Lifts a single-lookup payload. The only hard requirement is the identity
/// field; every optional field degrades per-field instead of failing the
/// lookup.
pub fn single_view(payload: &Value) -> Result<StockView, SignalError> {
    view_from_item(payload)
        .ok_or_else(|| SignalError::MalformedResponse("missing ticker".to_string()))
}

fn view_from_item(item: &Value) -> Option<StockView> {
    let ticker = item.get("ticker")?.as_str()?.trim();
    if ticker.is_empty() {
        return None;
    }

    let signal = item
        .get("signal")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let daily_changes = item
        .get("daily_changes")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(change_from_entry).collect())
        .unwrap_or_default();

    // Wire `null` and a missing key are the same absent state. Zero is not
    // absent and passes through.
    let trend_percent = item.get("trend_percent").and_then(Value::as_f64);

    Some(StockView {
        ticker: ticker.to_string(),
        signal,
        daily_changes,
        trend_percent,
    })
}

/// Both deltas must be numeric or the whole entry is dropped; a record is
/// never kept with one field coerced.
fn change_from_entry(entry: &Value) -> Option<DailyChange> {
    let dollar_change = entry.get("dollar_change").and_then(Value::as_f64)?;
    let percent_change = entry.get("percent_change").and_then(Value::as_f64)?;

    let date = entry
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(DailyChange {
        date,
        dollar_change,
        percent_change,
    })
}
