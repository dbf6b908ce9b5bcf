use tradepilot_core::domain::view::{SearchOutcome, StockView, ViewState};
use tradepilot_core::signal::{
    classify_magnitude, classify_signal, MagnitudeCategory, SignalCategory,
};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn signal_code(signal: &str) -> &'static str {
        match classify_signal(signal) {
            SignalCategory::Up => GREEN,
            SignalCategory::Down => RED,
            SignalCategory::Neutral => CYAN,
        }
    }

    fn magnitude_code(n: f64) -> &'static str {
        // NaN never leaves the normalizer; render neutrally if one does.
        match classify_magnitude(n) {
            Ok(MagnitudeCategory::Positive) => GREEN,
            Ok(MagnitudeCategory::Negative) => RED,
            Ok(MagnitudeCategory::Zero) | Err(_) => CYAN,
        }
    }
}

pub fn session(state: &ViewState, style: &Style) {
    println!("TradePilot");
    println!();

    println!("Top 5 Likely Up Stocks");
    if state.initial_loading {
        println!("  Loading...");
    } else if state.top_movers.is_empty() {
        println!("  No strong uptrends found right now. Try again later!");
    } else {
        for view in &state.top_movers {
            stock(view, style);
        }
    }

    println!();
    println!("MVP Watchlist");
    for view in &state.watchlist {
        stock(view, style);
    }

    if let Some(message) = &state.load_error {
        println!();
        println!("{}", style.paint(RED, message));
    }
}

pub fn search_outcome(state: &ViewState, style: &Style) {
    let Some(outcome) = &state.search_outcome else {
        return;
    };

    match outcome {
        SearchOutcome::Found(view) => stock(view, style),
        SearchOutcome::Failed(message) => println!("  {}", style.paint(RED, message)),
    }
}

fn stock(view: &StockView, style: &Style) {
    let code = Style::signal_code(&view.signal);
    println!(
        "  {} {}",
        style.paint(code, &view.ticker),
        style.paint(code, &view.signal)
    );

    if !view.daily_changes.is_empty() {
        println!("    {:<12} {:>9} {:>9}", "Date", "Δ $", "Δ %");
        for day in &view.daily_changes {
            let dollar = style.paint(
                Style::magnitude_code(day.dollar_change),
                &format!("{:>9}", signed(day.dollar_change)),
            );
            let percent = style.paint(
                Style::magnitude_code(day.percent_change),
                &format!("{:>8}%", signed(day.percent_change)),
            );
            println!("    {:<12} {} {}", day.date, dollar, percent);
        }
    }

    // An absent trend suppresses the line; zero still renders "+0%".
    if let Some(trend) = view.trend_percent {
        let label = format!("Est. Move Today: {}%", signed(trend));
        println!("    {}", style.paint(Style::magnitude_code(trend), &label));
    }
}

/// Sign rule from the service UI: non-negative values carry an explicit
/// plus, so zero renders "+0".
fn signed(n: f64) -> String {
    if n == 0.0 {
        "+0".to_string()
    } else if n > 0.0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_carries_an_explicit_plus() {
        assert_eq!(signed(1.5), "+1.5");
        assert_eq!(signed(-0.8), "-0.8");
        assert_eq!(signed(0.0), "+0");
        assert_eq!(signed(-0.0), "+0");
    }

    #[test]
    fn paint_is_plain_without_color() {
        let style = Style::new(false);
        assert_eq!(style.paint(GREEN, "NVDA"), "NVDA");

        let style = Style::new(true);
        assert_eq!(style.paint(GREEN, "NVDA"), "\x1b[32mNVDA\x1b[0m");
    }
}
