use thiserror::Error;

/// Failure kinds the reconciliation policy dispatches on. None of these is
/// fatal: startup failures degrade into `ViewState::load_error`, search
/// failures into a generic `SearchOutcome::Failed`.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Connection failure or non-success HTTP status.
    #[error("request failed: {0}")]
    Transport(String),

    /// Payload is missing a required field or has the wrong shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A number was mandatory and the value is not one.
    #[error("non-numeric value for {field}")]
    NonNumericField { field: &'static str },
}

impl From<reqwest::Error> for SignalError {
    fn from(err: reqwest::Error) -> Self {
        SignalError::Transport(err.to_string())
    }
}
