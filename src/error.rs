use thiserror::Error;

/// Failure taxonomy for the relay. Validation failures are reported to the
/// caller verbatim; upstream and verification detail is logged only, and the
/// caller receives a generic message.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("channel verification failed: {0}")]
    Verification(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the full request URL, which for Telegram calls
        // embeds the bot token. Strip it before the error reaches a log line.
        RelayError::Upstream(err.without_url().to_string())
    }
}
