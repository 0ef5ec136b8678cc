use thiserror::Error;

/// Unified error type for the gold-position-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Only `Configuration` and `DataUnavailable` ever reach the screen.
/// The provider-level variants are produced by the HTTP providers and get
/// wrapped into `DataUnavailable` by the tracker facade.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Screen-level ────────────────────────────────────────────────
    #[error("Invalid launch parameters: {0}")]
    Configuration(String),

    #[error("Gold data unavailable: {0}")]
    DataUnavailable(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// `true` for errors that stop the screen before any fetch starts.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoreError::Configuration(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; keep query parameters out of
        // messages that end up on screen or in logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
