use thiserror::Error;

/// Unified error type for the entire trade-reports-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The aggregation itself is total; errors only come from the input
/// boundary (normalizing REST records and range selectors) and from
/// configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input boundary ──────────────────────────────────────────────
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid transaction type '{0}': expected 'buy' or 'sell'")]
    InvalidTransactionType(String),

    #[error("Invalid range kind '{0}': expected Today, Week, Month, Year or Custom")]
    InvalidRangeKind(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Record {index} rejected: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: Box<CoreError>,
    },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid reporting offset: {0} minutes (must be within ±14 hours)")]
    InvalidOffset(i32),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Wrap an error with the index of the input record that caused it.
    pub fn at_record(self, index: usize) -> Self {
        CoreError::InvalidRecord {
            index,
            source: Box::new(self),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<chrono::ParseError> for CoreError {
    fn from(e: chrono::ParseError) -> Self {
        CoreError::InvalidDate(e.to_string())
    }
}

impl From<rust_decimal::Error> for CoreError {
    fn from(e: rust_decimal::Error) -> Self {
        CoreError::InvalidAmount(e.to_string())
    }
}
