use std::path::PathBuf;

use thiserror::Error;

/// Validation errors for caller-supplied domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("invalid timeframe '{value}', expected one of 1D, 1W, 1M, 3M, 1Y, 5Y")]
    InvalidTimeframe { value: String },
}

/// Provider-side failure classification.
///
/// These never reach the HTTP caller; the orchestrator logs them and
/// substitutes sample data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("API key is not available")]
    MissingCredential,
    #[error("provider transport error: {0}")]
    Transport(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Empty response from API")]
    EmptyResponse,
    #[error("Invalid JSON response from API")]
    MalformedPayload,
    #[error("Alpha Vantage API error: {0}")]
    Logical(String),
    #[error("No data found for symbol: {symbol}")]
    NoDataForSymbol { symbol: String },
    #[error("provider payload field '{field}' is missing or invalid")]
    MissingField { field: &'static str },
}

impl ProviderError {
    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self::NoDataForSymbol {
            symbol: symbol.into(),
        }
    }

    /// Stable code used in log fields.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "provider.missing_credential",
            Self::Transport(_) => "provider.transport",
            Self::Http { .. } => "provider.http_status",
            Self::EmptyResponse => "provider.empty_response",
            Self::MalformedPayload => "provider.malformed_payload",
            Self::Logical(_) => "provider.logical_error",
            Self::NoDataForSymbol { .. } => "provider.no_data",
            Self::MissingField { .. } => "provider.missing_field",
        }
    }
}

/// Top-level error type for core operations outside the request path.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read sample data from '{path}': {source}")]
    SampleDataIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
