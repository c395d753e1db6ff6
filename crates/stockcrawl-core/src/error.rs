use std::path::PathBuf;

use thiserror::Error;

/// Validation and configuration errors exposed by `stockcrawl-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("API key is missing; pass --api-key or set {env_var}")]
    MissingApiKey { env_var: &'static str },
    #[error("API key is still the placeholder value; replace it with a real key")]
    PlaceholderApiKey,

    #[error("field '{field}' must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error("date stamp cannot be empty")]
    EmptyDateStamp,
    #[error("date stamp contains invalid character '{ch}'")]
    DateStampInvalidChar { ch: char },
}

/// Failure while persisting one symbol's series. Local to that symbol.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush {path}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error type for operations that abort a run before it starts.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read symbol file {path}: {source}")]
    SymbolFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
