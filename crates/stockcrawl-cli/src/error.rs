use stockcrawl_core::CoreError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(CoreError::Validation(_)) => 2,
            Self::Core(CoreError::SymbolFile { .. }) => 10,
            Self::Serialization(_) => 4,
        }
    }
}
