use crate::{Address, AddressError};

/// Error type for the [`crate::config`] module. Captures errors related to
/// loading pair configuration from the environment or other sources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing an address from an environment variable
    #[error("failed to parse address: {0}")]
    Address(#[from] AddressError),
    /// Unknown notifier policy name
    #[error("unknown notifier policy {0:?}, expected \"admin\" or \"asset-contract\"")]
    UnknownPolicy(String),
    /// Both assets of a pair are the same
    #[error("asset A and asset B must differ, both are {0}")]
    DuplicateAsset(Address),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}
