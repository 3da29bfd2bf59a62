//! Error types for the Fabula toolkit.
//!
//! This crate provides the foundation error types used throughout the Fabula workspace.

mod config;
mod io;
mod json;
mod scenario;

pub use config::ConfigError;
pub use io::IoError;
pub use json::JsonError;
pub use scenario::{MAX_LISTED_REFERENCES, ScenarioError, ScenarioErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum FabulaErrorKind {
    /// Scenario validation error
    #[display("{_0}")]
    Scenario(ScenarioError),
    /// Configuration error
    #[display("{_0}")]
    Config(ConfigError),
    /// File I/O error
    #[display("{_0}")]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[display("{_0}")]
    Json(JsonError),
}

/// Fabula error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

impl std::error::Error for FabulaError {}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
