//! Unified error types for sbom-graph.
//!
//! Structural failures abort an operation and surface to the caller as a
//! single error. Per-entry problems (a package without an identifier, an
//! unrecognized relationship token) are absorbed by the normalizers: the
//! entry is omitted, the overall call still succeeds, and the omission is
//! logged via `tracing`.

use thiserror::Error;

/// Main error type for sbom-graph operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomGraphError {
    /// Neither dialect heuristic matched the document.
    #[error("Unrecognized SBOM format: {0}")]
    InvalidFormat(String),

    /// A recognized envelope with an absent or unusable component inventory.
    #[error("Recognized SBOM envelope but no component inventory: {0}")]
    MissingComponents(String),

    /// The input was not valid JSON.
    #[error("Malformed JSON payload: {0}")]
    MalformedPayload(String),

    /// Generator dispatch found no matching manifest ecosystem.
    #[error("No supported ecosystem manifest found: {0}")]
    UnsupportedEcosystem(String),

    /// An archive bundle was oversized, over-populated, or corrupt.
    #[error("Archive extraction failed: {0}")]
    ExtractionFailure(String),

    /// IO errors with context.
    #[error("IO error: {0}")]
    Io(String),
}

impl SbomGraphError {
    /// Create an `InvalidFormat` error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    /// Create a `MissingComponents` error.
    pub fn missing_components(message: impl Into<String>) -> Self {
        Self::MissingComponents(message.into())
    }

    /// Create an `ExtractionFailure` error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::ExtractionFailure(message.into())
    }
}

impl From<std::io::Error> for SbomGraphError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SbomGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

/// Convenient Result type for sbom-graph operations.
pub type Result<T> = std::result::Result<T, SbomGraphError>;
