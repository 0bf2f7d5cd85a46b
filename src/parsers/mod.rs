//! SBOM format normalizers.
//!
//! This module detects the dialect of a raw JSON document and converts it
//! to the canonical component list. Data flows one way: raw document ->
//! detection -> dialect normalizer -> canonical components. Each call
//! builds structures local to that call; there is no shared state.

mod cyclonedx;
mod detection;
mod spdx;

pub use cyclonedx::CycloneDxNormalizer;
pub use detection::{detect_str, detect_value, DocumentKind};
pub use spdx::{
    relationship_rule, RelationshipRule, SpdxNormalizer, PLACEHOLDER_DESCRIPTION,
    RELATIONSHIP_RULES,
};

use crate::error::{Result, SbomGraphError};
use crate::ingest::check_document_size;
use crate::model::CanonicalComponent;
use serde_json::Value;
use std::path::Path;

/// Normalize an SBOM document from raw text.
///
/// Detects the dialect, routes to the matching normalizer, and returns
/// the canonical component list. Structural failures (bad JSON, missing
/// component inventory, unrecognized format) abort; per-entry problems
/// are absorbed and logged.
pub fn normalize_sbom_str(content: &str) -> Result<Vec<CanonicalComponent>> {
    let value: Value = serde_json::from_str(content)?;
    normalize_sbom_value(value)
}

/// Normalize an already-parsed SBOM document.
pub fn normalize_sbom_value(value: Value) -> Result<Vec<CanonicalComponent>> {
    match detect_value(&value)? {
        DocumentKind::CycloneDx => CycloneDxNormalizer::new().normalize(value),
        DocumentKind::Spdx => SpdxNormalizer::new().normalize(value),
    }
}

/// Normalize an SBOM document from a file.
///
/// Enforces the per-document size ceiling before reading, mirroring the
/// ingestion boundary of the surrounding service.
pub fn normalize_sbom(path: &Path) -> Result<Vec<CanonicalComponent>> {
    let metadata = std::fs::metadata(path).map_err(|e| SbomGraphError::Io(e.to_string()))?;
    check_document_size(metadata.len())?;
    let content = std::fs::read_to_string(path).map_err(|e| SbomGraphError::Io(e.to_string()))?;
    normalize_sbom_str(&content)
}
