//! Ingestion boundary: size ceilings and bundle screening.
//!
//! Input bounding happens here, before any document reaches the
//! normalizers or the merge engine. The ceilings match the limits the
//! surrounding upload service enforces, so a document that passes this
//! module is safe to parse in full.

use crate::error::{Result, SbomGraphError};

/// Largest single SBOM document accepted, in bytes (10 MB).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Largest request body accepted, in bytes (100 MB).
pub const MAX_REQUEST_BYTES: u64 = 100 * 1024 * 1024;

/// Largest extracted bundle accepted, in bytes (100 MB).
pub const MAX_BUNDLE_BYTES: u64 = 100 * 1024 * 1024;

/// Most files allowed in one bundle.
pub const MAX_BUNDLE_FILES: usize = 10_000;

/// Largest single file inside a bundle, in bytes (10 MB).
pub const MAX_BUNDLE_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Directories never descended into when walking a bundle.
const SKIPPED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "target",
    "vendor",
    "dist",
    "build",
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".venv",
    "venv",
];

/// Reject a single document larger than the per-document ceiling.
pub fn check_document_size(bytes: u64) -> Result<()> {
    if bytes > MAX_DOCUMENT_BYTES {
        return Err(SbomGraphError::extraction(format!(
            "document is {bytes} bytes, exceeding the {MAX_DOCUMENT_BYTES} byte ceiling"
        )));
    }
    Ok(())
}

/// Reject a request body larger than the request ceiling.
pub fn check_request_size(bytes: u64) -> Result<()> {
    if bytes > MAX_REQUEST_BYTES {
        return Err(SbomGraphError::extraction(format!(
            "request body is {bytes} bytes, exceeding the {MAX_REQUEST_BYTES} byte ceiling"
        )));
    }
    Ok(())
}

/// Screen a bundle's declared shape before extraction.
///
/// A bundle that is over-populated or oversized fails as a whole; the
/// caller never gets a partially extracted file map.
pub fn check_bundle(file_count: usize, total_bytes: u64, largest_file_bytes: u64) -> Result<()> {
    if file_count > MAX_BUNDLE_FILES {
        return Err(SbomGraphError::extraction(format!(
            "bundle contains {file_count} files, exceeding the {MAX_BUNDLE_FILES} file ceiling"
        )));
    }
    if total_bytes > MAX_BUNDLE_BYTES {
        return Err(SbomGraphError::extraction(format!(
            "bundle expands to {total_bytes} bytes, exceeding the {MAX_BUNDLE_BYTES} byte ceiling"
        )));
    }
    if largest_file_bytes > MAX_BUNDLE_FILE_BYTES {
        return Err(SbomGraphError::extraction(format!(
            "bundle member is {largest_file_bytes} bytes, exceeding the {MAX_BUNDLE_FILE_BYTES} byte ceiling"
        )));
    }
    Ok(())
}

/// Whether a relative bundle path should be considered for manifests.
///
/// Paths under dependency caches, build output, or VCS metadata are
/// skipped before generator detection runs.
#[must_use]
pub fn is_candidate_path(path: &str) -> bool {
    !path
        .split('/')
        .any(|segment| SKIPPED_DIRECTORIES.contains(&segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_size_ceiling() {
        assert!(check_document_size(MAX_DOCUMENT_BYTES).is_ok());
        let err = check_document_size(MAX_DOCUMENT_BYTES + 1).unwrap_err();
        assert!(matches!(err, SbomGraphError::ExtractionFailure(_)));
    }

    #[test]
    fn test_request_size_ceiling() {
        assert!(check_request_size(0).is_ok());
        assert!(check_request_size(MAX_REQUEST_BYTES).is_ok());
        assert!(check_request_size(MAX_REQUEST_BYTES + 1).is_err());
    }

    #[test]
    fn test_bundle_screening() {
        assert!(check_bundle(100, 1024, 512).is_ok());
        assert!(check_bundle(MAX_BUNDLE_FILES + 1, 1024, 512).is_err());
        assert!(check_bundle(100, MAX_BUNDLE_BYTES + 1, 512).is_err());
        assert!(check_bundle(100, 1024, MAX_BUNDLE_FILE_BYTES + 1).is_err());
    }

    #[test]
    fn test_candidate_path_predicate() {
        assert!(is_candidate_path("package.json"));
        assert!(is_candidate_path("services/api/go.mod"));
        assert!(!is_candidate_path("node_modules/react/package.json"));
        assert!(!is_candidate_path("backend/target/debug/Cargo.toml"));
        assert!(!is_candidate_path(".git/config"));
        // Only whole path segments are matched, not substrings.
        assert!(is_candidate_path("my-target/pom.xml"));
    }
}
