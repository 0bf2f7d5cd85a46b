//! Centralized format detection for SBOM documents.
//!
//! Classifies a parsed JSON value as CycloneDX or SPDX, or fails. The
//! rules are deliberately loose: real-world emitters disagree on optional
//! fields, so detection keys on the envelope markers only.
//!
//! A recognized envelope with no usable component inventory is a distinct
//! failure (`MissingComponents`) so callers can tell "wrong format" from
//! "right format, empty document".

use crate::error::{Result, SbomGraphError};
use serde_json::Value;

/// Dialect identified during detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    CycloneDx,
    Spdx,
}

impl DocumentKind {
    /// Get the human-readable name for this dialect.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CycloneDx => "CycloneDX",
            Self::Spdx => "SPDX",
        }
    }
}

/// Detect the dialect of a parsed JSON document.
///
/// - CycloneDX: has a `bomFormat` key; `components` must then be a
///   non-empty array or the document is rejected with `MissingComponents`.
/// - SPDX: has a string `spdxVersion` starting with `SPDX-`
///   (case-insensitive); `packages` must then be an array holding at
///   least one object with a non-empty `SPDXID` (any case variant).
/// - Anything else: `InvalidFormat`.
pub fn detect_value(value: &Value) -> Result<DocumentKind> {
    let Some(obj) = value.as_object() else {
        return Err(SbomGraphError::invalid_format("document is not a JSON object"));
    };

    if obj.contains_key("bomFormat") {
        return match obj.get("components").and_then(Value::as_array) {
            Some(components) if !components.is_empty() => {
                tracing::debug!(components = components.len(), "detected CycloneDX document");
                Ok(DocumentKind::CycloneDx)
            }
            Some(_) => Err(SbomGraphError::missing_components(
                "CycloneDX document has an empty components array",
            )),
            None => Err(SbomGraphError::missing_components(
                "CycloneDX document has no components array",
            )),
        };
    }

    let spdx_version = obj.get("spdxVersion").and_then(Value::as_str);
    if spdx_version.is_some_and(|v| v.to_uppercase().starts_with("SPDX-")) {
        return match obj.get("packages").and_then(Value::as_array) {
            Some(packages) if packages.iter().any(has_spdx_id) => {
                tracing::debug!(packages = packages.len(), "detected SPDX document");
                Ok(DocumentKind::Spdx)
            }
            Some(_) => Err(SbomGraphError::missing_components(
                "SPDX document has no identifiable packages",
            )),
            None => Err(SbomGraphError::missing_components(
                "SPDX document has no packages array",
            )),
        };
    }

    Err(SbomGraphError::invalid_format(
        "expected CycloneDX or SPDX markers",
    ))
}

/// Detect the dialect from raw document text.
///
/// Invalid JSON fails with `MalformedPayload` before any dialect check.
pub fn detect_str(content: &str) -> Result<DocumentKind> {
    let value: Value = serde_json::from_str(content)?;
    detect_value(&value)
}

/// Whether a package value carries a non-empty SPDX identifier under any
/// case variant of the key.
fn has_spdx_id(package: &Value) -> bool {
    package.as_object().is_some_and(|obj| {
        obj.iter().any(|(key, value)| {
            key.eq_ignore_ascii_case("spdxid")
                && value.as_str().is_some_and(|id| !id.is_empty())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_cyclonedx() {
        let doc = json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.4",
            "components": [{"name": "react"}]
        });
        assert_eq!(detect_value(&doc).unwrap(), DocumentKind::CycloneDx);
    }

    #[test]
    fn test_cyclonedx_without_components_is_missing_components() {
        let doc = json!({"bomFormat": "CycloneDX", "specVersion": "1.4"});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::MissingComponents(_))
        ));

        let doc = json!({"bomFormat": "CycloneDX", "components": []});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::MissingComponents(_))
        ));

        // components present but not an array
        let doc = json!({"bomFormat": "CycloneDX", "components": "nope"});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::MissingComponents(_))
        ));
    }

    #[test]
    fn test_detect_spdx() {
        let doc = json!({
            "spdxVersion": "SPDX-2.3",
            "packages": [{"SPDXID": "SPDXRef-Package-a", "name": "a"}]
        });
        assert_eq!(detect_value(&doc).unwrap(), DocumentKind::Spdx);
    }

    #[test]
    fn test_spdx_version_is_case_insensitive() {
        let doc = json!({
            "spdxVersion": "spdx-2.3",
            "packages": [{"spdxId": "SPDXRef-Package-a"}]
        });
        assert_eq!(detect_value(&doc).unwrap(), DocumentKind::Spdx);
    }

    #[test]
    fn test_spdx_without_identifiable_packages_is_missing_components() {
        let doc = json!({"spdxVersion": "SPDX-2.3"});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::MissingComponents(_))
        ));

        let doc = json!({"spdxVersion": "SPDX-2.3", "packages": [{"name": "no-id"}]});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::MissingComponents(_))
        ));

        let doc = json!({"spdxVersion": "SPDX-2.3", "packages": [{"SPDXID": ""}]});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::MissingComponents(_))
        ));
    }

    #[test]
    fn test_unrelated_json_is_invalid_format() {
        let doc = json!({"some": "random", "json": "content"});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::InvalidFormat(_))
        ));

        let doc = json!(["not", "an", "object"]);
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_detect_str_rejects_bad_json() {
        assert!(matches!(
            detect_str("not json at all"),
            Err(SbomGraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_spdx_version_must_be_a_string() {
        let doc = json!({"spdxVersion": 2.3, "packages": [{"SPDXID": "x"}]});
        assert!(matches!(
            detect_value(&doc),
            Err(SbomGraphError::InvalidFormat(_))
        ));
    }
}
