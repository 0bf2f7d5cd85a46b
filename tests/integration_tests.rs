//! Integration tests for sbom-graph
//!
//! These tests verify end-to-end behavior of format detection, the
//! dialect normalizers, and the merge engine against realistic documents.

use sbom_graph::{
    detect_str, normalize_sbom, normalize_sbom_str, CanonicalComponent, ComponentType,
    DocumentKind, MergeEngine, RiskLevel, SbomGraphError,
};
use std::io::Write as _;

fn find<'a>(components: &'a [CanonicalComponent], name: &str) -> &'a CanonicalComponent {
    components
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("component {name} not found"))
}

// ============================================================================
// Detection Tests
// ============================================================================

mod detection_tests {
    use super::*;

    #[test]
    fn test_detect_cyclonedx() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.4",
            "components": [{"name": "a"}]}"#;
        assert_eq!(detect_str(content).unwrap(), DocumentKind::CycloneDx);
    }

    #[test]
    fn test_detect_spdx() {
        let content = r#"{"spdxVersion": "SPDX-2.3",
            "packages": [{"SPDXID": "SPDXRef-1", "name": "a"}]}"#;
        assert_eq!(detect_str(content).unwrap(), DocumentKind::Spdx);
    }

    #[test]
    fn test_unrecognized_document() {
        let err = detect_str(r#"{"name": "not-an-sbom"}"#).unwrap_err();
        assert!(matches!(err, SbomGraphError::InvalidFormat(_)));
    }

    #[test]
    fn test_envelope_without_components_fails() {
        // Concrete failure mode: a recognized envelope with no inventory.
        let err = detect_str(r#"{"bomFormat": "CycloneDX", "specVersion": "1.4"}"#).unwrap_err();
        assert!(matches!(err, SbomGraphError::MissingComponents(_)));
    }
}

// ============================================================================
// Normalization Tests
// ============================================================================

mod normalization_tests {
    use super::*;

    #[test]
    fn test_cyclonedx_end_to_end() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "specVersion": "1.4",
            "components": [{
                "bom-ref": "pkg:npm/react@18.2.0",
                "type": "library",
                "name": "react",
                "version": "18.2.0",
                "licenses": [{"license": {"id": "MIT"}}]
            }],
            "dependencies": [{
                "ref": "pkg:npm/react@18.2.0",
                "dependsOn": ["pkg:npm/lodash@4.17.21"]
            }]
        }"#;

        let components = normalize_sbom_str(content).unwrap();
        assert_eq!(components.len(), 1);

        let react = &components[0];
        assert_eq!(react.id, "pkg:npm/react@18.2.0");
        assert_eq!(react.license, "MIT");
        assert_eq!(react.risk_level, RiskLevel::Low);
        let deps: Vec<_> = react.dependencies.iter().collect();
        assert_eq!(deps, vec!["pkg:npm/lodash@4.17.21"]);
    }

    #[test]
    fn test_deprecated_name_outranks_license_risk() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "components": [{"name": "deprecated-auth", "version": "1.0.0"}]
        }"#;

        let components = normalize_sbom_str(content).unwrap();
        let auth = &components[0];
        assert_eq!(auth.license, "Unknown");
        // The name check escalates past the license-driven Medium.
        assert_eq!(auth.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_spdx_end_to_end_with_inversion_and_placeholder() {
        let content = r#"{
            "spdxVersion": "SPDX-2.3",
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-App"],
            "packages": [
                {
                    "SPDXID": "SPDXRef-App",
                    "name": "my-service",
                    "versionInfo": "2.1.0",
                    "licenseConcluded": "Apache-2.0"
                },
                {
                    "SPDXID": "SPDXRef-Lodash",
                    "name": "lodash",
                    "versionInfo": "4.17.21",
                    "licenseConcluded": "MIT",
                    "description": "A modern JavaScript utility library"
                }
            ],
            "relationships": [
                {
                    "spdxElementId": "SPDXRef-Lodash",
                    "relationshipType": "DEPENDENCY_OF",
                    "relatedSpdxElement": "SPDXRef-App"
                },
                {
                    "spdxElementId": "SPDXRef-App",
                    "relationshipType": "DEPENDS_ON",
                    "relatedSpdxElement": "SPDXRef-Missing"
                }
            ]
        }"#;

        let components = normalize_sbom_str(content).unwrap();
        assert_eq!(components.len(), 3);

        let app = find(&components, "my-service");
        assert_eq!(app.component_type, ComponentType::Application);
        // Inverted edge: lodash is a dependency OF the app.
        assert!(app.dependencies.contains("SPDXRef-Lodash"));
        assert!(app.dependencies.contains("SPDXRef-Missing"));

        let lodash = find(&components, "lodash");
        assert!(lodash.dependencies.is_empty());
        assert_eq!(lodash.description, "A modern JavaScript utility library");

        let placeholder = find(&components, "SPDXRef-Missing");
        assert_eq!(placeholder.component_type, ComponentType::Dependency);
        assert_eq!(placeholder.version, "unknown");
        assert_eq!(placeholder.risk_level, RiskLevel::Medium);
        assert_eq!(placeholder.description, "SPDX reference");
    }

    #[test]
    fn test_component_count_matches_entry_count() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "components": [
                {"name": "a", "version": "1"},
                {"name": "b", "version": "2"},
                {"name": "c", "version": "3"},
                {"name": "d", "version": "4"}
            ]
        }"#;

        let components = normalize_sbom_str(content).unwrap();
        assert_eq!(components.len(), 4);

        let mut ids: Vec<_> = components.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4, "every id must be unique");
    }

    #[test]
    fn test_normalize_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"spdxVersion": "SPDX-2.3",
                "packages": [{{"SPDXID": "SPDXRef-1", "name": "express",
                              "versionInfo": "4.18.2", "licenseConcluded": "MIT"}}]}}"#
        )
        .unwrap();

        let components = normalize_sbom(file.path()).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "express");
        assert_eq!(components[0].license, "MIT");
    }

    #[test]
    fn test_normalize_missing_file() {
        let err = normalize_sbom(std::path::Path::new("/nonexistent/sbom.json")).unwrap_err();
        assert!(matches!(err, SbomGraphError::Io(_)));
    }

    #[test]
    fn test_wire_output_shape() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "components": [{"name": "react", "version": "18.2.0", "type": "library",
                            "licenses": [{"license": {"id": "MIT"}}]}]
        }"#;

        let components = normalize_sbom_str(content).unwrap();
        let json = serde_json::to_value(&components).unwrap();
        let obj = json[0].as_object().unwrap();

        assert_eq!(obj["type"], "library");
        assert_eq!(obj["riskLevel"], "low");
        assert_eq!(obj["cveCount"], 0);
        assert!(obj["dependencies"].is_array());
        assert!(obj.contains_key("description"));
    }
}

// ============================================================================
// Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    fn normalized(content: &str) -> Vec<CanonicalComponent> {
        normalize_sbom_str(content).unwrap()
    }

    #[test]
    fn test_merge_across_dialects() {
        let cdx = r#"{
            "bomFormat": "CycloneDX",
            "components": [{
                "bom-ref": "pkg:npm/lib@1.0",
                "name": "lib", "version": "1.0",
                "licenses": [{"license": {"id": "MIT"}}]
            }],
            "dependencies": [{"ref": "pkg:npm/lib@1.0", "dependsOn": ["x"]}]
        }"#;
        let spdx = r#"{
            "spdxVersion": "SPDX-2.3",
            "packages": [
                {"SPDXID": "SPDXRef-Lib", "name": "lib", "versionInfo": "1.0"},
                {"SPDXID": "y", "name": "y-lib", "versionInfo": "1.0"}
            ],
            "relationships": [{
                "spdxElementId": "SPDXRef-Lib",
                "relationshipType": "DEPENDS_ON",
                "relatedSpdxElement": "y"
            }]
        }"#;

        let sources = vec![normalized(cdx), normalized(spdx)];
        let merged = MergeEngine::new().merge(&sources);

        let lib = find(&merged, "lib");
        // First-seen id and license win; dependency sets union.
        assert_eq!(lib.id, "pkg:npm/lib@1.0");
        assert_eq!(lib.license, "MIT");
        assert!(lib.dependencies.contains("x"));
        assert!(lib.dependencies.contains("y"));
        // The SPDX copy had no license, which had driven its risk to Medium;
        // merged risk keeps the escalated level.
        assert_eq!(lib.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_merge_conflicting_duplicates() {
        let mut low = CanonicalComponent::new("a", "lib", "1.0", ComponentType::Library);
        low.dependencies.insert("x".to_string());

        let mut medium = CanonicalComponent::new("b", "lib", "1.0", ComponentType::Library);
        medium.risk_level = RiskLevel::Medium;
        medium.dependencies.insert("y".to_string());

        let merged = MergeEngine::new().merge(&[vec![low], vec![medium]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].risk_level, RiskLevel::Medium);
        assert!(merged[0].dependencies.contains("x"));
        assert!(merged[0].dependencies.contains("y"));
    }

    #[test]
    fn test_merge_key_set_is_order_independent() {
        let l1 = normalized(
            r#"{"bomFormat": "CycloneDX",
                "components": [{"name": "a", "version": "1"}, {"name": "b", "version": "2"}]}"#,
        );
        let l2 = normalized(
            r#"{"bomFormat": "CycloneDX",
                "components": [{"name": "b", "version": "2"}, {"name": "c", "version": "3"}]}"#,
        );

        let engine = MergeEngine::new();
        let forward = engine.merge(&[l1.clone(), l2.clone()]);
        let backward = engine.merge(&[l2, l1]);

        let mut forward_keys: Vec<_> = forward.iter().map(CanonicalComponent::identity_key).collect();
        let mut backward_keys: Vec<_> =
            backward.iter().map(CanonicalComponent::identity_key).collect();
        forward_keys.sort();
        backward_keys.sort();
        assert_eq!(forward_keys, backward_keys);
    }

    #[test]
    fn test_dedup_equals_merge_of_singletons() {
        let list = normalized(
            r#"{"bomFormat": "CycloneDX",
                "components": [
                    {"name": "a", "version": "1"},
                    {"name": "b", "version": "2"},
                    {"name": "a", "version": "1"}
                ]}"#,
        );

        let engine = MergeEngine::new();
        let deduped = engine.dedup(&list);
        assert_eq!(deduped.len(), 2);

        let singletons: Vec<Vec<_>> = list.iter().map(|c| vec![c.clone()]).collect();
        let merged = engine.merge(&singletons);
        assert_eq!(
            deduped.iter().map(CanonicalComponent::identity_key).collect::<Vec<_>>(),
            merged.iter().map(CanonicalComponent::identity_key).collect::<Vec<_>>()
        );
    }
}
