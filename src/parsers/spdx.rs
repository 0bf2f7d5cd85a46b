//! SPDX SBOM normalizer.
//!
//! Converts an SPDX 2.3+ JSON document into canonical components. The
//! relationship vocabulary has direction-inverting semantics: for tokens
//! like `DEPENDENCY_OF`, the *source* of the relationship is a dependency
//! *of* the target, so the produced edge points target -> source. The
//! direction rules live in a static lookup table so the rule set is
//! independently unit-testable.
//!
//! Edge endpoints with no matching declared package are synthesized as
//! placeholder components rather than dropped, so the dependency graph
//! stays navigable even for incomplete documents.

use crate::error::{Result, SbomGraphError};
use crate::model::{
    generic_description, normalize_spdx_sentinel, note_unparseable_license, CanonicalComponent,
    ComponentType, RiskLevel, UNKNOWN_LICENSE, UNKNOWN_VERSION,
};
use crate::risk::assess_risk;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Description marker carried by synthesized placeholder components.
pub const PLACEHOLDER_DESCRIPTION: &str = "SPDX reference";

/// The conventional identifier of the synthetic document node.
const DOCUMENT_NODE_ID: &str = "SPDXRef-DOCUMENT";

/// Effect of one SPDX relationship token on the canonical graph.
///
/// `invert` flips the edge (target -> source); `structural` tokens mark
/// document structure (root components) and never produce an edge.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipRule {
    pub token: &'static str,
    pub invert: bool,
    pub structural: bool,
}

/// Static direction table for the SPDX relationship vocabulary.
///
/// Tokens absent from this table are ignored entirely.
pub const RELATIONSHIP_RULES: &[RelationshipRule] = &[
    RelationshipRule { token: "DEPENDS_ON", invert: false, structural: false },
    RelationshipRule { token: "CONTAINS", invert: false, structural: false },
    RelationshipRule { token: "DEPENDENCY_OF", invert: true, structural: false },
    RelationshipRule { token: "CONTAINED_BY", invert: true, structural: false },
    RelationshipRule { token: "BUILD_DEPENDENCY_OF", invert: true, structural: false },
    RelationshipRule { token: "RUNTIME_DEPENDENCY_OF", invert: true, structural: false },
    RelationshipRule { token: "DEV_DEPENDENCY_OF", invert: true, structural: false },
    RelationshipRule { token: "OPTIONAL_DEPENDENCY_OF", invert: true, structural: false },
    RelationshipRule { token: "DESCRIBES", invert: false, structural: true },
];

/// Look up the rule for a relationship token (case-insensitive).
#[must_use]
pub fn relationship_rule(token: &str) -> Option<&'static RelationshipRule> {
    let upper = token.to_uppercase();
    RELATIONSHIP_RULES.iter().find(|rule| rule.token == upper)
}

/// Normalizer for the SPDX dialect.
pub struct SpdxNormalizer;

impl SpdxNormalizer {
    /// Create a new SPDX normalizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Normalize a parsed SPDX document into canonical components.
    ///
    /// Output order: declared packages in document order, then synthesized
    /// placeholders in first-reference order.
    pub fn normalize(&self, value: Value) -> Result<Vec<CanonicalComponent>> {
        let spdx: SpdxDocument =
            serde_json::from_value(value).map_err(|e| SbomGraphError::MalformedPayload(e.to_string()))?;

        let packages = match spdx.packages {
            Some(packages) if !packages.is_empty() => packages,
            _ => {
                return Err(SbomGraphError::missing_components(
                    "SPDX document has no packages array",
                ))
            }
        };

        let mut components: IndexMap<String, CanonicalComponent> = IndexMap::new();
        for pkg in packages {
            let Some(spdx_id) = pkg.spdx_id.as_ref().filter(|id| !id.is_empty()) else {
                tracing::warn!(package = %pkg.name, "skipping SPDX package without identifier");
                continue;
            };
            let comp = convert_package(spdx_id.clone(), &pkg);
            components.insert(comp.id.clone(), comp);
        }

        let relationships = spdx.relationships.unwrap_or_default();
        let document_id = if spdx.spdx_id.is_empty() {
            DOCUMENT_NODE_ID.to_string()
        } else {
            spdx.spdx_id
        };

        mark_roots(
            &mut components,
            spdx.document_describes.as_deref().unwrap_or_default(),
            &relationships,
            &document_id,
        );
        resolve_edges(&mut components, &relationships, &document_id);

        Ok(components.into_values().collect())
    }
}

impl Default for SpdxNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a declared SPDX package into a canonical component.
fn convert_package(spdx_id: String, pkg: &SpdxPackage) -> CanonicalComponent {
    let license = resolve_license(pkg);
    note_unparseable_license(&pkg.name, &license);

    let version = pkg
        .version_info
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string());

    let risk_level = assess_risk(&license, &pkg.name, &version);

    let description = pkg
        .description
        .clone()
        .or_else(|| pkg.summary.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| generic_description(ComponentType::Library));

    let mut comp = CanonicalComponent::new(spdx_id, pkg.name.clone(), version, ComponentType::Library);
    comp.license = license;
    comp.risk_level = risk_level;
    comp.description = description;
    comp
}

/// Resolve the license for an SPDX package.
///
/// Prefers the concluded license, falls back to the declared license,
/// then to the first entry of the files-license list. The assertion
/// sentinels are normalized on whichever value was chosen: `NOASSERTION`
/// becomes `Unknown`, `NONE` becomes `None`.
fn resolve_license(pkg: &SpdxPackage) -> String {
    let raw = pkg
        .license_concluded
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| pkg.license_declared.as_deref().filter(|s| !s.is_empty()))
        .or_else(|| {
            pkg.license_info_from_files
                .as_deref()
                .and_then(<[_]>::first)
                .map(String::as_str)
                .filter(|s| !s.is_empty())
        });

    match raw {
        Some(raw) => normalize_spdx_sentinel(raw),
        None => UNKNOWN_LICENSE.to_string(),
    }
}

/// Collect root markers and retype the matching components.
///
/// Roots come from the top-level `documentDescribes` array and from
/// `DESCRIBES` relationships whose source is the document node.
fn mark_roots(
    components: &mut IndexMap<String, CanonicalComponent>,
    document_describes: &[String],
    relationships: &[SpdxRelationship],
    document_id: &str,
) {
    let mut roots: HashSet<&str> = document_describes.iter().map(String::as_str).collect();

    for rel in relationships {
        if is_document_node(&rel.spdx_element_id, document_id)
            && relationship_rule(&rel.relationship_type).is_some_and(|r| r.structural)
        {
            roots.insert(rel.related_spdx_element.as_str());
        }
    }

    for root_id in roots {
        if let Some(comp) = components.get_mut(root_id) {
            // Keep the generic placeholder description in sync with the
            // retyped component, or the merge-time placeholder check breaks.
            let was_generic = comp.has_generic_description();
            comp.component_type = ComponentType::Application;
            if was_generic {
                comp.description = generic_description(ComponentType::Application);
            }
        }
    }
}

/// Resolve relationship edges onto their source components.
///
/// Relationships touching the document node never become edges; unknown
/// tokens are skipped; dangling endpoints are synthesized as placeholders.
fn resolve_edges(
    components: &mut IndexMap<String, CanonicalComponent>,
    relationships: &[SpdxRelationship],
    document_id: &str,
) {
    for rel in relationships {
        let Some(rule) = relationship_rule(&rel.relationship_type) else {
            tracing::debug!(
                token = %rel.relationship_type,
                "ignoring unrecognized SPDX relationship type"
            );
            continue;
        };
        if rule.structural {
            continue;
        }
        if rel.spdx_element_id.is_empty() || rel.related_spdx_element.is_empty() {
            continue;
        }
        if is_document_node(&rel.spdx_element_id, document_id)
            || is_document_node(&rel.related_spdx_element, document_id)
        {
            continue;
        }

        let (source, target) = if rule.invert {
            (&rel.related_spdx_element, &rel.spdx_element_id)
        } else {
            (&rel.spdx_element_id, &rel.related_spdx_element)
        };

        ensure_component(components, source);
        ensure_component(components, target);

        if let Some(comp) = components.get_mut(source.as_str()) {
            comp.dependencies.insert(target.clone());
        }
    }
}

/// Synthesize a placeholder for an edge endpoint with no declared package.
fn ensure_component(components: &mut IndexMap<String, CanonicalComponent>, id: &str) {
    if components.contains_key(id) {
        return;
    }
    tracing::debug!(id, "synthesizing placeholder for unresolved SPDX reference");

    let mut comp =
        CanonicalComponent::new(id, id, UNKNOWN_VERSION, ComponentType::Dependency);
    comp.risk_level = RiskLevel::Medium;
    comp.description = PLACEHOLDER_DESCRIPTION.to_string();
    components.insert(id.to_string(), comp);
}

/// Whether an id refers to the synthetic document node.
fn is_document_node(id: &str, document_id: &str) -> bool {
    id == document_id || id == DOCUMENT_NODE_ID
}

// SPDX JSON structures for deserialization

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    document_describes: Option<Vec<String>>,
    packages: Option<Vec<SpdxPackage>>,
    relationships: Option<Vec<SpdxRelationship>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(rename = "SPDXID", alias = "spdxId", alias = "spdxid", alias = "SPDXId")]
    spdx_id: Option<String>,
    #[serde(default)]
    name: String,
    version_info: Option<String>,
    license_concluded: Option<String>,
    license_declared: Option<String>,
    license_info_from_files: Option<Vec<String>>,
    description: Option<String>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationship {
    #[serde(default)]
    spdx_element_id: String,
    #[serde(default)]
    relationship_type: String,
    #[serde(default)]
    related_spdx_element: String,
}
