//! CycloneDX SBOM normalizer.
//!
//! Converts a CycloneDX 1.4+ JSON document into canonical components.
//! Dependency edges are not embedded per-component in this dialect; they
//! come from a separate top-level `dependencies` array of
//! `(ref, dependsOn[])` pairs, looked up by id after all components are
//! built. A component with no matching entry gets an empty dependency set.

use crate::error::{Result, SbomGraphError};
use crate::model::{
    generic_description, note_unparseable_license, CanonicalComponent, ComponentType,
    UNKNOWN_LICENSE, UNKNOWN_VERSION,
};
use crate::risk::assess_risk;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Normalizer for the CycloneDX dialect.
pub struct CycloneDxNormalizer;

impl CycloneDxNormalizer {
    /// Create a new CycloneDX normalizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Normalize a parsed CycloneDX document into canonical components.
    ///
    /// The output has exactly one component per `components` entry, in
    /// document order.
    pub fn normalize(&self, value: Value) -> Result<Vec<CanonicalComponent>> {
        let bom: CycloneDxBom =
            serde_json::from_value(value).map_err(|e| SbomGraphError::MalformedPayload(e.to_string()))?;

        let entries = match bom.components {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Err(SbomGraphError::missing_components(
                    "CycloneDX document has no components array",
                ))
            }
        };

        // ref -> dependsOn targets, from the top-level dependencies array.
        let mut edge_map: HashMap<String, Vec<String>> = HashMap::new();
        for dep in bom.dependencies.unwrap_or_default() {
            edge_map.insert(dep.ref_field, dep.depends_on);
        }

        let mut components = Vec::with_capacity(entries.len());
        for entry in entries {
            components.push(self.convert_component(entry, &edge_map));
        }

        Ok(components)
    }

    /// Convert a single CycloneDX component entry.
    fn convert_component(
        &self,
        entry: CdxComponent,
        edge_map: &HashMap<String, Vec<String>>,
    ) -> CanonicalComponent {
        let component_type = ComponentType::from_cyclonedx(entry.component_type.as_deref().unwrap_or(""));

        let id = match entry.bom_ref {
            Some(bom_ref) if !bom_ref.is_empty() => bom_ref,
            _ => entry.name.clone(),
        };

        let license = resolve_license(entry.licenses.as_deref());
        note_unparseable_license(&entry.name, &license);

        let version = entry
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string());

        let risk_level = assess_risk(&license, &entry.name, &version);

        let description = entry
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| generic_description(component_type));

        let mut comp = CanonicalComponent::new(id, entry.name, version, component_type);
        comp.license = license;
        comp.risk_level = risk_level;
        comp.description = description;

        // No matching dependencies entry is not an error.
        if let Some(targets) = edge_map.get(&comp.id) {
            comp.dependencies.extend(targets.iter().cloned());
        }

        comp
    }
}

impl Default for CycloneDxNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the license for a component entry.
///
/// Resolution order: first entry's `license.id`, else `license.name`,
/// else the entry's `expression` (expression-style entries are legal in
/// CycloneDX 1.5+), else the `Unknown` sentinel.
fn resolve_license(licenses: Option<&[CdxLicenseEntry]>) -> String {
    let Some(first) = licenses.and_then(<[_]>::first) else {
        return UNKNOWN_LICENSE.to_string();
    };

    if let Some(license) = &first.license {
        if let Some(id) = license.id.as_ref().filter(|s| !s.is_empty()) {
            return id.clone();
        }
        if let Some(name) = license.name.as_ref().filter(|s| !s.is_empty()) {
            return name.clone();
        }
    }
    if let Some(expression) = first.expression.as_ref().filter(|s| !s.is_empty()) {
        return expression.clone();
    }

    UNKNOWN_LICENSE.to_string()
}

// CycloneDX JSON structures for deserialization

#[derive(Debug, Deserialize)]
struct CycloneDxBom {
    components: Option<Vec<CdxComponent>>,
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Debug, Deserialize)]
struct CdxComponent {
    #[serde(rename = "bom-ref")]
    bom_ref: Option<String>,
    #[serde(default)]
    name: String,
    version: Option<String>,
    #[serde(rename = "type")]
    component_type: Option<String>,
    licenses: Option<Vec<CdxLicenseEntry>>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxLicenseEntry {
    license: Option<CdxLicense>,
    expression: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxLicense {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxDependency {
    #[serde(rename = "ref")]
    ref_field: String,
    #[serde(rename = "dependsOn", default)]
    depends_on: Vec<String>,
}
