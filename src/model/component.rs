//! Canonical component data structures.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version string used when a source document carries no version.
pub const UNKNOWN_VERSION: &str = "unknown";

/// License sentinel used when no license could be resolved.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// Component type in the canonical model.
///
/// Both dialects collapse to three categories: anything that is not
/// explicitly an application or a library is a plain dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Application,
    Library,
    Dependency,
}

impl ComponentType {
    /// Map a CycloneDX `type` string to the canonical category.
    ///
    /// Exact case-insensitive matches for `application` and `library`;
    /// everything else (frameworks, containers, files, absent) is a
    /// dependency.
    #[must_use]
    pub fn from_cyclonedx(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "application" => Self::Application,
            "library" => Self::Library,
            _ => Self::Dependency,
        }
    }

    /// Get the lowercase wire label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Library => "library",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Heuristic risk level for a component.
///
/// Ordered so that escalation is a plain `max`: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Get the lowercase wire label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Escalate-only combination: the higher of the two levels wins.
    #[must_use]
    pub fn escalate(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Component in the canonical graph - the only persistent entity.
///
/// Dependency edges are stored as plain id strings, never as object links,
/// so cyclic graphs (legal in both dialects) cannot create reference
/// cycles. Edges may reference ids with no matching full entry; consumers
/// must tolerate dangling or placeholder targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalComponent {
    /// Origin-specific identifier (`bom-ref`, `SPDXID`, or a synthesized
    /// fallback). Unique within one normalized list, not globally.
    pub id: String,
    /// Component name.
    pub name: String,
    /// Component type.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Resolved license expression, or the `"Unknown"` sentinel.
    pub license: String,
    /// Version string; `"unknown"` when the source carried none.
    pub version: String,
    /// Heuristic risk level.
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    /// Vulnerability count stub; participates in merge arithmetic but is
    /// never populated from an external feed.
    #[serde(rename = "cveCount")]
    pub cve_count: u32,
    /// Outgoing dependency edges, by component id, in insertion order.
    pub dependencies: IndexSet<String>,
    /// Human-readable description. `"{type} component"` is the generic
    /// placeholder value subject to replacement during merge.
    pub description: String,
}

impl CanonicalComponent {
    /// Create a component with the generic placeholder description and
    /// no dependencies.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        component_type: ComponentType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            component_type,
            license: UNKNOWN_LICENSE.to_string(),
            version: version.into(),
            risk_level: RiskLevel::Low,
            cve_count: 0,
            dependencies: IndexSet::new(),
            description: generic_description(component_type),
        }
    }

    /// Identity key used to detect "the same" component across sources.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Whether the description is still the generic `"{type} component"`
    /// placeholder for this component's type.
    #[must_use]
    pub fn has_generic_description(&self) -> bool {
        self.description == generic_description(self.component_type)
    }

    /// Get display name with version.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// The generic placeholder description for a component type.
#[must_use]
pub fn generic_description(component_type: ComponentType) -> String {
    format!("{} component", component_type.label())
}
