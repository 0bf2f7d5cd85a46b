//! Canonical in-memory representation for normalized SBOMs.
//!
//! Both `CycloneDX` and SPDX documents are normalized to these structures
//! before merge operations. The canonical component is the only persistent
//! entity: it is created fresh by a normalizer call, immutable at that
//! point, and mutated in place only during merge (dependency-set union,
//! risk escalation, description override).

mod component;
mod license;

pub use component::{
    generic_description, CanonicalComponent, ComponentType, RiskLevel, UNKNOWN_LICENSE,
    UNKNOWN_VERSION,
};
pub use license::{is_valid_spdx_expression, normalize_spdx_sentinel, NONE_LICENSE};

pub(crate) use license::note_unparseable_license;
