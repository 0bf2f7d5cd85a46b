//! **SBOM normalization and merge engine.**
//!
//! `sbom-graph` ingests machine-generated Software Bills of Materials in
//! the two common JSON dialects, **CycloneDX** and **SPDX**, and converts
//! them into a single canonical component graph. Multiple normalized
//! lists, from SBOM documents or ecosystem manifest generators, can then
//! be merged into one deduplicated inventory with deterministic conflict
//! resolution.
//!
//! ## Key Features
//!
//! - **Format Detection**: Classifies a raw JSON document as CycloneDX or
//!   SPDX from its structural markers, without a format hint.
//! - **Dialect Normalization**: Per-dialect normalizers flatten both
//!   formats into one canonical component shape, including the SPDX
//!   relationship table with its direction-inverting edge semantics and
//!   placeholder synthesis for dangling references.
//! - **Risk Assessment**: A pure heuristic derives a risk level from
//!   license, name, and version signals during normalization.
//! - **Merge & Dedup**: The [`MergeEngine`] combines any number of
//!   component lists, unioning dependency sets, escalating risk, and
//!   resolving id collisions deterministically.
//! - **Ecosystem Registry**: A frozen registry dispatches package-manifest
//!   files to per-ecosystem generators whose output feeds the same merge
//!   pipeline.
//!
//! ## Getting Started: Normalizing an SBOM
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_graph::normalize_sbom;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let components = normalize_sbom(Path::new("path/to/sbom.json"))?;
//!     println!("Normalized {} components.", components.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Merging Multiple Sources
//!
//! ```
//! use sbom_graph::{normalize_sbom_str, MergeEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cdx = r#"{"bomFormat": "CycloneDX",
//!         "components": [{"name": "lodash", "version": "4.17.21"}]}"#;
//!     let spdx = r#"{"spdxVersion": "SPDX-2.3",
//!         "packages": [{"SPDXID": "SPDXRef-1", "name": "lodash",
//!                       "versionInfo": "4.17.21"}]}"#;
//!
//!     let sources = vec![normalize_sbom_str(cdx)?, normalize_sbom_str(spdx)?];
//!     let merged = MergeEngine::new().merge(&sources);
//!     assert_eq!(merged.len(), 1);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors / # Panics doc sections are aspirational for this API surface
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // self is kept for API consistency across the normalizer types
    clippy::unused_self
)]

pub mod error;
pub mod generators;
pub mod ingest;
pub mod merge;
pub mod model;
pub mod parsers;
pub mod risk;

// Re-export main types for convenience
pub use error::{Result, SbomGraphError};
pub use generators::{
    ecosystem_by_id, EcosystemDescriptor, EcosystemRegistry, GeneratorOptions, ManifestFiles,
    ManifestGenerator, SUPPORTED_ECOSYSTEMS,
};
pub use merge::MergeEngine;
pub use model::{CanonicalComponent, ComponentType, RiskLevel};
pub use parsers::{
    detect_str, detect_value, normalize_sbom, normalize_sbom_str, normalize_sbom_value,
    DocumentKind,
};
pub use risk::assess_risk;
