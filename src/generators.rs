//! Ecosystem manifest generator boundary.
//!
//! Manifest-to-component generators are external collaborators: each one
//! converts package-manifest files for a single ecosystem into a canonical
//! component list, which feeds the merge engine exactly like a normalized
//! SBOM. This module defines the boundary trait and the immutable registry
//! that dispatches over a file map.
//!
//! The registry is built once at startup and read-only afterwards; the
//! engine itself holds no mutable global state.

use crate::error::{Result, SbomGraphError};
use crate::model::CanonicalComponent;
use std::collections::BTreeMap;

/// Extracted files handed to the generators: relative path -> UTF-8 text.
pub type ManifestFiles = BTreeMap<String, String>;

/// Options forwarded to every generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Include development-only dependencies in the output.
    pub include_dev_dependencies: bool,
}

/// A per-ecosystem manifest-to-component converter.
pub trait ManifestGenerator: Send + Sync {
    /// Convert manifest files into a canonical component list.
    fn generate(
        &self,
        files: &ManifestFiles,
        options: &GeneratorOptions,
    ) -> Result<Vec<CanonicalComponent>>;
}

/// Static descriptor for a supported ecosystem.
#[derive(Debug, Clone, Copy)]
pub struct EcosystemDescriptor {
    /// Stable identifier (e.g. `"node"`).
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Manifest filenames (or `.ext` suffixes) that mark this ecosystem.
    pub manifest_filenames: &'static [&'static str],
}

impl EcosystemDescriptor {
    /// Whether any file in the map is a manifest of this ecosystem.
    #[must_use]
    pub fn detect(&self, files: &ManifestFiles) -> bool {
        files.keys().any(|path| {
            let filename = path.rsplit('/').next().unwrap_or(path);
            self.manifest_filenames.iter().any(|candidate| {
                if let Some(suffix) = candidate.strip_prefix('.') {
                    filename.ends_with(&format!(".{suffix}"))
                } else {
                    filename == *candidate
                }
            })
        })
    }
}

/// The ecosystems this system knows how to dispatch.
pub const SUPPORTED_ECOSYSTEMS: &[EcosystemDescriptor] = &[
    EcosystemDescriptor {
        id: "node",
        display_name: "Node.js",
        manifest_filenames: &["package.json", "package-lock.json", "yarn.lock"],
    },
    EcosystemDescriptor {
        id: "python",
        display_name: "Python",
        manifest_filenames: &["requirements.txt", "pyproject.toml", "Pipfile", "setup.py"],
    },
    EcosystemDescriptor {
        id: "java",
        display_name: "Java",
        manifest_filenames: &["pom.xml", "build.gradle", "build.gradle.kts"],
    },
    EcosystemDescriptor {
        id: "dotnet",
        display_name: ".NET",
        manifest_filenames: &[".csproj", "packages.config", "project.json"],
    },
    EcosystemDescriptor {
        id: "go",
        display_name: "Go",
        manifest_filenames: &["go.mod", "go.sum"],
    },
    EcosystemDescriptor {
        id: "rust",
        display_name: "Rust",
        manifest_filenames: &["Cargo.toml", "Cargo.lock"],
    },
    EcosystemDescriptor {
        id: "php",
        display_name: "PHP",
        manifest_filenames: &["composer.json", "composer.lock"],
    },
];

/// Look up a supported ecosystem descriptor by id.
#[must_use]
pub fn ecosystem_by_id(id: &str) -> Option<&'static EcosystemDescriptor> {
    SUPPORTED_ECOSYSTEMS.iter().find(|e| e.id == id)
}

/// Immutable, ordered registry of ecosystem generators.
///
/// Built once with the generators the caller provides; dispatch runs
/// every matching ecosystem in registration order and hands the component
/// lists to the merge engine unchanged.
pub struct EcosystemRegistry {
    entries: Vec<RegistryEntry>,
}

struct RegistryEntry {
    descriptor: &'static EcosystemDescriptor,
    generator: Box<dyn ManifestGenerator>,
}

impl EcosystemRegistry {
    /// Start building an empty registry.
    #[must_use]
    pub fn builder() -> EcosystemRegistryBuilder {
        EcosystemRegistryBuilder {
            entries: Vec::new(),
        }
    }

    /// Ids of the registered ecosystems, in registration order.
    #[must_use]
    pub fn ecosystem_ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.descriptor.id).collect()
    }

    /// Ecosystems whose manifests appear in the file map.
    #[must_use]
    pub fn detect(&self, files: &ManifestFiles) -> Vec<&'static EcosystemDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.detect(files))
            .map(|e| e.descriptor)
            .collect()
    }

    /// Run every matching generator over the file map.
    ///
    /// Returns one component list per matching ecosystem, in registration
    /// order, ready for [`crate::MergeEngine::merge`]. Zero matches fail
    /// with `UnsupportedEcosystem`.
    pub fn generate_all(
        &self,
        files: &ManifestFiles,
        options: &GeneratorOptions,
    ) -> Result<Vec<Vec<CanonicalComponent>>> {
        let mut lists = Vec::new();
        for entry in &self.entries {
            if !entry.descriptor.detect(files) {
                continue;
            }
            tracing::debug!(ecosystem = entry.descriptor.id, "running manifest generator");
            lists.push(entry.generator.generate(files, options)?);
        }

        if lists.is_empty() {
            return Err(SbomGraphError::UnsupportedEcosystem(format!(
                "no manifest matched any of: {}",
                self.entries
                    .iter()
                    .map(|e| e.descriptor.display_name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        Ok(lists)
    }
}

/// Builder for [`EcosystemRegistry`]; the registry is frozen on build.
pub struct EcosystemRegistryBuilder {
    entries: Vec<RegistryEntry>,
}

impl EcosystemRegistryBuilder {
    /// Register a generator for a supported ecosystem.
    #[must_use]
    pub fn register(
        mut self,
        descriptor: &'static EcosystemDescriptor,
        generator: Box<dyn ManifestGenerator>,
    ) -> Self {
        self.entries.push(RegistryEntry {
            descriptor,
            generator,
        });
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> EcosystemRegistry {
        EcosystemRegistry {
            entries: self.entries,
        }
    }
}
