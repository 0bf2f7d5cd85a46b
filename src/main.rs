//! sbom-graph: SBOM normalization and merge tool
//!
//! Normalizes `CycloneDX` and SPDX JSON documents into a canonical
//! component list and merges lists from multiple sources.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sbom_graph::{detect_str, normalize_sbom, CanonicalComponent, MergeEngine};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sbom-graph")]
#[command(version)]
#[command(about = "SBOM normalization and merge tool", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Normalize a single SBOM to the canonical component list
    sbom-graph normalize sbom.cdx.json --pretty

    # Merge several SBOMs into one deduplicated inventory
    sbom-graph merge app.cdx.json base.spdx.json -O merged.json

    # Identify the dialect of a document
    sbom-graph detect mystery.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `normalize` subcommand
#[derive(Parser)]
struct NormalizeArgs {
    /// Path to the SBOM file
    sbom: PathBuf,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `merge` subcommand
#[derive(Parser)]
struct MergeArgs {
    /// Paths to the SBOM files, in priority order (first wins conflicts)
    #[arg(required = true)]
    sboms: Vec<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `dedup` subcommand
#[derive(Parser)]
struct DedupArgs {
    /// Path to a canonical component list (JSON array)
    components: PathBuf,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize one SBOM into the canonical component list
    Normalize(NormalizeArgs),

    /// Normalize and merge multiple SBOMs into one inventory
    Merge(MergeArgs),

    /// Deduplicate an already-canonical component list
    Dedup(DedupArgs),

    /// Detect the dialect of an SBOM document
    Detect {
        /// Path to the SBOM file
        sbom: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Normalize(args) => {
            let components = normalize_sbom(&args.sbom)
                .with_context(|| format!("failed to normalize {}", args.sbom.display()))?;
            write_components(&components, args.pretty, args.output_file.as_deref())
        }

        Commands::Merge(args) => {
            let mut sources = Vec::with_capacity(args.sboms.len());
            for path in &args.sboms {
                let components = normalize_sbom(path)
                    .with_context(|| format!("failed to normalize {}", path.display()))?;
                sources.push(components);
            }
            let merged = MergeEngine::new().merge(&sources);
            write_components(&merged, args.pretty, args.output_file.as_deref())
        }

        Commands::Dedup(args) => {
            let content = std::fs::read_to_string(&args.components)
                .with_context(|| format!("failed to read {}", args.components.display()))?;
            let components: Vec<CanonicalComponent> = serde_json::from_str(&content)
                .context("input is not a canonical component list")?;
            let deduped = MergeEngine::new().dedup(&components);
            write_components(&deduped, args.pretty, args.output_file.as_deref())
        }

        Commands::Detect { sbom } => {
            let content = std::fs::read_to_string(&sbom)
                .with_context(|| format!("failed to read {}", sbom.display()))?;
            let kind = detect_str(&content)?;
            println!("{}", kind.name());
            Ok(())
        }
    }
}

/// Serialize a component list to the output target.
fn write_components(
    components: &[CanonicalComponent],
    pretty: bool,
    output_file: Option<&Path>,
) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(components)?
    } else {
        serde_json::to_string(components)?
    };

    match output_file {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} components to {}", components.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
