//! Heuristic risk assessment.
//!
//! A pure function of (license, name, version). Deterministic and
//! escalate-only: a level computed by a later step overrides an earlier
//! one, and the function never downgrades within a single call. No other
//! inputs affect risk; `cveCount` in particular is a stub and plays no
//! part here.

use crate::model::{RiskLevel, UNKNOWN_LICENSE};

/// Compute the risk level for a component.
///
/// Rules, applied in order:
/// 1. Start at Low.
/// 2. License contains `GPL` (case-insensitive) or is the `Unknown`
///    sentinel: Medium.
/// 3. Name contains `deprecated`, or version contains `alpha` or `beta`
///    (all case-insensitive): High, overriding step 2.
#[must_use]
pub fn assess_risk(license: &str, name: &str, version: &str) -> RiskLevel {
    let mut level = RiskLevel::Low;

    if license.to_lowercase().contains("gpl") || license == UNKNOWN_LICENSE {
        level = RiskLevel::Medium;
    }

    let name_lower = name.to_lowercase();
    let version_lower = version.to_lowercase();
    if name_lower.contains("deprecated")
        || version_lower.contains("alpha")
        || version_lower.contains("beta")
    {
        level = RiskLevel::High;
    }

    level
}
