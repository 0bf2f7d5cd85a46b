//! License string handling shared by both normalizers.
//!
//! Uses the `spdx` crate for expression validation (lax mode, accepting
//! common non-standard spellings). Validation is informational only: the
//! canonical model keeps the resolved license string verbatim.

use super::component::UNKNOWN_LICENSE;

/// License sentinel produced by the SPDX `NONE` value.
pub const NONE_LICENSE: &str = "None";

/// Normalize the SPDX assertion sentinels.
///
/// `NOASSERTION` means "nobody checked" and maps to the `"Unknown"`
/// sentinel; `NONE` means "checked, no license" and maps to `"None"`.
/// Any other value passes through untouched.
#[must_use]
pub fn normalize_spdx_sentinel(raw: &str) -> String {
    match raw {
        "NOASSERTION" => UNKNOWN_LICENSE.to_string(),
        "NONE" => NONE_LICENSE.to_string(),
        other => other.to_string(),
    }
}

/// Check whether a resolved license string parses as an SPDX expression.
///
/// Lax parsing mode accepts common non-standard expressions (e.g.
/// "Apache2" instead of "Apache-2.0"). Sentinels never validate.
#[must_use]
pub fn is_valid_spdx_expression(expr: &str) -> bool {
    if expr.is_empty() || expr == UNKNOWN_LICENSE || expr == NONE_LICENSE {
        return false;
    }
    spdx::Expression::parse_mode(expr, spdx::ParseMode::LAX).is_ok()
}

/// Log a debug note for license strings that do not parse as SPDX.
///
/// Called by the normalizers after license resolution; keeps noisy
/// diagnostics out of the hot path when debug logging is off.
pub(crate) fn note_unparseable_license(component_name: &str, license: &str) {
    if license != UNKNOWN_LICENSE && license != NONE_LICENSE && !is_valid_spdx_expression(license) {
        tracing::debug!(
            component = component_name,
            license,
            "license string is not a parseable SPDX expression"
        );
    }
}
