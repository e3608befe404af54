//! Prefix and separator normalization.
//!
//! Rules:
//! - Prefixes and separators are trimmed of surrounding whitespace.
//! - A missing or blank prefix means "default store", not an error.
//! - A blank separator is rejected.

use crate::error::{RouterError, RouterResult};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Normalize a group prefix.
///
/// Returns `None` when the prefix is missing or blank, in which case the
/// store belongs to the default list.
///
/// # Examples
///
/// ```
/// use prism_router::names::normalize_prefix;
///
/// assert_eq!(normalize_prefix(Some("  soup ")), Some("soup"));
/// assert_eq!(normalize_prefix(Some("   ")), None);
/// assert_eq!(normalize_prefix(None), None);
/// ```
pub fn normalize_prefix(prefix: Option<&str>) -> Option<&str> {
    prefix.map(str::trim).filter(|p| !p.is_empty())
}

/// Validate a separator, returning its trimmed form.
///
/// # Examples
///
/// ```
/// use prism_router::names::validate_separator;
///
/// assert_eq!(validate_separator(" :: ").unwrap(), "::");
/// assert!(validate_separator("").is_err());
/// assert!(validate_separator(" \t").is_err());
/// ```
pub fn validate_separator(separator: &str) -> RouterResult<&str> {
    let trimmed = separator.trim();
    if trimmed.is_empty() {
        return Err(RouterError::InvalidArgument {
            argument: "separator".into(),
            reason: "separator must not be empty or blank".into(),
        });
    }
    Ok(trimmed)
}
