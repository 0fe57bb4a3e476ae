//! Blocklist domain-name normalization.
//!
//! Every domain entering the blocklist, whether from the admin API or the
//! resolver's hot-path membership check, goes through the same
//! normalization so that `Ads.Example.COM.` and `ads.example.com` are one
//! key.

use crate::error::CoreError;

/// Longest accepted domain, per RFC 1035 presentation format.
const MAX_DOMAIN_LEN: usize = 253;

/// Normalize a user-supplied domain to its canonical blocklist key:
/// trimmed, lower-cased, without the optional trailing dot.
///
/// Rejects empty input, overlong names, empty labels, and characters
/// outside the letter/digit/hyphen/underscore set.
pub fn normalize_domain(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(CoreError::invalid_argument("domain must not be empty"));
    }
    if trimmed.len() > MAX_DOMAIN_LEN {
        return Err(CoreError::invalid_argument("domain is too long"));
    }

    let normalized = trimmed.to_ascii_lowercase();

    for label in normalized.split('.') {
        if label.is_empty() {
            return Err(CoreError::invalid_argument(
                "domain contains an empty label",
            ));
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(CoreError::invalid_argument(
                "domain contains invalid characters",
            ));
        }
    }

    Ok(normalized)
}
