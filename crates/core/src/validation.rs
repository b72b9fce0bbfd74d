//! Contact address sanity checks.
//!
//! These are coarse shape filters run right before a send, not deliverability
//! guarantees. Stored contact strings are free text, so every send path must
//! call them. Malformed input returns `false`; nothing here panics or errors.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// `+`, 1-3 digit country code, 7-14 digit subscriber number.
pub const PHONE_PATTERN: &str = r"^\+[0-9]{1,3}[0-9]{7,14}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Separators users commonly type into phone numbers.
static PHONE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]").expect("valid regex"));

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Return `true` if `address` looks like `local@domain.tld`.
///
/// Surrounding whitespace is ignored.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address.trim())
}

/// Return `true` if `number` is a loose E.164 number once spaces and hyphens
/// are removed, e.g. `+81 90-1234-5678`.
pub fn is_valid_phone(number: &str) -> bool {
    let compact = PHONE_SEPARATOR_RE.replace_all(number, "");
    PHONE_RE.is_match(&compact)
}
