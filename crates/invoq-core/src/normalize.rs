//! # Normalization Module
//!
//! Cleanup for values that passed through a spreadsheet-style store.
//!
//! ## Why This Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            What the store does to phone numbers and tax ids             │
//! │                                                                         │
//! │  Entered          Stored               Read back                       │
//! │  ─────────        ──────────────       ─────────────                   │
//! │  0812345678   →   812345678 (number) → "812345678"   lost leading 0    │
//! │  '0812345678  →   '0812345678 (text) → "'0812345678" apostrophe kept   │
//! │  0105536112233→   105536112233.0     → "105536112233.0"                │
//! │                                                                         │
//! │  These functions undo exactly that damage and nothing more.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions always return a string and never error: garbage in is
//! cleaned-garbage out, and acceptance is the caller's validation step.

use crate::TAX_ID_LEN;

/// Normalizes a raw phone value.
///
/// ## Contract
/// - Strips apostrophes, commas and hyphens anywhere in the value
/// - Trims surrounding whitespace
/// - If the result is all digits and exactly 9 long, prepends "0"
///   (restores a leading zero lost to numeric storage)
/// - Anything else is returned cleaned but otherwise unchanged
///
/// ## Example
/// ```rust
/// use invoq_core::normalize::normalize_phone;
///
/// assert_eq!(normalize_phone("812345678"), "0812345678");
/// assert_eq!(normalize_phone("'081-234-5678"), "0812345678");
/// assert_eq!(normalize_phone(""), "");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\'' | ',' | '-'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.len() == 9 && cleaned.chars().all(|c| c.is_ascii_digit()) {
        format!("0{cleaned}")
    } else {
        cleaned.to_string()
    }
}

/// Normalizes a raw tax-id value.
///
/// ## Contract
/// - Strips hyphens, spaces and apostrophes
/// - Strips one trailing ".0" (numeric coercion artifact)
/// - If the result is all digits and shorter than 13, left-pads zeros
///   to exactly 13
///
/// Exact 13-digit acceptance is a separate caller-side check
/// ([`crate::validation::validate_tax_id`]), not part of this function.
///
/// ## Example
/// ```rust
/// use invoq_core::normalize::normalize_tax_id;
///
/// assert_eq!(normalize_tax_id("105536112233.0"), "0105536112233");
/// assert_eq!(normalize_tax_id("1-2345-67890-12-3"), "1234567890123");
/// ```
pub fn normalize_tax_id(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '-' | ' ' | '\''))
        .collect();
    let cleaned = cleaned.strip_suffix(".0").unwrap_or(&cleaned);

    if !cleaned.is_empty()
        && cleaned.len() < TAX_ID_LEN
        && cleaned.chars().all(|c| c.is_ascii_digit())
    {
        format!("{cleaned:0>13}")
    } else {
        cleaned.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
