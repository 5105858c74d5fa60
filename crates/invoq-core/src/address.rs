//! # Address Splitter
//!
//! Approximate splitting of Thai free-text addresses stored as two blobs.
//!
//! ## What It Does
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input fragments (as stored per customer):                              │
//! │    line 1: "99/9 หมู่ 1 ตำบลบางพูด"                                      │
//! │    line 2: "อำเภอปากเกร็ด นนทบุรี 11120"                                  │
//! │                                                                         │
//! │  Output:                                                                │
//! │    street:   "99/9 หมู่ 1"                                               │
//! │    district: "ตำบลบางพูด อำเภอปากเกร็ด"                                    │
//! │    province: "นนทบุรี 11120"                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## This Is a Heuristic
//! Marker-led token groups (ตำบล, แขวง, อำเภอ, เขต and the abbreviations
//! ต., อ.) are moved from their source fragment into the district output.
//! This is lossy best-effort text surgery, NOT a guaranteed parse:
//! ambiguous or malformed input may mis-split, and markers that never
//! appear leave the district output empty. Keep expectations approximate.

use serde::{Deserialize, Serialize};

/// District / sub-district markers, longest spellings first.
///
/// The full words must precede the abbreviations so that a token like
/// "ตำบลบางพูด" matches "ตำบล" and not a shorter prefix.
const DISTRICT_MARKERS: &[&str] = &["ตำบล", "แขวง", "อำเภอ", "เขต", "ต.", "อ."];

/// Result of splitting the two stored address fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAddress {
    /// House / street text with marker groups removed.
    pub street: String,

    /// Extracted district / sub-district text, in encounter order
    /// (line 1 first). Empty when no marker was found.
    pub district: String,

    /// Province / postal text with marker groups removed.
    pub province: String,
}

/// Splits two address fragments into street, district and province parts.
///
/// Tokens starting with a district marker move to the district output.
/// A bare marker token ("ตำบล" followed by a space) also consumes the
/// following token as the district name.
///
/// ## Example
/// ```rust
/// use invoq_core::address::split_address;
///
/// let split = split_address("99/9 หมู่ 1 ตำบลบางพูด", "อำเภอปากเกร็ด นนทบุรี 11120");
/// assert_eq!(split.street, "99/9 หมู่ 1");
/// assert!(split.district.contains("ตำบลบางพูด"));
/// assert!(split.district.contains("อำเภอปากเกร็ด"));
/// assert_eq!(split.province, "นนทบุรี 11120");
/// ```
pub fn split_address(line_1: &str, line_2: &str) -> SplitAddress {
    let mut district_parts: Vec<String> = Vec::new();

    let street = extract_marker_groups(line_1, &mut district_parts);
    let province = extract_marker_groups(line_2, &mut district_parts);

    SplitAddress {
        street,
        district: district_parts.join(" "),
        province,
    }
}

/// Removes marker-led token groups from a fragment, pushing them onto
/// `district_out`, and returns the remaining text re-joined with spaces.
fn extract_marker_groups(fragment: &str, district_out: &mut Vec<String>) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut tokens = fragment.split_whitespace();

    while let Some(token) = tokens.next() {
        let marker = DISTRICT_MARKERS.iter().find(|m| token.starts_with(*m));
        match marker {
            Some(m) if token == *m => {
                // Bare marker: the district name is the next token
                match tokens.next() {
                    Some(name) => district_out.push(format!("{token}{name}")),
                    None => district_out.push(token.to_string()),
                }
            }
            Some(_) => district_out.push(token.to_string()),
            None => kept.push(token),
        }
    }

    kept.join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================
