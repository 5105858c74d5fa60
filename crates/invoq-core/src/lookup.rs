//! # Customer Lookup
//!
//! Finds a previously seen customer by tax id over a full store snapshot.
//!
//! ## Why a Linear Scan?
//! The customer store is small (one shop's repeat customers) and its tax-id
//! column may hold un-normalized values, so every entry is normalized at
//! comparison time rather than indexed. This is a known bottleneck if the
//! store grows; do not re-engineer without a request.

use crate::normalize::normalize_tax_id;
use crate::types::CustomerRecord;

/// Returns the first customer (insertion order) whose normalized tax id
/// matches the normalized query, or `None`.
///
/// When duplicate rows exist for one tax id the earliest row wins, so the
/// oldest known details pre-fill the form.
///
/// ## Example
/// ```rust
/// use invoq_core::lookup::find_customer;
/// use invoq_core::types::CustomerRecord;
///
/// let store = vec![CustomerRecord {
///     name: "บริษัท ตัวอย่าง จำกัด".to_string(),
///     tax_id: "105536112233.0".to_string(), // numeric coercion artifact
///     address_line_1: String::new(),
///     address_line_2: String::new(),
///     phone: String::new(),
/// }];
///
/// assert!(find_customer("0105536112233", &store).is_some());
/// assert!(find_customer("9999999999999", &store).is_none());
/// ```
pub fn find_customer<'a>(
    tax_id: &str,
    customers: &'a [CustomerRecord],
) -> Option<&'a CustomerRecord> {
    let key = normalize_tax_id(tax_id);
    if key.is_empty() {
        return None;
    }

    customers
        .iter()
        .find(|record| normalize_tax_id(&record.tax_id) == key)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, tax_id: &str) -> CustomerRecord {
        CustomerRecord {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            address_line_1: String::new(),
            address_line_2: String::new(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_not_found_on_empty_store() {
        assert!(find_customer("1234567890123", &[]).is_none());
    }

    #[test]
    fn test_not_found_when_no_row_matches() {
        let store = vec![record("A", "1111111111111")];
        assert!(find_customer("2222222222222", &store).is_none());
    }

    #[test]
    fn test_first_match_wins_among_duplicates() {
        let store = vec![
            record("Old Name Co", "1234567890123"),
            record("New Name Co", "1234567890123"),
        ];
        let found = find_customer("1234567890123", &store).unwrap();
        assert_eq!(found.name, "Old Name Co");
    }

    #[test]
    fn test_both_sides_normalized() {
        // Store holds a coerced numeric value, query holds hyphens
        let store = vec![record("A", "105536112233.0")];
        let found = find_customer("0-1055-36112-23-3", &store);
        assert!(found.is_some());
    }

    #[test]
    fn test_empty_query_never_matches() {
        let store = vec![record("A", "")];
        assert!(find_customer("", &store).is_none());
    }
}
