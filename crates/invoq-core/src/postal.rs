//! # Postal Directory
//!
//! Process-lifetime cache over the public postal-code reference dataset.
//!
//! The dataset is fetched in bulk exactly once (by the storage layer) and
//! indexed here; one postal code maps to multiple entries because the
//! sub-district is ambiguous within a code. Read-only after construction.

use std::collections::HashMap;

use crate::types::PostalEntry;

/// Index of postal code → all matching (sub-district, district, province)
/// tuples.
#[derive(Debug, Clone, Default)]
pub struct PostalDirectory {
    by_code: HashMap<String, Vec<PostalEntry>>,
}

impl PostalDirectory {
    /// Builds the directory from a bulk snapshot, preserving dataset order
    /// within each code.
    pub fn from_entries(entries: Vec<PostalEntry>) -> Self {
        let mut by_code: HashMap<String, Vec<PostalEntry>> = HashMap::new();
        for entry in entries {
            by_code
                .entry(entry.postal_code.clone())
                .or_default()
                .push(entry);
        }
        PostalDirectory { by_code }
    }

    /// All entries for a postal code, or an empty slice.
    pub fn lookup(&self, postal_code: &str) -> &[PostalEntry] {
        self.by_code
            .get(postal_code.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct postal codes in the directory.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the directory holds no codes at all (e.g. dataset not loaded).
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
