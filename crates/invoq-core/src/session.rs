//! # Session State & Duplicate-Submission Guard
//!
//! One `SessionState` per client session, passed explicitly into and out of
//! the controller, never ambient globals.
//!
//! ## How the Guard Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Submit pressed (again, e.g. after a page reload re-posts the form)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  signature = tax_id + "_" + amount + "_" + token_id                    │
//! │       │                                                                 │
//! │       ├── equals last accepted signature? → reject, zero store writes  │
//! │       │                                                                 │
//! │       └── otherwise proceed; remember on success                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scope: a single client session only. Duplicates from a different session
//! or after a session reset are NOT detected; this is an explicit, accepted
//! limitation of this design.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::normalize::normalize_tax_id;

/// Builds the duplicate-detection signature for a submission.
///
/// The tax id is normalized and the amount uses its compact form, so the
/// same submission always produces the same signature no matter how the
/// values were typed.
///
/// ## Example
/// ```rust
/// use invoq_core::money::Money;
/// use invoq_core::session::submission_signature;
///
/// let sig = submission_signature("1234567890123", Money::from_baht(500), "T1");
/// assert_eq!(sig, "1234567890123_500_T1");
/// ```
pub fn submission_signature(tax_id: &str, amount: Money, token_id: &str) -> String {
    format!(
        "{}_{}_{}",
        normalize_tax_id(tax_id),
        amount.compact(),
        token_id
    )
}

/// Per-session mutable state carried across repeated page loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Signature of the most recently accepted submission in this session.
    last_signature: Option<String>,
}

impl SessionState {
    /// Creates a fresh session with no remembered submission.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Checks whether a signature repeats the last accepted submission.
    pub fn is_duplicate(&self, signature: &str) -> bool {
        self.last_signature.as_deref() == Some(signature)
    }

    /// Remembers a signature after its submission completed successfully.
    ///
    /// Call only on success: a rejected or failed submission must remain
    /// re-submittable.
    pub fn remember(&mut self, signature: String) {
        self.last_signature = Some(signature);
    }

    /// The last accepted signature, if any.
    pub fn last_signature(&self) -> Option<&str> {
        self.last_signature.as_deref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
