//! # Token Gate
//!
//! Classifies a presented token into the state that drives the form.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Token Gate States                                  │
//! │                                                                         │
//! │  (shopkeeper creates token)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ┌────────┐   mark-used after queue write   ┌────────┐                │
//! │   │ Active │ ──────────────────────────────► │  Used  │ (terminal)     │
//! │   └────────┘                                 └────────┘                │
//! │       │                                                                 │
//! │       │ unlocks the lock amount for the form                           │
//! │                                                                         │
//! │   ┌──────────┐                                                         │
//! │   │ NotFound │ (terminal) ← no store row matches the presented id      │
//! │   └──────────┘                                                         │
//! │                                                                         │
//! │  No other states exist. No "Expired", no TTL: tokens remain Active     │
//! │  indefinitely until consumed.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The Active→Used transition is enforced with an unsynchronized
//! read-then-write against the token store: two near-simultaneous
//! presentations of one token can both see Active before either mark-used
//! call lands. That race is an accepted limitation, not guaranteed away.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Token, TokenStatus};

/// Outcome of presenting a token id against the token store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenGate {
    /// Token exists and is unconsumed; the form opens with this lock amount.
    Active {
        /// The payment amount bound to the token at creation time.
        amount: Money,
    },

    /// Token was already consumed. Terminal; the form stays blocked.
    Used,

    /// No store row matches the presented id. Terminal; the form stays blocked.
    NotFound,
}

impl TokenGate {
    /// Classifies a fetched store row (or its absence).
    pub fn from_record(record: Option<&Token>) -> Self {
        match record {
            None => TokenGate::NotFound,
            Some(token) => match token.status {
                TokenStatus::Active => TokenGate::Active {
                    amount: token.amount(),
                },
                TokenStatus::Used => TokenGate::Used,
            },
        }
    }

    /// Whether the gate admits a submission.
    pub fn is_open(&self) -> bool {
        matches!(self, TokenGate::Active { .. })
    }

    /// The unlocked lock amount, when the gate is open.
    pub fn unlocked_amount(&self) -> Option<Money> {
        match self {
            TokenGate::Active { amount } => Some(*amount),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
