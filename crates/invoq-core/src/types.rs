//! # Domain Types
//!
//! Row types for the four external stores.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Token       │   │ CustomerRecord  │   │   QueueEntry    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  name           │   │  created_at     │       │
//! │  │  amount_cents   │   │  tax_id         │   │  name, tax_id   │       │
//! │  │  status         │   │  address lines  │   │  address, phone │       │
//! │  │  created_at     │   │  phone          │   │  item, qty      │       │
//! │  │  used_at        │   │                 │   │  price, status  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PostalEntry   │   │   TokenStatus   │   │   QueueStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  postal_code    │   │  Active         │   │  Pending        │       │
//! │  │  sub_district   │   │  Used           │   │                 │       │
//! │  │  district       │   │                 │   │                 │       │
//! │  │  province       │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stores are positional and append-mostly: these structs carry exactly
//! the columns the stores hold, in store order, with no synthetic ids beyond
//! the token's own opaque id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Token
// =============================================================================

/// Lifecycle status of a payment token.
///
/// Transitions `Active → Used` at most once, on the first successful
/// customer submission referencing the token. There is no expiry: tokens
/// remain Active indefinitely until consumed. Never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum TokenStatus {
    /// Created by shopkeeper action; unlocks the lock amount.
    Active,
    /// Terminal; any further presentation is rejected.
    Used,
}

/// A single-use payment token created by the shopkeeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Token {
    /// Opaque unique identifier, embedded in the shareable link.
    pub id: String,

    /// Lock amount in satang, displayed read-only to the customer.
    pub amount_cents: i64,

    /// Lifecycle status.
    pub status: TokenStatus,

    /// When the shopkeeper created the token.
    pub created_at: DateTime<Utc>,

    /// When the token was consumed, if it has been.
    pub used_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Returns the lock amount as a Money type.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_satang(self.amount_cents)
    }

    /// Checks whether the token still unlocks the form.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == TokenStatus::Active
    }
}

// =============================================================================
// Customer Record
// =============================================================================

/// A previously seen customer, used to pre-fill repeat submissions.
///
/// The store does not enforce uniqueness on `tax_id`: callers check before
/// insert (best-effort, not atomic), and later duplicate submissions may
/// create additional rows. There is no update-in-place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CustomerRecord {
    /// Taxpayer / company name.
    pub name: String,

    /// Taxpayer identification number (13 digits, zero-padded).
    pub tax_id: String,

    /// House / street fragment of the address.
    pub address_line_1: String,

    /// District / province fragment of the address (or branch info).
    pub address_line_2: String,

    /// Phone number (digits only, leading zero preserved).
    pub phone: String,
}

// =============================================================================
// Queue Entry
// =============================================================================

/// Issuance status of a queued invoice request.
///
/// This system only ever writes `Pending`; the downstream manual process
/// owns every later transition, out of scope here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum QueueStatus {
    /// Awaiting manual invoice issuance.
    Pending,
}

/// A submitted invoice request awaiting manual issuance.
///
/// Append-only; never mutated here. Field order matches the store exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct QueueEntry {
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,

    /// Taxpayer / company name as submitted.
    pub name: String,

    /// Normalized taxpayer identification number.
    pub tax_id: String,

    /// House / street fragment.
    pub address_line_1: String,

    /// District / province fragment (or branch info).
    pub address_line_2: String,

    /// Normalized phone number.
    pub phone: String,

    /// Fixed item description (e.g. food & beverage line).
    pub item_description: String,

    /// Always 1 in this flow.
    pub quantity: i64,

    /// Lock amount in satang.
    pub price_cents: i64,

    /// Always `Pending` at append time.
    pub status: QueueStatus,
}

impl QueueEntry {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_satang(self.price_cents)
    }
}

// =============================================================================
// Postal Entry
// =============================================================================

/// One row of the public postal-code reference dataset.
///
/// Read-only; one postal code maps to multiple entries (the sub-district
/// is ambiguous within a code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PostalEntry {
    /// Five-digit postal code.
    pub postal_code: String,

    /// Sub-district (ตำบล / แขวง).
    pub sub_district: String,

    /// District (อำเภอ / เขต).
    pub district: String,

    /// Province.
    pub province: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_amount_and_activity() {
        let token = Token {
            id: "T1".to_string(),
            amount_cents: 50000,
            status: TokenStatus::Active,
            created_at: Utc::now(),
            used_at: None,
        };
        assert_eq!(token.amount(), Money::from_satang(50000));
        assert!(token.is_active());

        let used = Token {
            status: TokenStatus::Used,
            ..token
        };
        assert!(!used.is_active());
    }

    #[test]
    fn test_status_serde_wire_form() {
        assert_eq!(
            serde_json::to_string(&TokenStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&QueueStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
