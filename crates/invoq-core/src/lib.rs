//! # invoq-core: Pure Business Logic for invoq
//!
//! This crate is the heart of the invoq invoice-request intake flow. It
//! contains all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         invoq Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  invoq-intake (orchestration)                   │   │
//! │  │    open session ──► prefill ──► submit ──► notify               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ invoq-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │  address  │  │   token   │  │  session  │  │   │
//! │  │   │ phone/tax │  │  splitter │  │   gate    │  │   dedup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    invoq-db (Storage Layer)                     │   │
//! │  │          SQLite stores: tokens, customers, queue, postal        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain row types (Token, CustomerRecord, QueueEntry, ...)
//! - [`money`] - Money type with integer satang arithmetic (no floating point!)
//! - [`normalize`] - Phone and tax-id cleanup
//! - [`address`] - Approximate Thai address splitting
//! - [`lookup`] - Customer lookup over a store snapshot
//! - [`token`] - Single-use token gate
//! - [`session`] - Session state and duplicate-submission guard
//! - [`postal`] - Postal-code reference directory
//! - [`validation`] - Field validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in satang (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod error;
pub mod lookup;
pub mod money;
pub mod normalize;
pub mod postal;
pub mod session;
pub mod token;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use address::{split_address, SplitAddress};
pub use error::ValidationError;
pub use lookup::find_customer;
pub use money::{Money, ParseMoneyError};
pub use normalize::{normalize_phone, normalize_tax_id};
pub use postal::PostalDirectory;
pub use session::{submission_signature, SessionState};
pub use token::TokenGate;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of a Thai taxpayer identification number.
///
/// Shorter all-digit values are assumed to have lost leading zeros to
/// numeric coercion upstream and are zero-padded back to this length.
pub const TAX_ID_LEN: usize = 13;

/// Maximum accepted length for a customer / company name.
pub const MAX_NAME_LEN: usize = 200;
