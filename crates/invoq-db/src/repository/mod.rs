//! # Repository Module
//!
//! Storage repository implementations for invoq.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The stores behave like spreadsheet tabs: positional rows accessed     │
//! │  with read-all, append-row, find-by-value and update-field. Each       │
//! │  repository exposes exactly that surface and nothing more, so the      │
//! │  backing store stays swappable without touching normalization or       │
//! │  validation logic.                                                     │
//! │                                                                         │
//! │  IntakeController                                                      │
//! │       │  db.tokens().get_by_id("T1")                                   │
//! │       ▼                                                                 │
//! │  TokenRepository ──► SQL ──► SQLite                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`token::TokenRepository`] - Token creation, lookup and mark-used
//! - [`customer::CustomerRepository`] - Customer snapshot and append
//! - [`queue::QueueRepository`] - Append-only issuance queue
//! - [`postal::PostalRepository`] - Bulk postal reference access

pub mod customer;
pub mod postal;
pub mod queue;
pub mod token;
