//! # invoq-db: Database Layer for Invoq
//!
//! This crate provides database access for the invoice-request intake flow.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoq Intake Data Flow                            │
//! │                                                                         │
//! │  IntakeController (invoq-intake)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     invoq-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (token.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ TokenRepo     │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ CustomerRepo  │    │              │  │   │
//! │  │   │ Management    │    │ QueueRepo     │    │              │  │   │
//! │  │   │               │    │ PostalRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./invoq.db (tokens, customers, queue, postal_codes)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (token, customer, queue, postal)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use invoq_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/invoq.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let token = db.tokens().get_by_id("a8Xk2mQ4").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::postal::PostalRepository;
pub use repository::queue::QueueRepository;
pub use repository::token::TokenRepository;
