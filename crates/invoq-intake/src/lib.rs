//! # invoq-intake: Intake Orchestration for Invoq
//!
//! This crate wires invoq-core's pure logic to invoq-db's stores and the
//! outside world: the form controller, admin token issuance, push
//! notification and environment configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    invoq-intake (THIS CRATE)                            │
//! │                                                                         │
//! │   ┌──────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────────┐   │
//! │   │ controller   │  │   admin   │  │  notify   │  │    config     │   │
//! │   │ open/prefill │  │  create   │  │  HTTP     │  │  env + .env   │   │
//! │   │ submit       │  │  token    │  │  push     │  │  secrets      │   │
//! │   └──────┬───────┘  └─────┬─────┘  └─────┬─────┘  └───────────────┘   │
//! │          │                │              │                             │
//! │          ▼                ▼              ▼                             │
//! │     invoq-core logic + invoq-db stores + push endpoint                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use invoq_db::{Database, DbConfig};
//! use invoq_intake::{HttpPushNotifier, IntakeConfig, IntakeController, NoopNotifier};
//!
//! invoq_intake::telemetry::init();
//! let config = IntakeConfig::from_env()?;
//! let db = Database::new(DbConfig::new(&config.db_path)).await?;
//!
//! let notifier: Arc<dyn invoq_intake::Notifier> = match &config.push {
//!     Some(push) => Arc::new(HttpPushNotifier::new(push)),
//!     None => Arc::new(NoopNotifier),
//! };
//!
//! let controller = IntakeController::new(db, notifier, config).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod config;
pub mod controller;
pub mod error;
pub mod notify;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use admin::{create_token, AdminOutcome, TokenHandout};
pub use config::{ConfigError, IntakeConfig, PushConfig};
pub use controller::{
    EntryView, IntakeController, Prefill, RejectReason, SubmissionForm, SubmissionOutcome, Warning,
};
pub use error::{IntakeError, IntakeResult};
pub use notify::{HttpPushNotifier, NoopNotifier, Notifier, NotifyError};
