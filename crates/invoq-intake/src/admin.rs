//! # Admin Token Issuance
//!
//! The shopkeeper side of the flow: create a single-use token bound to the
//! amount just charged, and hand back a shareable link for the customer.
//!
//! ## Issuance Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopkeeper enters password + amount                                    │
//! │       │                                                                 │
//! │       ├── password != configured secret → Denied (nothing created)     │
//! │       ├── amount unparseable / not positive → InvalidAmount            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generate opaque id ──► INSERT Active token ──► link "{base}?t={id}"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The password check is plain string equality against the configured
//! secret: one shared shopkeeper password, no accounts, no hashing. The
//! link is what gets rendered as a QR code downstream; encoding the image
//! is out of scope here.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::IntakeConfig;
use crate::error::IntakeResult;
use invoq_core::validation::validate_amount;
use invoq_core::{Money, Token, TokenStatus};
use invoq_db::{Database, DbError};

/// Length of a generated token id.
const TOKEN_ID_LEN: usize = 8;

/// Attempts before giving up on an id collision.
const MAX_ID_ATTEMPTS: usize = 3;

/// A freshly created token plus its shareable link.
#[derive(Debug, Clone)]
pub struct TokenHandout {
    /// The stored token row.
    pub token: Token,
    /// Link the customer opens: `{base_url}?t={id}`.
    pub link: String,
}

/// Outcome of an admin token-creation attempt.
#[derive(Debug)]
pub enum AdminOutcome {
    /// Token created and stored; hand the link to the customer.
    Created(TokenHandout),

    /// Password did not match the configured secret. Nothing created.
    Denied,

    /// The amount could not be parsed or was not positive. Nothing created.
    InvalidAmount { reason: String },
}

/// Creates a new Active token for the given amount.
///
/// `amount_input` is the amount as the shopkeeper typed it ("500",
/// "500.50"); it is parsed with the same rules customer-facing amounts use.
pub async fn create_token(
    db: &Database,
    config: &IntakeConfig,
    password: &str,
    amount_input: &str,
) -> IntakeResult<AdminOutcome> {
    if password != config.admin_secret.expose_secret() {
        warn!("Token creation denied: wrong password");
        return Ok(AdminOutcome::Denied);
    }

    let amount: Money = match amount_input.parse() {
        Ok(amount) => amount,
        Err(e) => {
            return Ok(AdminOutcome::InvalidAmount {
                reason: e.to_string(),
            });
        }
    };
    if let Err(e) = validate_amount(amount) {
        return Ok(AdminOutcome::InvalidAmount {
            reason: e.to_string(),
        });
    }

    // Collisions on an 8-char alphanumeric id are vanishingly rare; retry a
    // couple of times rather than pre-checking.
    let mut last_err = None;
    for _ in 0..MAX_ID_ATTEMPTS {
        let token = Token {
            id: generate_token_id(),
            amount_cents: amount.satang(),
            status: TokenStatus::Active,
            created_at: Utc::now(),
            used_at: None,
        };

        match db.tokens().insert(&token).await {
            Ok(()) => {
                let link = token_link(&config.public_base_url, &token.id);
                info!(id = %token.id, amount = %amount, "Token created");
                return Ok(AdminOutcome::Created(TokenHandout { token, link }));
            }
            Err(DbError::UniqueViolation { .. }) => {
                last_err = Some(DbError::UniqueViolation {
                    field: "tokens.id".to_string(),
                    value: "generated id".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(last_err
        .unwrap_or_else(|| DbError::Internal("token id generation exhausted".to_string()))
        .into())
}

/// Builds the shareable link embedding a token id.
pub fn token_link(base_url: &str, token_id: &str) -> String {
    format!("{base_url}?t={token_id}")
}

/// Generates an opaque alphanumeric token id.
fn generate_token_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_ID_LEN)
        .map(char::from)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
