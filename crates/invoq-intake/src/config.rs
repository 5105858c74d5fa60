//! Intake configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `INVOQ_ADMIN_SECRET` - Password gating admin token creation
//! - `INVOQ_BASE_URL` - Public URL the shareable token links point at
//!
//! ## Optional
//! - `INVOQ_ITEM_DESCRIPTION` - Queue row item text
//!   (default: "อาหาร เครื่องดื่ม และเบเกอรี่")
//! - `INVOQ_DB_PATH` - SQLite database file path (default: ./invoq.db)
//!
//! ## Optional (push notifications - all three must be set together)
//! - `INVOQ_PUSH_ENDPOINT` - HTTP endpoint receiving new-request messages
//! - `INVOQ_PUSH_TOKEN` - Bearer token for the endpoint
//! - `INVOQ_PUSH_RECIPIENT` - Recipient id the endpoint delivers to

use secrecy::SecretString;
use thiserror::Error;

/// Default queue row item text: the shop sells food, drinks and bakery.
pub const DEFAULT_ITEM_DESCRIPTION: &str = "อาหาร เครื่องดื่ม และเบเกอรี่";

const DEFAULT_DB_PATH: &str = "./invoq.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Intake application configuration.
#[derive(Clone)]
pub struct IntakeConfig {
    /// Password gating admin token creation
    pub admin_secret: SecretString,
    /// Public base URL for shareable token links
    pub public_base_url: String,
    /// Item text written on every queue row
    pub item_description: String,
    /// SQLite database file path
    pub db_path: String,
    /// Push notification configuration (optional - disables push when absent)
    pub push: Option<PushConfig>,
}

impl std::fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("admin_secret", &"[REDACTED]")
            .field("public_base_url", &self.public_base_url)
            .field("item_description", &self.item_description)
            .field("db_path", &self.db_path)
            .field("push", &self.push)
            .finish()
    }
}

/// Push notification endpoint configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct PushConfig {
    /// HTTP endpoint receiving new-request messages
    pub endpoint: String,
    /// Bearer token for the endpoint
    pub token: SecretString,
    /// Recipient id the endpoint delivers to
    pub recipient: String,
}

impl std::fmt::Debug for PushConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl PushConfig {
    /// Load push configuration from environment.
    ///
    /// Returns `Ok(None)` if no push variables are set (push disabled).
    /// All three variables must be set together.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let endpoint = get_optional_env("INVOQ_PUSH_ENDPOINT");
        let token = get_optional_env("INVOQ_PUSH_TOKEN");
        let recipient = get_optional_env("INVOQ_PUSH_RECIPIENT");

        match (endpoint, token, recipient) {
            (Some(endpoint), Some(token), Some(recipient)) => Ok(Some(Self {
                endpoint,
                token: SecretString::from(token),
                recipient,
            })),
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "INVOQ_PUSH_*".to_string(),
                "INVOQ_PUSH_ENDPOINT, INVOQ_PUSH_TOKEN and INVOQ_PUSH_RECIPIENT must be set together"
                    .to_string(),
            )),
        }
    }
}

impl IntakeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or the push
    /// variables are only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            admin_secret: get_required_secret("INVOQ_ADMIN_SECRET")?,
            public_base_url: get_required_env("INVOQ_BASE_URL")?,
            item_description: get_env_or_default("INVOQ_ITEM_DESCRIPTION", DEFAULT_ITEM_DESCRIPTION),
            db_path: get_env_or_default("INVOQ_DB_PATH", DEFAULT_DB_PATH),
            push: PushConfig::from_env()?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> IntakeConfig {
        IntakeConfig {
            admin_secret: SecretString::from("kX9#mQ2$vL7@nB4!"),
            public_base_url: "https://invoice.example.com".to_string(),
            item_description: DEFAULT_ITEM_DESCRIPTION.to_string(),
            db_path: "./invoq.db".to_string(),
            push: Some(PushConfig {
                endpoint: "https://push.example.com/send".to_string(),
                token: SecretString::from("tok-super-secret"),
                recipient: "U12345".to_string(),
            }),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = test_config();
        let debug_output = format!("{config:?}");

        // Public fields should be visible
        assert!(debug_output.contains("https://invoice.example.com"));
        assert!(debug_output.contains("U12345"));

        // Secret fields should be redacted
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kX9#mQ2$vL7@nB4!"));
        assert!(!debug_output.contains("tok-super-secret"));
    }

    #[test]
    fn test_default_item_description() {
        assert_eq!(DEFAULT_ITEM_DESCRIPTION, "อาหาร เครื่องดื่ม และเบเกอรี่");
    }
}
