//! # Push Notifier
//!
//! Tells the shopkeeper a new invoice request landed.
//!
//! Notification is strictly fire-and-forget: the queue row is already
//! written when the push goes out, so a delivery failure is logged and
//! surfaced as a soft warning on the accepted submission, never retried
//! and never an error.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::PushConfig;

/// Errors from a push delivery attempt.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The HTTP request itself failed (DNS, connect, timeout).
    #[error("push request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("push endpoint returned status {status}")]
    Endpoint { status: u16 },
}

/// Delivery seam for new-request notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one message. Best-effort; callers treat `Err` as a warning.
    async fn push(&self, message: &str) -> Result<(), NotifyError>;
}

/// HTTP push notifier posting to a configured endpoint with a bearer token.
#[derive(Clone)]
pub struct HttpPushNotifier {
    client: Client,
    endpoint: String,
    token: SecretString,
    recipient: String,
}

impl std::fmt::Debug for HttpPushNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPushNotifier")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

impl HttpPushNotifier {
    /// Creates a notifier from push configuration.
    pub fn new(config: &PushConfig) -> Self {
        HttpPushNotifier {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
            recipient: config.recipient.clone(),
        }
    }
}

#[async_trait]
impl Notifier for HttpPushNotifier {
    async fn push(&self, message: &str) -> Result<(), NotifyError> {
        #[derive(serde::Serialize)]
        struct PushMessage<'a> {
            to: &'a str,
            message: &'a str,
        }

        let body = PushMessage {
            to: &self.recipient,
            message,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Push request failed");
                NotifyError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(status, "Push endpoint rejected message");
            return Err(NotifyError::Endpoint { status });
        }

        debug!(recipient = %self.recipient, "Push notification delivered");
        Ok(())
    }
}

/// Notifier that silently drops every message. For tests and for running
/// without push configuration.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn push(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_notifier_always_succeeds() {
        let notifier = NoopNotifier;
        assert!(notifier.push("hello").await.is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let notifier = HttpPushNotifier::new(&PushConfig {
            endpoint: "https://push.example.com/send".to_string(),
            token: SecretString::from("tok-super-secret"),
            recipient: "U12345".to_string(),
        });

        let debug_output = format!("{notifier:?}");
        assert!(debug_output.contains("https://push.example.com/send"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok-super-secret"));
    }
}
