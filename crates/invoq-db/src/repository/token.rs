//! # Token Repository
//!
//! Storage operations for single-use payment tokens.
//!
//! ## Token Lifecycle in the Store
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. INSERT (shopkeeper action)                                          │
//! │     └── insert() → row { status: 'active', used_at: NULL }             │
//! │                                                                         │
//! │  2. LOOKUP (every page view carrying the token)                        │
//! │     └── get_by_id() → Option<Token> → TokenGate                        │
//! │                                                                         │
//! │  3. MARK USED (after a successful queue write)                         │
//! │     └── mark_used() → status = 'used', used_at = now                   │
//! │                                                                         │
//! │  Tokens are never deleted.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `mark_used` carries NO status precondition: the single-use rule is an
//! unsynchronized read-then-write, best-effort by design. See DESIGN.md.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use invoq_core::Token;

/// Repository for token store operations.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: SqlitePool,
}

impl TokenRepository {
    /// Creates a new TokenRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TokenRepository { pool }
    }

    /// Inserts a freshly created token.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - token id already exists
    pub async fn insert(&self, token: &Token) -> DbResult<()> {
        debug!(id = %token.id, amount_cents = token.amount_cents, "Inserting token");

        sqlx::query(
            r#"
            INSERT INTO tokens (id, amount_cents, status, created_at, used_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&token.id)
        .bind(token.amount_cents)
        .bind(token.status)
        .bind(token.created_at)
        .bind(token.used_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a token by its opaque id.
    ///
    /// ## Returns
    /// * `Ok(Some(Token))` - token found (any status)
    /// * `Ok(None)` - no row matches the presented id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Token>> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT id, amount_cents, status, created_at, used_at
            FROM tokens
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    /// Marks a token as used.
    ///
    /// Permanent, external, and NOT transactional with the queue write that
    /// preceded it: if this call fails after the queue write succeeded, the
    /// token remains Active and reusable. That inconsistency window is
    /// accepted; callers surface it as a warning, not an error.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - token id doesn't exist
    pub async fn mark_used(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Marking token used");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE tokens
            SET status = 'used', used_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Token", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use invoq_core::TokenStatus;

    fn token(id: &str, amount_cents: i64) -> Token {
        Token {
            id: id.to_string(),
            amount_cents,
            status: TokenStatus::Active,
            created_at: Utc::now(),
            used_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tokens();

        repo.insert(&token("T1", 50000)).await.unwrap();

        let fetched = repo.get_by_id("T1").await.unwrap().unwrap();
        assert_eq!(fetched.id, "T1");
        assert_eq!(fetched.amount_cents, 50000);
        assert_eq!(fetched.status, TokenStatus::Active);
        assert!(fetched.used_at.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_token_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.tokens().get_by_id("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_used_flips_status_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tokens();

        repo.insert(&token("T1", 50000)).await.unwrap();
        repo.mark_used("T1").await.unwrap();

        let fetched = repo.get_by_id("T1").await.unwrap().unwrap();
        assert_eq!(fetched.status, TokenStatus::Used);
        assert!(fetched.used_at.is_some());
    }

    #[tokio::test]
    async fn test_mark_used_missing_token_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.tokens().mark_used("NOPE").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_token_id_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tokens();

        repo.insert(&token("T1", 50000)).await.unwrap();
        let err = repo.insert(&token("T1", 60000)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
