//! # Queue Repository
//!
//! Append-only storage for submitted invoice requests.
//!
//! Rows are written once with status 'pending' and never mutated by this
//! system; a human process downstream issues the invoices and owns any
//! later status changes (out of scope here).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use invoq_core::QueueEntry;

/// Repository for the issuance queue.
#[derive(Debug, Clone)]
pub struct QueueRepository {
    pool: SqlitePool,
}

impl QueueRepository {
    /// Creates a new QueueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        QueueRepository { pool }
    }

    /// Appends a submitted request to the queue.
    ///
    /// This is the authoritative write of a submission: once it succeeds
    /// the submission counts as accepted even if the follow-up writes
    /// (customer append, token mark-used) fail.
    pub async fn append(&self, entry: &QueueEntry) -> DbResult<()> {
        debug!(tax_id = %entry.tax_id, price_cents = entry.price_cents, "Appending queue row");

        sqlx::query(
            r#"
            INSERT INTO queue (
                created_at, name, tax_id,
                address_line_1, address_line_2, phone,
                item_description, quantity, price_cents, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(entry.created_at)
        .bind(&entry.name)
        .bind(&entry.tax_id)
        .bind(&entry.address_line_1)
        .bind(&entry.address_line_2)
        .bind(&entry.phone)
        .bind(&entry.item_description)
        .bind(entry.quantity)
        .bind(entry.price_cents)
        .bind(entry.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads the full queue in append order (for diagnostics and tests).
    pub async fn list_all(&self) -> DbResult<Vec<QueueEntry>> {
        let entries = sqlx::query_as::<_, QueueEntry>(
            r#"
            SELECT created_at, name, tax_id,
                   address_line_1, address_line_2, phone,
                   item_description, quantity, price_cents, status
            FROM queue
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Counts queue rows (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use invoq_core::QueueStatus;

    fn entry(name: &str, price_cents: i64) -> QueueEntry {
        QueueEntry {
            created_at: Utc::now(),
            name: name.to_string(),
            tax_id: "1234567890123".to_string(),
            address_line_1: "99/9 หมู่ 1".to_string(),
            address_line_2: "นนทบุรี 11120".to_string(),
            phone: "0812345678".to_string(),
            item_description: "อาหาร เครื่องดื่ม และเบเกอรี่".to_string(),
            quantity: 1,
            price_cents,
            status: QueueStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_append_and_list_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.queue();

        repo.append(&entry("A", 50000)).await.unwrap();
        repo.append(&entry("B", 30000)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "A");
        assert_eq!(all[0].price_cents, 50000);
        assert_eq!(all[0].quantity, 1);
        assert_eq!(all[0].status, QueueStatus::Pending);
        assert_eq!(all[1].name, "B");
    }

    #[tokio::test]
    async fn test_count_tracks_appends() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.queue();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.append(&entry("A", 50000)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
