//! # Customer Repository
//!
//! Storage operations for the customer store.
//!
//! The store is append-mostly with ad hoc dedup: there is no unique index
//! on tax_id and no update-in-place. Lookup happens in invoq-core over the
//! full snapshot ([`invoq_core::lookup::find_customer`]) because stored tax
//! ids may be un-normalized; this repository only reads and appends rows.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use invoq_core::CustomerRecord;

/// Repository for customer store operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Reads the full store snapshot in insertion order.
    ///
    /// The caller runs the normalized lookup over this snapshot. Acceptable
    /// only because the store is one shop's repeat customers; a large store
    /// would need an indexed search instead.
    pub async fn find_all(&self) -> DbResult<Vec<CustomerRecord>> {
        let customers = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT name, tax_id, address_line_1, address_line_2, phone
            FROM customers
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Appends a customer row.
    ///
    /// No uniqueness is enforced here; callers check the snapshot before
    /// insert (best-effort, not atomic).
    pub async fn append(&self, record: &CustomerRecord) -> DbResult<()> {
        debug!(tax_id = %record.tax_id, "Appending customer row");

        sqlx::query(
            r#"
            INSERT INTO customers (name, tax_id, address_line_1, address_line_2, phone)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.name)
        .bind(&record.tax_id)
        .bind(&record.address_line_1)
        .bind(&record.address_line_2)
        .bind(&record.phone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts customer rows (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
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

    fn record(name: &str, tax_id: &str) -> CustomerRecord {
        CustomerRecord {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            address_line_1: "99/9 หมู่ 1".to_string(),
            address_line_2: "นนทบุรี 11120".to_string(),
            phone: "0812345678".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.append(&record("First", "1111111111111")).await.unwrap();
        repo.append(&record("Second", "2222222222222")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "First");
        assert_eq!(all[1].name, "Second");
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_rows_are_permitted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.append(&record("A", "1234567890123")).await.unwrap();
        repo.append(&record("B", "1234567890123")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_store_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.customers().find_all().await.unwrap().is_empty());
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }
}
