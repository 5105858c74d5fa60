//! # Postal Reference Repository
//!
//! Bulk access to the public postal-code dataset.
//!
//! The dataset is imported once (see the `load-postal` bin) and fetched in
//! bulk exactly once per process; [`invoq_core::postal::PostalDirectory`]
//! caches it for the process lifetime. No row-level queries.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use invoq_core::PostalEntry;

/// Repository for the postal reference store.
#[derive(Debug, Clone)]
pub struct PostalRepository {
    pool: SqlitePool,
}

impl PostalRepository {
    /// Creates a new PostalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PostalRepository { pool }
    }

    /// Reads the whole dataset in import order.
    pub async fn load_all(&self) -> DbResult<Vec<PostalEntry>> {
        let entries = sqlx::query_as::<_, PostalEntry>(
            r#"
            SELECT postal_code, sub_district, district, province
            FROM postal_codes
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = entries.len(), "Loaded postal reference dataset");
        Ok(entries)
    }

    /// Imports a batch of dataset rows (used by the `load-postal` bin).
    pub async fn append_batch(&self, entries: &[PostalEntry]) -> DbResult<()> {
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO postal_codes (postal_code, sub_district, district, province)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&entry.postal_code)
            .bind(&entry.sub_district)
            .bind(&entry.district)
            .bind(&entry.province)
            .execute(&self.pool)
            .await?;
        }

        info!(count = entries.len(), "Imported postal reference rows");
        Ok(())
    }

    /// Counts dataset rows (guards against double-importing).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM postal_codes")
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

    fn entry(code: &str, sub_district: &str) -> PostalEntry {
        PostalEntry {
            postal_code: code.to_string(),
            sub_district: sub_district.to_string(),
            district: "ปากเกร็ด".to_string(),
            province: "นนทบุรี".to_string(),
        }
    }

    #[tokio::test]
    async fn test_import_and_bulk_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.postal();

        repo.append_batch(&[entry("11120", "บางพูด"), entry("11120", "บ้านใหม่")])
            .await
            .unwrap();

        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].sub_district, "บางพูด");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_dataset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.postal().load_all().await.unwrap().is_empty());
    }
}
