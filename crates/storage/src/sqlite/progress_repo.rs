use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{ProgressRepository, StorageError};
use pensum_core::ProgressRecord;

use super::{SqliteRepository, payload};

/// Fixed key the single progress row lives under.
const NAMESPACE: &str = "pensum_manager_states";

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load(&self) -> Result<ProgressRecord, StorageError> {
        let row = sqlx::query(
            r"
            SELECT payload
            FROM progress_records
            WHERE namespace = ?1
            ",
        )
        .bind(NAMESPACE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(ProgressRecord::new());
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(payload::decode(&payload))
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let payload = payload::encode(record)?;

        sqlx::query(
            r"
            INSERT INTO progress_records (namespace, payload)
            VALUES (?1, ?2)
            ON CONFLICT(namespace) DO UPDATE SET
                payload = excluded.payload
            ",
        )
        .bind(NAMESPACE)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
