use lift_core::model::{CardioActivity, CardioActivityId, normalize_activity_name};

use super::SqliteRepository;
use super::mapping::{activity_id_from_i64, db_err, map_activity_row, ser};
use crate::repository::{CardioCatalog, StorageError};

#[async_trait::async_trait]
impl CardioCatalog for SqliteRepository {
    async fn list_activities(&self) -> Result<Vec<CardioActivity>, StorageError> {
        let rows = sqlx::query("SELECT id, name FROM cardio_activities ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(map_activity_row).collect()
    }

    async fn insert_activity(&self, name: &str) -> Result<CardioActivityId, StorageError> {
        let name = normalize_activity_name(name).map_err(ser)?;
        let res = sqlx::query("INSERT INTO cardio_activities (name) VALUES (?1)")
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        tracing::debug!(%name, "inserted cardio activity");
        activity_id_from_i64(res.last_insert_rowid())
    }
}
