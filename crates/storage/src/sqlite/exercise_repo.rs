use lift_core::model::{Exercise, ExerciseId, normalize_exercise_name};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{db_err, exercise_id_from_i64, id_i64, map_exercise_row, ser};
use crate::repository::{ExerciseCatalog, StorageError};

impl SqliteRepository {
    pub(crate) async fn exercise_exists(&self, id: ExerciseId) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT 1 FROM exercises WHERE id = ?1")
            .bind(id_i64("exercise_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.is_some())
    }
}

#[async_trait::async_trait]
impl ExerciseCatalog for SqliteRepository {
    async fn exercise_name(&self, id: ExerciseId) -> Result<String, StorageError> {
        let row = sqlx::query("SELECT name FROM exercises WHERE id = ?1")
            .bind(id_i64("exercise_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(StorageError::NotFound)?;
        row.try_get("name").map_err(ser)
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        let rows = sqlx::query("SELECT id, name FROM exercises ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(map_exercise_row).collect()
    }

    async fn insert_exercise(&self, name: &str) -> Result<ExerciseId, StorageError> {
        let name = normalize_exercise_name(name).map_err(ser)?;
        let res = sqlx::query("INSERT INTO exercises (name) VALUES (?1)")
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        tracing::debug!(%name, "inserted exercise");
        exercise_id_from_i64(res.last_insert_rowid())
    }
}
