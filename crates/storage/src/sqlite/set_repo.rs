use lift_core::model::{ExerciseId, LoggedSet, UserId};

use super::SqliteRepository;
use super::mapping::{db_err, id_i64, map_set_row};
use crate::repository::{DateWindow, SetRepository, StorageError};

#[async_trait::async_trait]
impl SetRepository for SqliteRepository {
    async fn fetch_sets(
        &self,
        exercise_id: ExerciseId,
        user_id: UserId,
        window: DateWindow,
    ) -> Result<Vec<LoggedSet>, StorageError> {
        if !self.exercise_exists(exercise_id).await? {
            return Err(StorageError::NotFound);
        }

        let rows = sqlx::query(
            r"
                SELECT w.workout_date, s.set_number, s.weight, s.reps
                FROM exercise_sets s
                JOIN workouts w ON w.id = s.workout_id
                WHERE s.exercise_id = ?1
                  AND w.user_id = ?2
                  AND (?3 IS NULL OR w.workout_date >= ?3)
                  AND (?4 IS NULL OR w.workout_date <= ?4)
                ORDER BY w.workout_date ASC, s.set_number ASC, w.id ASC
            ",
        )
        .bind(id_i64("exercise_id", exercise_id.value())?)
        .bind(id_i64("user_id", user_id.value())?)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        tracing::debug!(
            exercise_id = exercise_id.value(),
            user_id = user_id.value(),
            start = ?window.start,
            end = ?window.end,
            rows = rows.len(),
            "fetched logged sets"
        );

        rows.iter().map(map_set_row).collect()
    }
}
