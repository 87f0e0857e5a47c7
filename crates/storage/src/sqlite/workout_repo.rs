use lift_core::model::{CardioSessionId, SetId, UserId, WorkoutDetails, WorkoutId};

use super::SqliteRepository;
use super::mapping::{
    db_err, decimal_to_text, id_i64, map_cardio_session_row, map_workout_row,
    map_workout_set_row, map_workout_summary_row, workout_id_from_i64,
};
use crate::repository::{NewWorkoutRecord, StorageError, WorkoutRepository, WorkoutSummary};

#[async_trait::async_trait]
impl WorkoutRepository for SqliteRepository {
    async fn insert_workout(&self, record: NewWorkoutRecord) -> Result<WorkoutId, StorageError> {
        let workout = &record.workout;
        let user_id = id_i64("user_id", workout.user_id().value())?;

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let res = sqlx::query(
            r"
                INSERT INTO workouts (user_id, workout_date, title, notes, time_enter, time_leave)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(user_id)
        .bind(workout.date())
        .bind(workout.title())
        .bind(workout.notes())
        .bind(workout.time_enter())
        .bind(workout.time_leave())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        let workout_id = res.last_insert_rowid();

        for set in &record.sets {
            sqlx::query(
                r"
                    INSERT INTO exercise_sets (
                        workout_id, exercise_id, set_number, weight, reps, notes
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(workout_id)
            .bind(id_i64("exercise_id", set.exercise_id.value())?)
            .bind(i64::from(set.set_number))
            .bind(decimal_to_text(set.weight))
            .bind(set.reps.map(i64::from))
            .bind(set.notes.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for session in &record.cardio {
            sqlx::query(
                r"
                    INSERT INTO cardio_sessions (
                        workout_id, activity_id, duration_minutes, distance, notes
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5)
                ",
            )
            .bind(workout_id)
            .bind(id_i64("activity_id", session.activity_id.value())?)
            .bind(session.duration_minutes.map(i64::from))
            .bind(decimal_to_text(session.distance))
            .bind(session.notes.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        tracing::debug!(
            workout_id,
            user_id,
            sets = record.sets.len(),
            cardio = record.cardio.len(),
            "inserted workout"
        );
        workout_id_from_i64(workout_id)
    }

    async fn list_workouts(&self, user_id: UserId) -> Result<Vec<WorkoutSummary>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT w.id, w.workout_date, w.title,
                       (SELECT COUNT(*) FROM exercise_sets s WHERE s.workout_id = w.id) AS set_count,
                       (SELECT COUNT(*) FROM cardio_sessions c WHERE c.workout_id = w.id) AS cardio_count
                FROM workouts w
                WHERE w.user_id = ?1
                ORDER BY w.workout_date DESC, w.id DESC
            ",
        )
        .bind(id_i64("user_id", user_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_workout_summary_row).collect()
    }

    async fn workout_details(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<WorkoutDetails, StorageError> {
        let id = id_i64("workout_id", workout_id.value())?;
        let row = sqlx::query(
            r"
                SELECT id, user_id, workout_date, title, notes, time_enter, time_leave
                FROM workouts
                WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(id)
        .bind(id_i64("user_id", user_id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(StorageError::NotFound)?;
        let workout = map_workout_row(&row)?;

        let set_rows = sqlx::query(
            r"
                SELECT s.id, s.exercise_id, e.name AS exercise_name, s.set_number,
                       s.weight, s.reps, s.notes
                FROM exercise_sets s
                JOIN exercises e ON e.id = s.exercise_id
                WHERE s.workout_id = ?1
                ORDER BY s.id ASC
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let cardio_rows = sqlx::query(
            r"
                SELECT c.id, c.activity_id, a.name AS activity_name, c.duration_minutes,
                       c.distance, c.notes
                FROM cardio_sessions c
                JOIN cardio_activities a ON a.id = c.activity_id
                WHERE c.workout_id = ?1
                ORDER BY c.id ASC
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(WorkoutDetails {
            workout,
            sets: set_rows
                .iter()
                .map(map_workout_set_row)
                .collect::<Result<_, _>>()?,
            cardio: cardio_rows
                .iter()
                .map(map_cardio_session_row)
                .collect::<Result<_, _>>()?,
        })
    }

    async fn delete_workout(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM workouts WHERE id = ?1 AND user_id = ?2")
            .bind(id_i64("workout_id", workout_id.value())?)
            .bind(id_i64("user_id", user_id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_set(&self, user_id: UserId, set_id: SetId) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                DELETE FROM exercise_sets
                WHERE id = ?1
                  AND workout_id IN (SELECT id FROM workouts WHERE user_id = ?2)
            ",
        )
        .bind(id_i64("set_id", set_id.value())?)
        .bind(id_i64("user_id", user_id.value())?)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_cardio_session(
        &self,
        user_id: UserId,
        session_id: CardioSessionId,
    ) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                DELETE FROM cardio_sessions
                WHERE id = ?1
                  AND workout_id IN (SELECT id FROM workouts WHERE user_id = ?2)
            ",
        )
        .bind(id_i64("session_id", session_id.value())?)
        .bind(id_i64("user_id", user_id.value())?)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
