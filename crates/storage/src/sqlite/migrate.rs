use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Applies pending schema versions in order.
///
/// Version 1 creates the exercise catalog, workouts, logged sets and their
/// indexes. Version 2 adds visit times and cardio tracking.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS exercises (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS workouts (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    workout_date TEXT NOT NULL,
                    title TEXT NOT NULL,
                    notes TEXT
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        // weight is TEXT so decimals round-trip exactly.
        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS exercise_sets (
                    id INTEGER PRIMARY KEY,
                    workout_id INTEGER NOT NULL,
                    exercise_id INTEGER NOT NULL,
                    set_number INTEGER NOT NULL CHECK (set_number >= 1),
                    weight TEXT,
                    reps INTEGER CHECK (reps IS NULL OR reps >= 0),
                    notes TEXT,
                    UNIQUE (workout_id, exercise_id, set_number),
                    FOREIGN KEY (workout_id) REFERENCES workouts(id) ON DELETE CASCADE,
                    FOREIGN KEY (exercise_id) REFERENCES exercises(id)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_workouts_user_date
                    ON workouts (user_id, workout_date);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_exercise_sets_exercise_workout
                    ON exercise_sets (exercise_id, workout_id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version = 1, "applied sqlite migration");
    }

    // Version 2: visit times and cardio sessions.
    if !is_applied(pool, 2).await? {
        let mut tx = pool.begin().await?;

        sqlx::query("ALTER TABLE workouts ADD COLUMN time_enter TEXT;")
            .execute(&mut *tx)
            .await?;
        sqlx::query("ALTER TABLE workouts ADD COLUMN time_leave TEXT;")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS cardio_activities (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        // distance is TEXT for the same reason as exercise_sets.weight.
        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS cardio_sessions (
                    id INTEGER PRIMARY KEY,
                    workout_id INTEGER NOT NULL,
                    activity_id INTEGER NOT NULL,
                    duration_minutes INTEGER CHECK (duration_minutes IS NULL OR duration_minutes >= 1),
                    distance TEXT,
                    notes TEXT,
                    FOREIGN KEY (workout_id) REFERENCES workouts(id) ON DELETE CASCADE,
                    FOREIGN KEY (activity_id) REFERENCES cardio_activities(id)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_cardio_sessions_workout
                    ON cardio_sessions (workout_id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(2_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version = 2, "applied sqlite migration");
    }

    Ok(())
}
