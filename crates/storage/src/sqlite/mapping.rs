use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use lift_core::model::{
    CardioActivity, CardioActivityId, CardioSession, CardioSessionId, Exercise, ExerciseId,
    LoggedSet, SetId, UserId, Workout, WorkoutId, WorkoutSet,
};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{StorageError, WorkoutSummary};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps driver errors, turning constraint violations into domain outcomes.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
        if db.is_foreign_key_violation() {
            return StorageError::NotFound;
        }
    }
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn exercise_id_from_i64(v: i64) -> Result<ExerciseId, StorageError> {
    Ok(ExerciseId::new(i64_to_u64("exercise_id", v)?))
}

pub(crate) fn workout_id_from_i64(v: i64) -> Result<WorkoutId, StorageError> {
    Ok(WorkoutId::new(i64_to_u64("workout_id", v)?))
}

pub(crate) fn activity_id_from_i64(v: i64) -> Result<CardioActivityId, StorageError> {
    Ok(CardioActivityId::new(i64_to_u64("activity_id", v)?))
}

fn set_id_from_i64(v: i64) -> Result<SetId, StorageError> {
    Ok(SetId::new(i64_to_u64("set_id", v)?))
}

fn session_id_from_i64(v: i64) -> Result<CardioSessionId, StorageError> {
    Ok(CardioSessionId::new(i64_to_u64("session_id", v)?))
}

/// Decimals are stored as normalized TEXT so they read back exactly.
pub(crate) fn decimal_to_text(value: Option<Decimal>) -> Option<String> {
    value.map(|v| v.normalize().to_string())
}

pub(crate) fn decimal_from_text(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Decimal>, StorageError> {
    raw.map(|s| {
        Decimal::from_str(s.trim())
            .map_err(|e| StorageError::Serialization(format!("invalid {field} {s:?}: {e}")))
    })
    .transpose()
}

fn u32_from_i64(field: &'static str, raw: Option<i64>) -> Result<Option<u32>, StorageError> {
    raw.map(|r| {
        u32::try_from(r).map_err(|_| StorageError::Serialization(format!("invalid {field}: {r}")))
    })
    .transpose()
}

fn required_u32(row: &SqliteRow, field: &'static str) -> Result<u32, StorageError> {
    let raw: i64 = row.try_get(field).map_err(ser)?;
    u32::try_from(raw).map_err(|_| StorageError::Serialization(format!("invalid {field}: {raw}")))
}

pub(crate) fn map_set_row(row: &SqliteRow) -> Result<LoggedSet, StorageError> {
    let date: NaiveDate = row.try_get("workout_date").map_err(ser)?;
    Ok(LoggedSet::new(
        date,
        decimal_from_text("weight", row.try_get("weight").map_err(ser)?)?,
        u32_from_i64("reps", row.try_get("reps").map_err(ser)?)?,
        required_u32(row, "set_number")?,
    ))
}

pub(crate) fn map_exercise_row(row: &SqliteRow) -> Result<Exercise, StorageError> {
    let id = exercise_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let name: String = row.try_get("name").map_err(ser)?;
    Exercise::new(id, name).map_err(ser)
}

pub(crate) fn map_activity_row(row: &SqliteRow) -> Result<CardioActivity, StorageError> {
    let id = activity_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let name: String = row.try_get("name").map_err(ser)?;
    CardioActivity::new(id, name).map_err(ser)
}

pub(crate) fn map_workout_summary_row(row: &SqliteRow) -> Result<WorkoutSummary, StorageError> {
    Ok(WorkoutSummary {
        id: workout_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        date: row.try_get("workout_date").map_err(ser)?,
        title: row.try_get("title").map_err(ser)?,
        set_count: required_u32(row, "set_count")?,
        cardio_count: required_u32(row, "cardio_count")?,
    })
}

pub(crate) fn map_workout_row(row: &SqliteRow) -> Result<Workout, StorageError> {
    let user_id: i64 = row.try_get("user_id").map_err(ser)?;
    Ok(Workout::from_persisted(
        workout_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        UserId::new(i64_to_u64("user_id", user_id)?),
        row.try_get("workout_date").map_err(ser)?,
        row.try_get("title").map_err(ser)?,
        row.try_get("notes").map_err(ser)?,
        row.try_get::<Option<NaiveTime>, _>("time_enter")
            .map_err(ser)?,
        row.try_get::<Option<NaiveTime>, _>("time_leave")
            .map_err(ser)?,
    ))
}

pub(crate) fn map_workout_set_row(row: &SqliteRow) -> Result<WorkoutSet, StorageError> {
    Ok(WorkoutSet {
        id: set_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        exercise_id: exercise_id_from_i64(row.try_get::<i64, _>("exercise_id").map_err(ser)?)?,
        exercise_name: row.try_get("exercise_name").map_err(ser)?,
        set_number: required_u32(row, "set_number")?,
        weight: decimal_from_text("weight", row.try_get("weight").map_err(ser)?)?,
        reps: u32_from_i64("reps", row.try_get("reps").map_err(ser)?)?,
        notes: row.try_get("notes").map_err(ser)?,
    })
}

pub(crate) fn map_cardio_session_row(row: &SqliteRow) -> Result<CardioSession, StorageError> {
    Ok(CardioSession {
        id: session_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        activity_id: activity_id_from_i64(row.try_get::<i64, _>("activity_id").map_err(ser)?)?,
        activity_name: row.try_get("activity_name").map_err(ser)?,
        duration_minutes: u32_from_i64(
            "duration_minutes",
            row.try_get("duration_minutes").map_err(ser)?,
        )?,
        distance: decimal_from_text("distance", row.try_get("distance").map_err(ser)?)?,
        notes: row.try_get("notes").map_err(ser)?,
    })
}
