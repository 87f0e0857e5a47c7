//! Shared error types for the services crate.

use thiserror::Error;

use lift_core::model::{CardioSessionId, ExerciseId, SetId, WorkoutId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("exercise {0} not found")]
    ExerciseNotFound(ExerciseId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProgressError {
    /// Maps a store failure for `exercise_id`, surfacing a missing exercise as `ExerciseNotFound`.
    pub(crate) fn from_storage(exercise_id: ExerciseId, err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::ExerciseNotFound(exercise_id),
            other => Self::Storage(other),
        }
    }

    /// True for the "unknown exercise" outcome callers render as a not-found state.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ExerciseNotFound(_))
    }
}

/// Errors emitted by `ExerciseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseServiceError {
    #[error(transparent)]
    Invalid(#[from] lift_core::Error),
    #[error("an exercise with that name already exists")]
    Duplicate,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CardioService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardioServiceError {
    #[error(transparent)]
    Invalid(#[from] lift_core::Error),
    #[error("a cardio activity with that name already exists")]
    Duplicate,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `WorkoutService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkoutServiceError {
    #[error(transparent)]
    Invalid(#[from] lift_core::Error),
    #[error("workout {0} not found")]
    WorkoutNotFound(WorkoutId),
    #[error("set {0} not found")]
    SetNotFound(SetId),
    #[error("cardio session {0} not found")]
    CardioSessionNotFound(CardioSessionId),
    #[error("a set or cardio session references an unknown exercise or activity")]
    UnknownCatalogEntry,
    #[error("set numbers must be unique per exercise within a workout")]
    DuplicateSet,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
