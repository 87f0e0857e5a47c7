use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use lift_core::model::{
    CardioEntry, CardioSessionId, NewWorkout, SetEntry, SetId, UserId, WorkoutDetails, WorkoutId,
};
use storage::repository::{NewWorkoutRecord, StorageError, WorkoutRepository, WorkoutSummary};

use crate::Clock;
use crate::error::WorkoutServiceError;

/// A workout as submitted for logging, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub time_enter: Option<NaiveTime>,
    #[serde(default)]
    pub time_leave: Option<NaiveTime>,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
    #[serde(default)]
    pub cardio: Vec<CardioEntry>,
}

impl WorkoutDraft {
    #[must_use]
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            notes: None,
            time_enter: None,
            time_leave: None,
            sets: Vec::new(),
            cardio: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_times(mut self, enter: Option<NaiveTime>, leave: Option<NaiveTime>) -> Self {
        self.time_enter = enter;
        self.time_leave = leave;
        self
    }

    #[must_use]
    pub fn with_sets(mut self, sets: Vec<SetEntry>) -> Self {
        self.sets = sets;
        self
    }

    #[must_use]
    pub fn with_cardio(mut self, cardio: Vec<CardioEntry>) -> Self {
        self.cardio = cardio;
        self
    }

    fn into_record(
        self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<NewWorkoutRecord, lift_core::Error> {
        let workout = NewWorkout::new(user_id, self.date, self.title, self.notes, today)?
            .with_times(self.time_enter, self.time_leave);
        let sets = self
            .sets
            .into_iter()
            .map(SetEntry::validated)
            .collect::<Result<Vec<_>, _>>()?;
        let cardio = self
            .cardio
            .into_iter()
            .map(CardioEntry::validated)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewWorkoutRecord::new(workout, sets, cardio))
    }
}

/// Logs workouts with their sets and cardio, and serves a user's history.
#[derive(Clone)]
pub struct WorkoutService {
    clock: Clock,
    workouts: Arc<dyn WorkoutRepository>,
}

impl WorkoutService {
    #[must_use]
    pub fn new(clock: Clock, workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { clock, workouts }
    }

    /// Validate and persist a workout with its sets and cardio sessions in one step.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Invalid` for a bad title, a future date or an
    /// out-of-range set or session. Returns `WorkoutServiceError::UnknownCatalogEntry`
    /// if an entry names a missing exercise or activity, and
    /// `WorkoutServiceError::DuplicateSet` if two sets share an exercise and set number.
    #[tracing::instrument(
        skip(self, draft),
        fields(date = %draft.date, sets = draft.sets.len(), cardio = draft.cardio.len())
    )]
    pub async fn log_workout(
        &self,
        user_id: UserId,
        draft: WorkoutDraft,
    ) -> Result<WorkoutId, WorkoutServiceError> {
        let record = draft.into_record(user_id, self.clock.today())?;
        let id = match self.workouts.insert_workout(record).await {
            Ok(id) => id,
            Err(StorageError::NotFound) => return Err(WorkoutServiceError::UnknownCatalogEntry),
            Err(StorageError::Conflict) => return Err(WorkoutServiceError::DuplicateSet),
            Err(other) => return Err(other.into()),
        };
        tracing::info!(workout_id = %id, "logged workout");
        Ok(id)
    }

    /// A user's workouts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<WorkoutSummary>, WorkoutServiceError> {
        let rows = self.workouts.list_workouts(user_id).await?;
        Ok(rows)
    }

    /// One of the user's workouts with its named sets and cardio sessions.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::WorkoutNotFound` if the user has no such workout.
    pub async fn workout_details(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<WorkoutDetails, WorkoutServiceError> {
        match self.workouts.workout_details(user_id, workout_id).await {
            Ok(details) => Ok(details),
            Err(StorageError::NotFound) => Err(WorkoutServiceError::WorkoutNotFound(workout_id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Delete one of the user's workouts along with its sets and cardio.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::WorkoutNotFound` if the user has no such workout.
    pub async fn delete_workout(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<(), WorkoutServiceError> {
        match self.workouts.delete_workout(user_id, workout_id).await {
            Ok(()) => {
                tracing::info!(%workout_id, "deleted workout");
                Ok(())
            }
            Err(StorageError::NotFound) => Err(WorkoutServiceError::WorkoutNotFound(workout_id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Delete a single set from one of the user's workouts.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::SetNotFound` if the set is not the user's.
    pub async fn delete_set(&self, user_id: UserId, set_id: SetId) -> Result<(), WorkoutServiceError> {
        match self.workouts.delete_set(user_id, set_id).await {
            Ok(()) => {
                tracing::info!(%set_id, "deleted set");
                Ok(())
            }
            Err(StorageError::NotFound) => Err(WorkoutServiceError::SetNotFound(set_id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Delete a single cardio session from one of the user's workouts.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::CardioSessionNotFound` if the session is not the user's.
    pub async fn delete_cardio_session(
        &self,
        user_id: UserId,
        session_id: CardioSessionId,
    ) -> Result<(), WorkoutServiceError> {
        match self.workouts.delete_cardio_session(user_id, session_id).await {
            Ok(()) => {
                tracing::info!(%session_id, "deleted cardio session");
                Ok(())
            }
            Err(StorageError::NotFound) => {
                Err(WorkoutServiceError::CardioSessionNotFound(session_id))
            }
            Err(other) => Err(other.into()),
        }
    }
}
