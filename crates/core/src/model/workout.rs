use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::cardio::CardioSession;
use crate::model::ids::{ExerciseId, SetId, UserId, WorkoutId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

pub const MIN_TITLE_CHARS: usize = 2;
pub const MAX_TITLE_CHARS: usize = 50;

/// Weights are stored as `NUMERIC(7,2)`.
pub const WEIGHT_SCALE: u32 = 2;
const WEIGHT_LIMIT: i64 = 100_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkoutError {
    #[error("workout title must be between {MIN_TITLE_CHARS} and {MAX_TITLE_CHARS} characters")]
    InvalidTitle,

    #[error("workout date {date} is in the future")]
    FutureDate { date: NaiveDate },

    #[error("set number must be >= 1")]
    InvalidSetNumber,

    #[error("weight must be non-negative")]
    NegativeWeight,

    #[error("weight must have at most {WEIGHT_SCALE} decimal places and 5 integer digits")]
    WeightOutOfRange,

    #[error("reps must be at least 1")]
    InvalidReps,
}

//
// ─── NEW WORKOUT ───────────────────────────────────────────────────────────────
//

/// Validated fields of a workout that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkout {
    user_id: UserId,
    date: NaiveDate,
    title: String,
    notes: Option<String>,
    time_enter: Option<NaiveTime>,
    time_leave: Option<NaiveTime>,
}

impl NewWorkout {
    /// Validates the title and that the date is not after `today`.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::InvalidTitle` or `WorkoutError::FutureDate`.
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        title: impl Into<String>,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<Self, WorkoutError> {
        if date > today {
            return Err(WorkoutError::FutureDate { date });
        }
        let title = title.into().trim().to_owned();
        let len = title.chars().count();
        if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&len) {
            return Err(WorkoutError::InvalidTitle);
        }
        let notes = notes
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());
        Ok(Self {
            user_id,
            date,
            title,
            notes,
            time_enter: None,
            time_leave: None,
        })
    }

    /// Gym arrival and departure times.
    #[must_use]
    pub fn with_times(mut self, enter: Option<NaiveTime>, leave: Option<NaiveTime>) -> Self {
        self.time_enter = enter;
        self.time_leave = leave;
        self
    }

    /// Attach the id assigned by storage.
    #[must_use]
    pub fn with_id(self, id: WorkoutId) -> Workout {
        Workout {
            id,
            user_id: self.user_id,
            date: self.date,
            title: self.title,
            notes: self.notes,
            time_enter: self.time_enter,
            time_leave: self.time_leave,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn time_enter(&self) -> Option<NaiveTime> {
        self.time_enter
    }

    #[must_use]
    pub fn time_leave(&self) -> Option<NaiveTime> {
        self.time_leave
    }
}

//
// ─── WORKOUT ───────────────────────────────────────────────────────────────────
//

/// A stored, dated training session owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    user_id: UserId,
    date: NaiveDate,
    title: String,
    notes: Option<String>,
    time_enter: Option<NaiveTime>,
    time_leave: Option<NaiveTime>,
}

impl Workout {
    /// Rehydrates a workout from storage without re-running validation.
    #[must_use]
    pub fn from_persisted(
        id: WorkoutId,
        user_id: UserId,
        date: NaiveDate,
        title: String,
        notes: Option<String>,
        time_enter: Option<NaiveTime>,
        time_leave: Option<NaiveTime>,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            title,
            notes,
            time_enter,
            time_leave,
        }
    }

    #[must_use]
    pub fn id(&self) -> WorkoutId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn time_enter(&self) -> Option<NaiveTime> {
        self.time_enter
    }

    #[must_use]
    pub fn time_leave(&self) -> Option<NaiveTime> {
        self.time_leave
    }
}

//
// ─── SET ENTRY ─────────────────────────────────────────────────────────────────
//

/// A set as entered when logging a workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntry {
    pub exercise_id: ExerciseId,
    pub set_number: u32,
    pub weight: Option<Decimal>,
    pub reps: Option<u32>,
    pub notes: Option<String>,
}

impl SetEntry {
    /// Validates a set entry.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError` if the set number, weight or reps are out of range.
    pub fn new(
        exercise_id: ExerciseId,
        set_number: u32,
        weight: Option<Decimal>,
        reps: Option<u32>,
        notes: Option<String>,
    ) -> Result<Self, WorkoutError> {
        if set_number == 0 {
            return Err(WorkoutError::InvalidSetNumber);
        }
        if let Some(w) = weight {
            validate_weight(w)?;
        }
        if reps == Some(0) {
            return Err(WorkoutError::InvalidReps);
        }
        Ok(Self {
            exercise_id,
            set_number,
            weight: weight.map(|w| w.normalize()),
            reps,
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Re-runs validation on an entry built field by field, e.g. deserialized input.
    ///
    /// # Errors
    ///
    /// Same as [`SetEntry::new`].
    pub fn validated(self) -> Result<Self, WorkoutError> {
        Self::new(
            self.exercise_id,
            self.set_number,
            self.weight,
            self.reps,
            self.notes,
        )
    }
}

fn validate_weight(weight: Decimal) -> Result<(), WorkoutError> {
    if weight.is_sign_negative() && !weight.is_zero() {
        return Err(WorkoutError::NegativeWeight);
    }
    if weight.normalize().scale() > WEIGHT_SCALE || weight >= Decimal::from(WEIGHT_LIMIT) {
        return Err(WorkoutError::WeightOutOfRange);
    }
    Ok(())
}

//
// ─── DETAILS ───────────────────────────────────────────────────────────────────
//

/// A stored set with its id and exercise name, as shown on the workout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: SetId,
    pub exercise_id: ExerciseId,
    pub exercise_name: String,
    pub set_number: u32,
    pub weight: Option<Decimal>,
    pub reps: Option<u32>,
    pub notes: Option<String>,
}

/// A workout with everything logged in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDetails {
    pub workout: Workout,
    pub sets: Vec<WorkoutSet>,
    pub cardio: Vec<CardioSession>,
}
