use async_trait::async_trait;
use chrono::NaiveDate;
use lift_core::model::{
    CardioActivity, CardioActivityId, CardioEntry, CardioSession, CardioSessionId, Exercise,
    ExerciseId, LoggedSet, NewWorkout, SetEntry, SetId, UserId, Workout, WorkoutDetails,
    WorkoutId, WorkoutSet, normalize_activity_name, normalize_exercise_name,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Inclusive date bounds for a set query. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// No bounds: the full history.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Persisted shape for a workout and everything logged in it.
#[derive(Debug, Clone)]
pub struct NewWorkoutRecord {
    pub workout: NewWorkout,
    pub sets: Vec<SetEntry>,
    pub cardio: Vec<CardioEntry>,
}

impl NewWorkoutRecord {
    #[must_use]
    pub fn new(workout: NewWorkout, sets: Vec<SetEntry>, cardio: Vec<CardioEntry>) -> Self {
        Self {
            workout,
            sets,
            cardio,
        }
    }

    /// Returns `StorageError::Conflict` if two sets share an exercise and set number.
    fn check_unique_sets(&self) -> Result<(), StorageError> {
        let mut seen = HashSet::with_capacity(self.sets.len());
        for set in &self.sets {
            if !seen.insert((set.exercise_id, set.set_number)) {
                return Err(StorageError::Conflict);
            }
        }
        Ok(())
    }
}

/// One row of a user's workout history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub id: WorkoutId,
    pub date: NaiveDate,
    pub title: String,
    pub set_count: u32,
    pub cardio_count: u32,
}

/// Source of logged sets for the progress pipeline.
#[async_trait]
pub trait SetRepository: Send + Sync {
    /// Fetch a user's sets for one exercise, ascending by `(date, set_number)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the exercise does not exist, or other storage errors.
    async fn fetch_sets(
        &self,
        exercise_id: ExerciseId,
        user_id: UserId,
        window: DateWindow,
    ) -> Result<Vec<LoggedSet>, StorageError>;
}

/// Exercise names and the list shown in pickers.
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Resolve the display name of an exercise.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is unknown.
    async fn exercise_name(&self, id: ExerciseId) -> Result<String, StorageError>;

    /// List every exercise ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError>;

    /// Add an exercise and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the name already exists.
    async fn insert_exercise(&self, name: &str) -> Result<ExerciseId, StorageError>;
}

/// Cardio activities available when logging a workout.
#[async_trait]
pub trait CardioCatalog: Send + Sync {
    /// List every cardio activity ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_activities(&self) -> Result<Vec<CardioActivity>, StorageError>;

    /// Add an activity and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the name already exists.
    async fn insert_activity(&self, name: &str) -> Result<CardioActivityId, StorageError>;
}

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Store a workout with its sets and cardio sessions atomically and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if a set or session references an unknown
    /// catalog entry, `StorageError::Conflict` on duplicate set numbers, or other
    /// storage errors.
    async fn insert_workout(&self, record: NewWorkoutRecord) -> Result<WorkoutId, StorageError>;

    /// List a user's workouts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read.
    async fn list_workouts(&self, user_id: UserId) -> Result<Vec<WorkoutSummary>, StorageError>;

    /// Load one of the user's workouts with its sets and cardio sessions, each in
    /// the order they were logged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has no such workout.
    async fn workout_details(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<WorkoutDetails, StorageError>;

    /// Delete a workout with its sets and cardio sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has no such workout.
    async fn delete_workout(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<(), StorageError>;

    /// Delete a single set from one of the user's workouts.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the set is not in one of the user's workouts.
    async fn delete_set(&self, user_id: UserId, set_id: SetId) -> Result<(), StorageError>;

    /// Delete a single cardio session from one of the user's workouts.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the session is not in one of the user's workouts.
    async fn delete_cardio_session(
        &self,
        user_id: UserId,
        session_id: CardioSessionId,
    ) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
struct StoredWorkout {
    workout: Workout,
    sets: Vec<(SetId, SetEntry)>,
    cardio: Vec<(CardioSessionId, CardioEntry)>,
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    exercises: Arc<Mutex<BTreeMap<ExerciseId, Exercise>>>,
    activities: Arc<Mutex<BTreeMap<CardioActivityId, CardioActivity>>>,
    workouts: Arc<Mutex<BTreeMap<WorkoutId, StoredWorkout>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn exercise_exists(&self, id: ExerciseId) -> Result<bool, StorageError> {
        let guard = self.exercises.lock().map_err(poisoned)?;
        Ok(guard.contains_key(&id))
    }

    fn activity_exists(&self, id: CardioActivityId) -> Result<bool, StorageError> {
        let guard = self.activities.lock().map_err(poisoned)?;
        Ok(guard.contains_key(&id))
    }

    fn activity_name(&self, id: CardioActivityId) -> Result<String, StorageError> {
        let guard = self.activities.lock().map_err(poisoned)?;
        guard
            .get(&id)
            .map(|a| a.name().to_owned())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ExerciseCatalog for InMemoryRepository {
    async fn exercise_name(&self, id: ExerciseId) -> Result<String, StorageError> {
        let guard = self.exercises.lock().map_err(poisoned)?;
        guard
            .get(&id)
            .map(|ex| ex.name().to_owned())
            .ok_or(StorageError::NotFound)
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        let guard = self.exercises.lock().map_err(poisoned)?;
        let mut all: Vec<Exercise> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(all)
    }

    async fn insert_exercise(&self, name: &str) -> Result<ExerciseId, StorageError> {
        let name =
            normalize_exercise_name(name).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut guard = self.exercises.lock().map_err(poisoned)?;
        if guard.values().any(|ex| ex.name() == name) {
            return Err(StorageError::Conflict);
        }
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = ExerciseId::new(next);
        let exercise =
            Exercise::new(id, name).map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.insert(id, exercise);
        Ok(id)
    }
}

#[async_trait]
impl CardioCatalog for InMemoryRepository {
    async fn list_activities(&self) -> Result<Vec<CardioActivity>, StorageError> {
        let guard = self.activities.lock().map_err(poisoned)?;
        let mut all: Vec<CardioActivity> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(all)
    }

    async fn insert_activity(&self, name: &str) -> Result<CardioActivityId, StorageError> {
        let name =
            normalize_activity_name(name).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut guard = self.activities.lock().map_err(poisoned)?;
        if guard.values().any(|a| a.name() == name) {
            return Err(StorageError::Conflict);
        }
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = CardioActivityId::new(next);
        let activity = CardioActivity::new(id, name)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.insert(id, activity);
        Ok(id)
    }
}

#[async_trait]
impl SetRepository for InMemoryRepository {
    async fn fetch_sets(
        &self,
        exercise_id: ExerciseId,
        user_id: UserId,
        window: DateWindow,
    ) -> Result<Vec<LoggedSet>, StorageError> {
        if !self.exercise_exists(exercise_id)? {
            return Err(StorageError::NotFound);
        }
        let guard = self.workouts.lock().map_err(poisoned)?;

        let mut rows: Vec<(WorkoutId, LoggedSet)> = Vec::new();
        for (id, stored) in guard.iter() {
            let workout = &stored.workout;
            if workout.user_id() != user_id || !window.contains(workout.date()) {
                continue;
            }
            rows.extend(
                stored
                    .sets
                    .iter()
                    .filter(|(_, s)| s.exercise_id == exercise_id)
                    .map(|(_, s)| {
                        (
                            *id,
                            LoggedSet::new(workout.date(), s.weight, s.reps, s.set_number),
                        )
                    }),
            );
        }
        rows.sort_by_key(|(id, set)| (set.date, set.set_number, *id));
        Ok(rows.into_iter().map(|(_, set)| set).collect())
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryRepository {
    async fn insert_workout(&self, record: NewWorkoutRecord) -> Result<WorkoutId, StorageError> {
        record.check_unique_sets()?;
        for set in &record.sets {
            if !self.exercise_exists(set.exercise_id)? {
                return Err(StorageError::NotFound);
            }
        }
        for session in &record.cardio {
            if !self.activity_exists(session.activity_id)? {
                return Err(StorageError::NotFound);
            }
        }

        let mut guard = self.workouts.lock().map_err(poisoned)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = WorkoutId::new(next);

        let next_set = guard
            .values()
            .flat_map(|w| w.sets.iter().map(|(sid, _)| sid.value()))
            .max()
            .map_or(1, |m| m + 1);
        let next_session = guard
            .values()
            .flat_map(|w| w.cardio.iter().map(|(cid, _)| cid.value()))
            .max()
            .map_or(1, |m| m + 1);

        let sets = (next_set..).map(SetId::new).zip(record.sets).collect();
        let cardio = (next_session..)
            .map(CardioSessionId::new)
            .zip(record.cardio)
            .collect();
        guard.insert(
            id,
            StoredWorkout {
                workout: record.workout.with_id(id),
                sets,
                cardio,
            },
        );
        Ok(id)
    }

    async fn list_workouts(&self, user_id: UserId) -> Result<Vec<WorkoutSummary>, StorageError> {
        let guard = self.workouts.lock().map_err(poisoned)?;
        let mut out: Vec<WorkoutSummary> = guard
            .values()
            .filter(|s| s.workout.user_id() == user_id)
            .map(|s| WorkoutSummary {
                id: s.workout.id(),
                date: s.workout.date(),
                title: s.workout.title().to_owned(),
                set_count: u32::try_from(s.sets.len()).unwrap_or(u32::MAX),
                cardio_count: u32::try_from(s.cardio.len()).unwrap_or(u32::MAX),
            })
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn workout_details(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<WorkoutDetails, StorageError> {
        let stored = {
            let guard = self.workouts.lock().map_err(poisoned)?;
            match guard.get(&workout_id) {
                Some(stored) if stored.workout.user_id() == user_id => stored.clone(),
                _ => return Err(StorageError::NotFound),
            }
        };

        let mut sets = Vec::with_capacity(stored.sets.len());
        for (id, s) in stored.sets {
            sets.push(WorkoutSet {
                id,
                exercise_id: s.exercise_id,
                exercise_name: self.exercise_name(s.exercise_id).await?,
                set_number: s.set_number,
                weight: s.weight,
                reps: s.reps,
                notes: s.notes,
            });
        }
        let mut cardio = Vec::with_capacity(stored.cardio.len());
        for (id, c) in stored.cardio {
            cardio.push(CardioSession {
                id,
                activity_id: c.activity_id,
                activity_name: self.activity_name(c.activity_id)?,
                duration_minutes: c.duration_minutes,
                distance: c.distance,
                notes: c.notes,
            });
        }
        Ok(WorkoutDetails {
            workout: stored.workout,
            sets,
            cardio,
        })
    }

    async fn delete_workout(
        &self,
        user_id: UserId,
        workout_id: WorkoutId,
    ) -> Result<(), StorageError> {
        let mut guard = self.workouts.lock().map_err(poisoned)?;
        match guard.get(&workout_id) {
            Some(stored) if stored.workout.user_id() == user_id => {
                guard.remove(&workout_id);
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    async fn delete_set(&self, user_id: UserId, set_id: SetId) -> Result<(), StorageError> {
        let mut guard = self.workouts.lock().map_err(poisoned)?;
        for stored in guard.values_mut() {
            if stored.workout.user_id() != user_id {
                continue;
            }
            if let Some(pos) = stored.sets.iter().position(|(id, _)| *id == set_id) {
                stored.sets.remove(pos);
                return Ok(());
            }
        }
        Err(StorageError::NotFound)
    }

    async fn delete_cardio_session(
        &self,
        user_id: UserId,
        session_id: CardioSessionId,
    ) -> Result<(), StorageError> {
        let mut guard = self.workouts.lock().map_err(poisoned)?;
        for stored in guard.values_mut() {
            if stored.workout.user_id() != user_id {
                continue;
            }
            if let Some(pos) = stored.cardio.iter().position(|(id, _)| *id == session_id) {
                stored.cardio.remove(pos);
                return Ok(());
            }
        }
        Err(StorageError::NotFound)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sets: Arc<dyn SetRepository>,
    pub exercises: Arc<dyn ExerciseCatalog>,
    pub cardio: Arc<dyn CardioCatalog>,
    pub workouts: Arc<dyn WorkoutRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let sets: Arc<dyn SetRepository> = Arc::new(repo.clone());
        let exercises: Arc<dyn ExerciseCatalog> = Arc::new(repo.clone());
        let cardio: Arc<dyn CardioCatalog> = Arc::new(repo.clone());
        let workouts: Arc<dyn WorkoutRepository> = Arc::new(repo);
        Self {
            sets,
            exercises,
            cardio,
            workouts,
        }
    }
}
