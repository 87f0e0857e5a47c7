use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::cardio_service::CardioService;
use crate::error::AppServicesError;
use crate::exercise_service::ExerciseService;
use crate::progress_service::ProgressService;
use crate::workout_service::WorkoutService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
    exercises: Arc<ExerciseService>,
    cardio: Arc<CardioService>,
    workouts: Arc<WorkoutService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if connecting or migrating the database fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.sets),
            Arc::clone(&storage.exercises),
        ));
        let exercises = Arc::new(ExerciseService::new(Arc::clone(&storage.exercises)));
        let cardio = Arc::new(CardioService::new(Arc::clone(&storage.cardio)));
        let workouts = Arc::new(WorkoutService::new(clock, Arc::clone(&storage.workouts)));
        Self {
            progress,
            exercises,
            cardio,
            workouts,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn exercises(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercises)
    }

    #[must_use]
    pub fn cardio(&self) -> Arc<CardioService> {
        Arc::clone(&self.cardio)
    }

    #[must_use]
    pub fn workouts(&self) -> Arc<WorkoutService> {
        Arc::clone(&self.workouts)
    }
}
