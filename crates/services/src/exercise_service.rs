use std::sync::Arc;

use lift_core::model::{Exercise, ExerciseId, normalize_exercise_name};
use storage::repository::{ExerciseCatalog, StorageError};

use crate::error::ExerciseServiceError;

/// Reads and extends the exercise catalog.
#[derive(Clone)]
pub struct ExerciseService {
    exercises: Arc<dyn ExerciseCatalog>,
}

impl ExerciseService {
    #[must_use]
    pub fn new(exercises: Arc<dyn ExerciseCatalog>) -> Self {
        Self { exercises }
    }

    /// List the catalog ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ExerciseServiceError> {
        let exercises = self.exercises.list_exercises().await?;
        Ok(exercises)
    }

    /// Add a new exercise to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Invalid` for a blank or overlong name,
    /// `ExerciseServiceError::Duplicate` if the name is taken.
    pub async fn create_exercise(&self, name: &str) -> Result<Exercise, ExerciseServiceError> {
        let name = normalize_exercise_name(name).map_err(lift_core::Error::from)?;
        let id = match self.exercises.insert_exercise(&name).await {
            Ok(id) => id,
            Err(StorageError::Conflict) => return Err(ExerciseServiceError::Duplicate),
            Err(other) => return Err(other.into()),
        };
        tracing::info!(exercise_id = %id, %name, "created exercise");
        Exercise::new(id, name).map_err(|e| lift_core::Error::from(e).into())
    }

    /// Resolve an exercise by name, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<ExerciseId>, ExerciseServiceError> {
        let wanted = name.trim();
        let found = self
            .exercises
            .list_exercises()
            .await?
            .into_iter()
            .find(|e| e.name() == wanted)
            .map(|e| e.id());
        Ok(found)
    }
}
