use thiserror::Error;

use crate::model::{CardioError, ExerciseError, WorkoutError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Cardio(#[from] CardioError),
    #[error(transparent)]
    Workout(#[from] WorkoutError),
}
