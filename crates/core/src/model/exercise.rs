use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ExerciseId;

/// Longest exercise name the catalog accepts.
pub const MAX_EXERCISE_NAME_CHARS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise name cannot be empty")]
    EmptyName,

    #[error("exercise name must be at most {MAX_EXERCISE_NAME_CHARS} characters")]
    NameTooLong,
}

/// A catalog entry, e.g. "Bench Press".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    id: ExerciseId,
    name: String,
}

impl Exercise {
    /// Creates an exercise with a validated, trimmed name.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` if the name is blank or too long.
    pub fn new(id: ExerciseId, name: impl Into<String>) -> Result<Self, ExerciseError> {
        let name = normalize_exercise_name(name)?;
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Trims and validates an exercise name.
///
/// # Errors
///
/// Returns `ExerciseError` if the name is blank or too long.
pub fn normalize_exercise_name(name: impl Into<String>) -> Result<String, ExerciseError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ExerciseError::EmptyName);
    }
    if trimmed.chars().count() > MAX_EXERCISE_NAME_CHARS {
        return Err(ExerciseError::NameTooLong);
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let ex = Exercise::new(ExerciseId::new(1), "  Squat ").unwrap();
        assert_eq!(ex.name(), "Squat");
        assert_eq!(ex.id(), ExerciseId::new(1));
    }

    #[test]
    fn blank_and_long_names_are_rejected() {
        assert_eq!(
            Exercise::new(ExerciseId::new(1), "   ").unwrap_err(),
            ExerciseError::EmptyName
        );
        let long = "x".repeat(MAX_EXERCISE_NAME_CHARS + 1);
        assert_eq!(
            Exercise::new(ExerciseId::new(1), long).unwrap_err(),
            ExerciseError::NameTooLong
        );
    }
}
