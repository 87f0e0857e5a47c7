use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CardioActivityId, CardioSessionId};

/// Longest cardio activity name the catalog accepts.
pub const MAX_ACTIVITY_NAME_CHARS: usize = 100;

/// Distances are stored as `NUMERIC(5,2)`.
pub const DISTANCE_SCALE: u32 = 2;
const DISTANCE_LIMIT: i64 = 1_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardioError {
    #[error("cardio activity name cannot be empty")]
    EmptyName,

    #[error("cardio activity name must be at most {MAX_ACTIVITY_NAME_CHARS} characters")]
    NameTooLong,

    #[error("duration must be at least one minute")]
    InvalidDuration,

    #[error("distance must be non-negative")]
    NegativeDistance,

    #[error("distance must have at most {DISTANCE_SCALE} decimal places and 3 integer digits")]
    DistanceOutOfRange,
}

/// A catalog entry such as "Rowing" or "Treadmill".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardioActivity {
    id: CardioActivityId,
    name: String,
}

impl CardioActivity {
    /// # Errors
    ///
    /// Returns `CardioError` if the name is blank or too long.
    pub fn new(id: CardioActivityId, name: impl Into<String>) -> Result<Self, CardioError> {
        let name = normalize_activity_name(name)?;
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> CardioActivityId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Trims and validates a cardio activity name.
///
/// # Errors
///
/// Returns `CardioError` if the name is blank or too long.
pub fn normalize_activity_name(name: impl Into<String>) -> Result<String, CardioError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CardioError::EmptyName);
    }
    if trimmed.chars().count() > MAX_ACTIVITY_NAME_CHARS {
        return Err(CardioError::NameTooLong);
    }
    Ok(trimmed.to_owned())
}

/// A cardio session as entered when logging a workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardioEntry {
    pub activity_id: CardioActivityId,
    pub duration_minutes: Option<u32>,
    pub distance: Option<Decimal>,
    pub notes: Option<String>,
}

impl CardioEntry {
    /// # Errors
    ///
    /// Returns `CardioError` for a zero duration or an out-of-range distance.
    pub fn new(
        activity_id: CardioActivityId,
        duration_minutes: Option<u32>,
        distance: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<Self, CardioError> {
        if duration_minutes == Some(0) {
            return Err(CardioError::InvalidDuration);
        }
        if let Some(d) = distance {
            if d.is_sign_negative() && !d.is_zero() {
                return Err(CardioError::NegativeDistance);
            }
            if d.normalize().scale() > DISTANCE_SCALE || d >= Decimal::from(DISTANCE_LIMIT) {
                return Err(CardioError::DistanceOutOfRange);
            }
        }
        Ok(Self {
            activity_id,
            duration_minutes,
            distance: distance.map(|d| d.normalize()),
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Re-runs validation on an entry built field by field.
    ///
    /// # Errors
    ///
    /// Same as [`CardioEntry::new`].
    pub fn validated(self) -> Result<Self, CardioError> {
        Self::new(
            self.activity_id,
            self.duration_minutes,
            self.distance,
            self.notes,
        )
    }
}

/// A stored cardio session with its activity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardioSession {
    pub id: CardioSessionId,
    pub activity_id: CardioActivityId,
    pub activity_name: String,
    pub duration_minutes: Option<u32>,
    pub distance: Option<Decimal>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_name_is_trimmed_and_bounded() {
        let rowing = CardioActivity::new(CardioActivityId::new(1), "  Rowing ").unwrap();
        assert_eq!(rowing.name(), "Rowing");
        assert_eq!(
            CardioActivity::new(CardioActivityId::new(2), " ").unwrap_err(),
            CardioError::EmptyName
        );
        let long = "r".repeat(MAX_ACTIVITY_NAME_CHARS + 1);
        assert_eq!(
            normalize_activity_name(long).unwrap_err(),
            CardioError::NameTooLong
        );
    }

    #[test]
    fn entry_checks_duration_and_distance() {
        let run = CardioActivityId::new(1);
        assert_eq!(
            CardioEntry::new(run, Some(0), None, None).unwrap_err(),
            CardioError::InvalidDuration
        );
        assert_eq!(
            CardioEntry::new(run, Some(30), Some(Decimal::new(-1, 0)), None).unwrap_err(),
            CardioError::NegativeDistance
        );
        assert_eq!(
            CardioEntry::new(run, Some(30), Some(Decimal::new(5001, 3)), None).unwrap_err(),
            CardioError::DistanceOutOfRange
        );
        assert_eq!(
            CardioEntry::new(run, Some(30), Some(Decimal::from(1_000)), None).unwrap_err(),
            CardioError::DistanceOutOfRange
        );

        let ok = CardioEntry::new(run, Some(25), Some(Decimal::new(5_250, 3)), Some(" ".into()))
            .unwrap();
        assert_eq!(ok.distance, Some(Decimal::new(525, 2)));
        assert_eq!(ok.notes, None);
    }
}
