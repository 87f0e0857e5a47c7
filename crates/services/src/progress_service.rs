use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lift_core::model::{DailyPoint, ExerciseId, ProgressResult, ProgressStats, UserId};
use lift_core::progress::{TimeRange, daily_points};
use storage::repository::{DateWindow, ExerciseCatalog, SetRepository};

use crate::Clock;
use crate::error::ProgressError;

/// Parameters of a progress request as they arrive from the presentation layer.
///
/// A non-empty `time_range` token wins over `start_date`/`end_date`, even one
/// that is only whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub exercise_id: ExerciseId,
    pub user_id: UserId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub time_range: Option<String>,
}

impl ProgressQuery {
    #[must_use]
    pub fn new(exercise_id: ExerciseId, user_id: UserId) -> Self {
        Self {
            exercise_id,
            user_id,
            start_date: None,
            end_date: None,
            time_range: None,
        }
    }

    #[must_use]
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    #[must_use]
    pub fn with_time_range(mut self, token: impl Into<String>) -> Self {
        self.time_range = Some(token.into());
        self
    }

    /// The store window for this query, with range tokens anchored at `today`.
    ///
    /// Bounds only apply when both ends are known; `alltime` or a half-open
    /// explicit range fetches the whole history.
    #[must_use]
    pub fn window(&self, today: NaiveDate) -> DateWindow {
        let token = self.time_range.as_deref().filter(|t| !t.is_empty());
        let (start, end) = match token {
            Some(token) => {
                let resolved = TimeRange::from_token(Some(token)).resolve(today);
                (resolved.start, Some(resolved.end))
            }
            None => (self.start_date, self.end_date),
        };
        match (start, end) {
            (Some(start), Some(end)) => DateWindow::between(start, end),
            _ => DateWindow::all(),
        }
    }
}

/// Builds per-exercise progress: one store read, then the pure pipeline.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    sets: Arc<dyn SetRepository>,
    exercises: Arc<dyn ExerciseCatalog>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sets: Arc<dyn SetRepository>,
        exercises: Arc<dyn ExerciseCatalog>,
    ) -> Self {
        Self {
            clock,
            sets,
            exercises,
        }
    }

    /// Load the daily series and all-time records for one exercise.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ExerciseNotFound` for an unknown exercise id,
    /// or `ProgressError::Storage` when the store fails.
    #[tracing::instrument(
        skip(self, query),
        fields(exercise_id = %query.exercise_id, user_id = %query.user_id)
    )]
    pub async fn get_exercise_progress(
        &self,
        query: &ProgressQuery,
    ) -> Result<ProgressResult, ProgressError> {
        let window = query.window(self.clock.today());
        let sets = self
            .sets
            .fetch_sets(query.exercise_id, query.user_id, window)
            .await
            .map_err(|e| ProgressError::from_storage(query.exercise_id, e))?;

        let points = daily_points(&sets);
        let stats = ProgressStats::from_sets(&sets);
        tracing::debug!(
            sets = sets.len(),
            points = points.len(),
            start = ?window.start,
            end = ?window.end,
            "computed exercise progress"
        );

        self.assemble(query.exercise_id, points, stats).await
    }

    /// Attach the exercise name to already computed points and records.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ExerciseNotFound` if the catalog has no such exercise.
    pub async fn assemble(
        &self,
        exercise_id: ExerciseId,
        points: Vec<DailyPoint>,
        stats: ProgressStats,
    ) -> Result<ProgressResult, ProgressError> {
        let exercise_name = self
            .exercises
            .exercise_name(exercise_id)
            .await
            .map_err(|e| ProgressError::from_storage(exercise_id, e))?;
        Ok(ProgressResult {
            exercise_name,
            points,
            stats,
        })
    }
}
