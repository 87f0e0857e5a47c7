use std::sync::Arc;

use lift_core::model::{CardioActivity, normalize_activity_name};
use storage::repository::{CardioCatalog, StorageError};

use crate::error::CardioServiceError;

/// Reads and extends the cardio activity catalog.
#[derive(Clone)]
pub struct CardioService {
    activities: Arc<dyn CardioCatalog>,
}

impl CardioService {
    #[must_use]
    pub fn new(activities: Arc<dyn CardioCatalog>) -> Self {
        Self { activities }
    }

    /// Every cardio activity, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `CardioServiceError::Storage` if repository access fails.
    pub async fn list_activities(&self) -> Result<Vec<CardioActivity>, CardioServiceError> {
        let activities = self.activities.list_activities().await?;
        Ok(activities)
    }

    /// Add a cardio activity to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CardioServiceError::Invalid` for a blank or overlong name,
    /// `CardioServiceError::Duplicate` if the name is taken.
    pub async fn create_activity(&self, name: &str) -> Result<CardioActivity, CardioServiceError> {
        let name = normalize_activity_name(name).map_err(lift_core::Error::from)?;
        let id = match self.activities.insert_activity(&name).await {
            Ok(id) => id,
            Err(StorageError::Conflict) => return Err(CardioServiceError::Duplicate),
            Err(other) => return Err(other.into()),
        };
        tracing::info!(activity_id = %id, %name, "created cardio activity");
        CardioActivity::new(id, name).map_err(|e| lift_core::Error::from(e).into())
    }

    /// Resolve an activity by name, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CardioServiceError::Storage` if repository access fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CardioActivity>, CardioServiceError> {
        let wanted = name.trim();
        let found = self
            .activities
            .list_activities()
            .await?
            .into_iter()
            .find(|a| a.name() == wanted);
        Ok(found)
    }
}
