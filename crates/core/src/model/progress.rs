use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//
// ─── DAILY POINT ───────────────────────────────────────────────────────────────
//

/// The representative set chosen for one calendar day, plus its volume.
///
/// `volume` is `weight * reps` when both are present, otherwise zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub weight: Option<Decimal>,
    pub reps: Option<u32>,
    pub volume: Decimal,
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Heaviest set ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxWeightRecord {
    pub weight: Decimal,
    pub reps: Option<u32>,
    pub date: NaiveDate,
}

/// Set with the most repetitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxRepsRecord {
    pub reps: u32,
    pub weight: Option<Decimal>,
    pub date: NaiveDate,
}

/// Set with the largest `weight * reps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxVolumeRecord {
    pub volume: Decimal,
    pub weight: Decimal,
    pub reps: u32,
    pub date: NaiveDate,
}

/// All-time records over a set history. Each record is absent when no set
/// carries the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub max_weight: Option<MaxWeightRecord>,
    pub max_reps: Option<MaxRepsRecord>,
    pub max_volume: Option<MaxVolumeRecord>,
}

impl ProgressStats {
    /// True when no record could be computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_weight.is_none() && self.max_reps.is_none() && self.max_volume.is_none()
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Everything the progress view needs for one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressResult {
    pub exercise_name: String,
    /// One point per distinct date, strictly ascending.
    pub points: Vec<DailyPoint>,
    pub stats: ProgressStats,
}
