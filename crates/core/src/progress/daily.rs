use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{DailyPoint, LoggedSet};

/// Ranking key for picking a day's representative set.
///
/// `Option` orders `None` below every `Some`, so an unweighted set never
/// beats a weighted one and missing reps lose the tie-break.
fn rank(set: &LoggedSet) -> (Option<Decimal>, Option<u32>) {
    (set.weight, set.reps)
}

/// Collapses a set history to one point per calendar day.
///
/// The representative set for a day is the heaviest one; reps break ties and
/// the earliest set in input order wins a full tie. Output is strictly
/// ascending by date whatever the input order.
#[must_use]
pub fn daily_points(sets: &[LoggedSet]) -> Vec<DailyPoint> {
    let mut best: BTreeMap<NaiveDate, &LoggedSet> = BTreeMap::new();
    for set in sets {
        best.entry(set.date)
            .and_modify(|current| {
                if rank(set) > rank(current) {
                    *current = set;
                }
            })
            .or_insert(set);
    }

    best.into_values()
        .map(|set| DailyPoint {
            date: set.date,
            weight: set.weight,
            reps: set.reps,
            volume: set.volume_or_zero(),
        })
        .collect()
}
