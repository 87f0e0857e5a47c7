use crate::model::{
    LoggedSet, MaxRepsRecord, MaxVolumeRecord, MaxWeightRecord, ProgressStats, volume_of,
};

impl ProgressStats {
    /// Scans the full (not day-reduced) history for all-time records.
    ///
    /// Every comparison is strict, so on a tie the set that appears first in
    /// `sets` keeps the record. Max weight additionally prefers more reps
    /// among sets of equal weight.
    #[must_use]
    pub fn from_sets(sets: &[LoggedSet]) -> Self {
        Self {
            max_weight: max_weight(sets),
            max_reps: max_reps(sets),
            max_volume: max_volume(sets),
        }
    }
}

fn max_weight(sets: &[LoggedSet]) -> Option<MaxWeightRecord> {
    let mut best: Option<MaxWeightRecord> = None;
    for set in sets {
        let Some(weight) = set.weight else {
            continue;
        };
        let better = best
            .as_ref()
            .is_none_or(|b| (weight, set.reps) > (b.weight, b.reps));
        if better {
            best = Some(MaxWeightRecord {
                weight,
                reps: set.reps,
                date: set.date,
            });
        }
    }
    best
}

fn max_reps(sets: &[LoggedSet]) -> Option<MaxRepsRecord> {
    let mut best: Option<MaxRepsRecord> = None;
    for set in sets {
        let Some(reps) = set.reps else {
            continue;
        };
        if best.as_ref().is_none_or(|b| reps > b.reps) {
            best = Some(MaxRepsRecord {
                reps,
                weight: set.weight,
                date: set.date,
            });
        }
    }
    best
}

fn max_volume(sets: &[LoggedSet]) -> Option<MaxVolumeRecord> {
    let mut best: Option<MaxVolumeRecord> = None;
    for set in sets {
        let (Some(weight), Some(reps)) = (set.weight, set.reps) else {
            continue;
        };
        let volume = volume_of(weight, reps);
        if best.as_ref().is_none_or(|b| volume > b.volume) {
            best = Some(MaxVolumeRecord {
                volume,
                weight,
                reps,
                date: set.date,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn set(d: u32, weight: Option<i64>, reps: Option<u32>, n: u32) -> LoggedSet {
        LoggedSet::new(day(d), weight.map(Decimal::from), reps, n)
    }

    #[test]
    fn records_from_reference_history() {
        let sets = vec![
            set(1, Some(135), Some(10), 1),
            set(1, Some(185), Some(8), 2),
            set(3, Some(205), Some(5), 1),
        ];
        let stats = ProgressStats::from_sets(&sets);

        assert_eq!(
            stats.max_weight,
            Some(MaxWeightRecord {
                weight: Decimal::from(205),
                reps: Some(5),
                date: day(3),
            })
        );
        assert_eq!(
            stats.max_reps,
            Some(MaxRepsRecord {
                reps: 10,
                weight: Some(Decimal::from(135)),
                date: day(1),
            })
        );
        assert_eq!(
            stats.max_volume,
            Some(MaxVolumeRecord {
                volume: Decimal::from(1480),
                weight: Decimal::from(185),
                reps: 8,
                date: day(1),
            })
        );
    }

    #[test]
    fn empty_history_has_no_records() {
        let stats = ProgressStats::from_sets(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats, ProgressStats::default());
    }

    #[test]
    fn max_weight_tie_prefers_more_reps_then_first_seen() {
        let sets = vec![
            set(1, Some(200), Some(3), 1),
            set(2, Some(200), Some(5), 1),
            set(3, Some(200), Some(5), 1),
            set(4, Some(200), None, 1),
        ];
        let rec = ProgressStats::from_sets(&sets).max_weight.unwrap();
        assert_eq!(rec.reps, Some(5));
        assert_eq!(rec.date, day(2));
    }

    #[test]
    fn max_reps_keeps_first_occurrence_on_tie() {
        let sets = vec![
            set(1, Some(50), Some(12), 1),
            set(2, Some(80), Some(12), 1),
        ];
        let rec = ProgressStats::from_sets(&sets).max_reps.unwrap();
        assert_eq!(rec.date, day(1));
        assert_eq!(rec.weight, Some(Decimal::from(50)));
    }

    #[test]
    fn max_volume_keeps_first_occurrence_on_tie() {
        // 100 x 6 and 150 x 4 both make 600.
        let sets = vec![
            set(1, Some(100), Some(6), 1),
            set(2, Some(150), Some(4), 1),
        ];
        let rec = ProgressStats::from_sets(&sets).max_volume.unwrap();
        assert_eq!(rec.volume, Decimal::from(600));
        assert_eq!(rec.weight, Decimal::from(100));
        assert_eq!(rec.date, day(1));
    }

    #[test]
    fn records_are_independently_absent() {
        let bodyweight = vec![set(1, None, Some(20), 1), set(2, None, Some(25), 1)];
        let stats = ProgressStats::from_sets(&bodyweight);
        assert!(stats.max_weight.is_none());
        assert!(stats.max_volume.is_none());
        let reps = stats.max_reps.unwrap();
        assert_eq!(reps.reps, 25);
        assert_eq!(reps.weight, None);

        let weight_only = vec![set(3, Some(40), None, 1)];
        let stats = ProgressStats::from_sets(&weight_only);
        assert_eq!(stats.max_weight.unwrap().reps, None);
        assert!(stats.max_reps.is_none());
        assert!(stats.max_volume.is_none());
    }

    #[test]
    fn records_dominate_every_qualifying_set() {
        let sets = vec![
            set(1, Some(60), Some(12), 1),
            set(1, Some(80), Some(8), 2),
            set(2, None, Some(30), 1),
            set(3, Some(100), Some(3), 1),
            set(3, Some(100), Some(4), 2),
            set(4, Some(90), None, 1),
            set(5, None, None, 1),
        ];
        let stats = ProgressStats::from_sets(&sets);
        let mw = stats.max_weight.unwrap();
        let mr = stats.max_reps.unwrap();
        let mv = stats.max_volume.unwrap();

        for s in &sets {
            if let Some(w) = s.weight {
                assert!(mw.weight >= w);
                if w == mw.weight {
                    assert!(mw.reps >= s.reps);
                }
            }
            if let Some(r) = s.reps {
                assert!(mr.reps >= r);
            }
            if let Some(v) = s.volume() {
                assert!(mv.volume >= v);
            }
        }
        assert_eq!(mw.reps, Some(4));
        assert_eq!(mr.reps, 30);
        assert_eq!(mv.volume, Decimal::from(720));
    }

    #[test]
    fn fractional_weights_compare_exactly() {
        let sets = vec![
            LoggedSet::new(day(1), Some(Decimal::new(1025, 1)), Some(3), 1),
            LoggedSet::new(day(2), Some(Decimal::new(10250, 2)), Some(3), 1),
        ];
        let stats = ProgressStats::from_sets(&sets);
        // 102.5 and 102.50 are equal, so the first set keeps both records.
        assert_eq!(stats.max_weight.unwrap().date, day(1));
        assert_eq!(stats.max_volume.unwrap().volume, Decimal::new(3075, 1));
    }
}
