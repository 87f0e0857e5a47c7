use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//
// ─── LOGGED SET ────────────────────────────────────────────────────────────────
//

/// One recorded attempt at an exercise, as returned by the set store.
///
/// `weight` and `reps` are independently optional: a set may be logged as
/// bodyweight (no weight) or as a timed hold (no reps). Absence is never
/// collapsed to zero here because the progress rules rank "absent" below
/// every present value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub date: NaiveDate,
    pub weight: Option<Decimal>,
    pub reps: Option<u32>,
    /// Position of the set within its workout, starting at 1.
    pub set_number: u32,
}

impl LoggedSet {
    #[must_use]
    pub fn new(
        date: NaiveDate,
        weight: Option<Decimal>,
        reps: Option<u32>,
        set_number: u32,
    ) -> Self {
        Self {
            date,
            weight,
            reps,
            set_number,
        }
    }

    /// Weight times reps when both are present.
    #[must_use]
    pub fn volume(&self) -> Option<Decimal> {
        match (self.weight, self.reps) {
            (Some(weight), Some(reps)) => Some(volume_of(weight, reps)),
            _ => None,
        }
    }

    /// Volume with absent fields counted as zero.
    #[must_use]
    pub fn volume_or_zero(&self) -> Decimal {
        self.volume().unwrap_or(Decimal::ZERO)
    }
}

/// Exact single-set volume. Saturates instead of panicking on overflow.
#[must_use]
pub fn volume_of(weight: Decimal, reps: u32) -> Decimal {
    weight
        .checked_mul(Decimal::from(reps))
        .unwrap_or(if weight.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}
