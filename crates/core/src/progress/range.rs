use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Symbolic look-back window for the progress view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    OneMonth,
    ThreeMonths,
    SixMonths,
    NineMonths,
    OneYear,
    AllTime,
}

/// Concrete bounds produced by `TimeRange::resolve`. `start == None` means no lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl TimeRange {
    /// Maps a request token to a range.
    ///
    /// Tokens match exactly. A missing, empty, padded or unknown token falls
    /// back to `ThreeMonths`.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("1month") => Self::OneMonth,
            Some("3months") => Self::ThreeMonths,
            Some("6months") => Self::SixMonths,
            Some("9months") => Self::NineMonths,
            Some("1year") => Self::OneYear,
            Some("alltime") => Self::AllTime,
            _ => Self::ThreeMonths,
        }
    }

    fn months_back(self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::NineMonths => Some(9),
            Self::OneYear => Some(12),
            Self::AllTime => None,
        }
    }

    /// Resolves the range against `anchor`, which is always the end date.
    ///
    /// Month arithmetic clamps to the last day of the target month.
    #[must_use]
    pub fn resolve(self, anchor: NaiveDate) -> ResolvedRange {
        let start = self.months_back().map(|months| {
            anchor
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDate::MIN)
        });
        ResolvedRange { start, end: anchor }
    }
}

/// Token-level shorthand for `TimeRange::from_token(token).resolve(anchor)`.
#[must_use]
pub fn resolve(token: Option<&str>, anchor: NaiveDate) -> ResolvedRange {
    TimeRange::from_token(token).resolve(anchor)
}
