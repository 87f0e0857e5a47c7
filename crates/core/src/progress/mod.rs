//! Pure progress analytics over a single exercise's set history.
//!
//! Nothing in here touches storage: callers fetch the sets once and hand the
//! same slice to `daily_points` and `ProgressStats::from_sets`.

mod daily;
pub mod range;
mod stats;

pub use daily::daily_points;
pub use range::{ResolvedRange, TimeRange};
