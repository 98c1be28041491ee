//! Trade planning: entry/target/stop triple from a setup bar.

use chrono::NaiveDate;

use super::bar::Bar;

/// Candidate trade levels derived from one signal bar.
///
/// Entry sits one third of the range below the high, target at the high,
/// stop at the low. Invariant: stop <= entry <= target, with equality only
/// when the range is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePlan {
    pub signal_index: usize,
    pub signal_date: NaiveDate,
    pub entry: f64,
    pub target: f64,
    pub stop: f64,
}

impl TradePlan {
    /// Pure function of the setup bar. A zero-range bar produces a
    /// degenerate plan (entry == target == stop); the resolver abandons it.
    pub fn from_signal(bar: &Bar, signal_index: usize) -> Self {
        TradePlan {
            signal_index,
            signal_date: bar.date,
            entry: bar.high - bar.range() / 3.0,
            target: bar.high,
            stop: bar.low,
        }
    }

    /// Stop distance in price units.
    pub fn risk_distance(&self) -> f64 {
        self.entry - self.stop
    }
}
