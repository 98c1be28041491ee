//! Bar series normalization.
//!
//! Shapes a provider-native bar sequence into the clean, chronological form
//! the engine requires: one setup bar plus a resolution bar at minimum.

use super::bar::{Bar, RawBar};
use super::error::GreenbarError;

/// One setup bar, one resolution bar, one boundary bar.
pub const MIN_BARS: usize = 3;

/// A cleaned, chronologically ordered bar sequence. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Normalize a raw sequence: drop bars with missing fields or broken
    /// OHLC ordering, sort ascending by date, drop duplicate dates (first
    /// occurrence wins). Fails if fewer than [`MIN_BARS`] bars remain.
    pub fn normalize(symbol: &str, raw: Vec<RawBar>) -> Result<Self, GreenbarError> {
        let mut bars: Vec<Bar> = raw
            .into_iter()
            .filter_map(|r| r.complete())
            .filter(Bar::is_ordered)
            .collect();

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        if bars.len() < MIN_BARS {
            return Err(GreenbarError::InsufficientData {
                symbol: symbol.to_string(),
                bars: bars.len(),
                minimum: MIN_BARS,
            });
        }

        Ok(BarSeries { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> &Bar {
        &self.bars[index]
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }
}
