//! Daily OHLC bar representation.

use chrono::NaiveDate;

/// One day's price summary, validated and owned by a [`super::series::BarSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// close > open, the entry-trigger predicate.
    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    /// high - low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// low <= min(open, close) <= max(open, close) <= high
    pub fn is_ordered(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

/// A provider-native bar: any price field may be missing.
///
/// Missing means the provider gave no value at all, or gave NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl RawBar {
    /// Promote to a [`Bar`] if every field is present and finite.
    pub fn complete(&self) -> Option<Bar> {
        let open = present(self.open)?;
        let high = present(self.high)?;
        let low = present(self.low)?;
        let close = present(self.close)?;
        Some(Bar {
            date: self.date,
            open,
            high,
            low,
            close,
        })
    }
}

fn present(field: Option<f64>) -> Option<f64> {
    field.filter(|v| v.is_finite())
}
