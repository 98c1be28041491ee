#![allow(dead_code)]

use chrono::NaiveDate;
use greenbar::domain::backtest::BacktestConfig;
pub use greenbar::domain::bar::RawBar;
use greenbar::domain::error::GreenbarError;
use greenbar::domain::series::BarSeries;
use greenbar::domain::summary::WinRule;
use greenbar::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<RawBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<RawBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawBar>, GreenbarError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(GreenbarError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, GreenbarError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GreenbarError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(GreenbarError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn raw_bar(day: u32, open: f64, high: f64, low: f64, close: f64) -> RawBar {
    RawBar {
        date: date(2024, 1, day),
        open: Some(open),
        high: Some(high),
        low: Some(low),
        close: Some(close),
    }
}

/// A red bar that never fills a retracement entry below its low.
pub fn quiet_bar(day: u32) -> RawBar {
    raw_bar(day, 1.0010, 1.0012, 1.0008, 1.0009)
}

/// The documented worked example: green setup bar followed by a resolution
/// bar that fills at 1.0010 and runs to the 1.0020 target.
pub fn target_scenario() -> Vec<RawBar> {
    vec![
        quiet_bar(1),
        raw_bar(2, 1.0000, 1.0020, 0.9990, 1.0010),
        raw_bar(3, 1.0012, 1.0025, 1.0005, 1.0018),
    ]
}

pub fn normalize(bars: Vec<RawBar>) -> BarSeries {
    BarSeries::normalize("EURUSD", bars).unwrap()
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        risk_per_trade: 1000.0,
        pip_value_per_lot: 10.0,
        pip_size: 0.0001,
        transaction_cost_pips: 2.0,
        win_rule: WinRule::TargetOnly,
    }
}
