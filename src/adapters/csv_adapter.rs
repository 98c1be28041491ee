//! CSV file data adapter.
//!
//! One file per symbol (`<SYMBOL>.csv`, columns date,open,high,low,close).
//! Blank or unparseable price fields become missing values; the series
//! normalizer decides what to do with them.

use crate::domain::bar::RawBar;
use crate::domain::error::GreenbarError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<RawBar>, GreenbarError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| GreenbarError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| GreenbarError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| GreenbarError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                GreenbarError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(RawBar {
                date,
                open: price_field(&record, 1),
                high: price_field(&record, 2),
                low: price_field(&record, 3),
                close: price_field(&record, 4),
            });
        }

        Ok(bars)
    }
}

fn price_field(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawBar>, GreenbarError> {
        let bars = self
            .read_all(symbol)?
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect();
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, GreenbarError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| GreenbarError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GreenbarError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GreenbarError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_all(symbol)?;
        let min = bars.iter().map(|b| b.date).min();
        let max = bars.iter().map(|b| b.date).max();
        match (min, max) {
            (Some(min), Some(max)) => Ok(Some((min, max, bars.len()))),
            _ => Ok(None),
        }
    }
}
