//! Historical-data access port trait.
//!
//! Bars come back in provider-native shape and order; normalization is the
//! domain's job.

use crate::domain::bar::RawBar;
use crate::domain::error::GreenbarError;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawBar>, GreenbarError>;

    fn list_symbols(&self) -> Result<Vec<String>, GreenbarError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GreenbarError>;
}
