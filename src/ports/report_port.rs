//! Result export port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::GreenbarError;

/// Port for exporting a finished backtest. The result is a read-only
/// snapshot; writing it never involves the engine again.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), GreenbarError>;
}
