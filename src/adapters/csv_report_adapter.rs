//! CSV report adapter: spreadsheet-friendly export of a finished run.
//!
//! Writes the ledger table to the output path and the summary record to a
//! sibling `<stem>_summary.csv`.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::GreenbarError;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn summary_path(output_path: &Path) -> std::path::PathBuf {
        let stem = output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "backtest".to_string());
        output_path.with_file_name(format!("{}_summary.csv", stem))
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), GreenbarError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| GreenbarError::Data {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        wtr.write_record([
            "date",
            "entry",
            "exit",
            "outcome",
            "lots",
            "gross_pips",
            "net_pips",
            "pnl",
            "cumulative_pnl",
        ])
        .map_err(write_error)?;

        for row in result.ledger.rows() {
            let trade = &row.trade;
            wtr.write_record([
                trade.signal_date.format("%Y-%m-%d").to_string(),
                format!("{:.5}", trade.entry_price),
                format!("{:.5}", trade.exit_price),
                trade.outcome.to_string(),
                format!("{:.2}", trade.lots),
                format!("{:.1}", trade.gross_pips),
                format!("{:.1}", trade.net_pips),
                format!("{:.2}", trade.pnl_currency),
                format!("{:.2}", row.cumulative_pnl),
            ])
            .map_err(write_error)?;
        }
        wtr.flush()?;

        let summary = &result.summary;
        let mut wtr = csv::Writer::from_path(Self::summary_path(output_path)).map_err(|e| {
            GreenbarError::Data {
                reason: format!("failed to open summary file: {}", e),
            }
        })?;

        wtr.write_record(["metric", "value"]).map_err(write_error)?;
        let rows: Vec<(&str, String)> = vec![
            ("total_trades", summary.total_trades.to_string()),
            ("trades_won", summary.trades_won.to_string()),
            ("win_rate", format!("{:.4}", summary.win_rate)),
            ("avg_win", format!("{:.2}", summary.avg_win)),
            ("median_win", format!("{:.2}", summary.median_win)),
            ("avg_loss", format!("{:.2}", summary.avg_loss)),
            ("median_loss", format!("{:.2}", summary.median_loss)),
            ("largest_win", format!("{:.2}", summary.largest_win)),
            ("largest_loss", format!("{:.2}", summary.largest_loss)),
            ("avg_lots", format!("{:.2}", summary.avg_lots)),
            ("pnl_per_lot", format!("{:.2}", summary.pnl_per_lot)),
            ("total_pnl", format!("{:.2}", summary.total_pnl)),
        ];
        for (metric, value) in rows {
            wtr.write_record([metric, &value]).map_err(write_error)?;
        }
        wtr.flush()?;

        Ok(())
    }
}

fn write_error(e: csv::Error) -> GreenbarError {
    GreenbarError::Data {
        reason: format!("CSV write error: {}", e),
    }
}
