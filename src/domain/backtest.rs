//! Backtest engine: per-signal evaluation folded into the ledger.

use chrono::NaiveDate;

use super::ledger::{Ledger, Trade};
use super::plan::TradePlan;
use super::pnl::PnlBreakdown;
use super::resolver::{resolve, Resolution};
use super::series::BarSeries;
use super::signal::signal_indices;
use super::sizing::position_size;
use super::summary::{SummaryStats, WinRule};

/// Fixed parameters for one run. Changing any value re-runs the whole
/// backtest deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub risk_per_trade: f64,
    pub pip_value_per_lot: f64,
    pub pip_size: f64,
    pub transaction_cost_pips: f64,
    pub win_rule: WinRule,
}

impl BacktestConfig {
    /// The defaults the tool ships with (EUR/USD daily bars).
    pub fn sample() -> Self {
        BacktestConfig {
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 28).unwrap(),
            risk_per_trade: 1000.0,
            pip_value_per_lot: 10.0,
            pip_size: 0.0001,
            transaction_cost_pips: 2.0,
            win_rule: WinRule::TargetOnly,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub ledger: Ledger,
    pub summary: SummaryStats,
}

/// Evaluate every signal against its resolution bar and fold the closed
/// trades into the ledger in chronological order.
///
/// Each signal's evaluation depends only on its own two bars; the fold
/// itself must stay ordered so the cumulative PnL column is well defined.
/// Abandoned plans, including the sizer's independent zero-risk defence,
/// leave the ledger untouched.
pub fn run_backtest(series: &BarSeries, config: &BacktestConfig) -> BacktestResult {
    let mut ledger = Ledger::new();

    for i in signal_indices(series) {
        let plan = TradePlan::from_signal(series.get(i), i);
        let resolution_bar = series.get(i + 1);

        let (exit_date, exit_price, outcome) = match resolve(&plan, resolution_bar) {
            Resolution::Abandoned(_) => continue,
            Resolution::Closed {
                exit_date,
                exit_price,
                outcome,
            } => (exit_date, exit_price, outcome),
        };

        let lots = match position_size(plan.entry, plan.stop, config) {
            Ok(lots) => lots,
            Err(_) => continue, // zero-risk plan, recovered locally
        };

        let pnl = PnlBreakdown::compute(plan.entry, exit_price, lots, config);

        ledger.append(Trade {
            signal_date: plan.signal_date,
            exit_date,
            entry_price: plan.entry,
            exit_price,
            outcome,
            lots,
            gross_pips: pnl.gross_pips,
            net_pips: pnl.net_pips,
            pnl_currency: pnl.currency,
        });
    }

    let summary = SummaryStats::compute(&ledger, config.win_rule);
    BacktestResult { ledger, summary }
}
