//! Aggregate statistics over the closed-trade ledger.

use super::ledger::{Ledger, Trade};
use super::resolver::Outcome;

/// What counts as a winning trade.
///
/// Canonical definition is `TargetOnly`; `NonNegativeExit` treats any trade
/// closing at or above its entry as a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinRule {
    #[default]
    TargetOnly,
    NonNegativeExit,
}

impl WinRule {
    pub fn is_win(&self, trade: &Trade) -> bool {
        match self {
            WinRule::TargetOnly => trade.outcome == Outcome::Target,
            WinRule::NonNegativeExit => trade.exit_price >= trade.entry_price,
        }
    }
}

/// Derived, recomputed from the ledger on demand. Pure read, never mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_trades: usize,
    pub trades_won: usize,
    pub win_rate: f64,
    pub avg_win: f64,
    pub median_win: f64,
    pub avg_loss: f64,
    pub median_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub avg_lots: f64,
    pub pnl_per_lot: f64,
    pub total_pnl: f64,
}

impl SummaryStats {
    pub fn compute(ledger: &Ledger, win_rule: WinRule) -> Self {
        let mut wins: Vec<f64> = Vec::new();
        let mut losses: Vec<f64> = Vec::new();
        let mut total_lots = 0.0_f64;

        for row in ledger.rows() {
            let trade = &row.trade;
            total_lots += trade.lots;
            if win_rule.is_win(trade) {
                wins.push(trade.pnl_currency);
            } else {
                losses.push(trade.pnl_currency.abs());
            }
        }

        let total_trades = ledger.len();
        let trades_won = wins.len();
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };

        let avg_lots = if total_trades > 0 {
            total_lots / total_trades as f64
        } else {
            0.0
        };

        let total_pnl = ledger.total_pnl();
        let pnl_per_lot = if total_lots > 0.0 {
            total_pnl / total_lots
        } else {
            0.0
        };

        SummaryStats {
            total_trades,
            trades_won,
            win_rate,
            avg_win: mean(&wins),
            median_win: median(&mut wins),
            avg_loss: mean(&losses),
            median_loss: median(&mut losses),
            largest_win: wins.iter().cloned().fold(0.0, f64::max),
            largest_loss: losses.iter().cloned().fold(0.0, f64::max),
            avg_lots,
            pnl_per_lot,
            total_pnl,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
