//! Closed-trade ledger with running cumulative PnL.

use chrono::NaiveDate;

use super::resolver::Outcome;

/// One closed trade. Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub signal_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub outcome: Outcome,
    pub lots: f64,
    pub gross_pips: f64,
    pub net_pips: f64,
    pub pnl_currency: f64,
}

/// A ledger row: the trade plus cumulative PnL up to and including it.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub trade: Trade,
    pub cumulative_pnl: f64,
}

/// Ordered, append-only sequence of closed trades. Never mutated
/// retroactively; the cumulative column is fixed at append time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Appends must arrive in chronological order; the cumulative PnL
    /// column is a single ordered fold over them.
    pub fn append(&mut self, trade: Trade) {
        let cumulative_pnl = self.total_pnl() + trade.pnl_currency;
        self.rows.push(LedgerRow {
            trade,
            cumulative_pnl,
        });
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_pnl(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_pnl).unwrap_or(0.0)
    }
}
