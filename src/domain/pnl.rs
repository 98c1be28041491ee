//! PnL calculation: pips to currency, net of the fixed round-trip cost.

use super::backtest::BacktestConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnlBreakdown {
    pub gross_pips: f64,
    pub net_pips: f64,
    pub currency: f64,
}

impl PnlBreakdown {
    /// The cost is always subtracted, win or lose: fixed round-trip friction.
    pub fn compute(entry: f64, exit: f64, lots: f64, config: &BacktestConfig) -> Self {
        let gross_pips = (exit - entry) / config.pip_size;
        let net_pips = gross_pips - config.transaction_cost_pips;
        let currency = net_pips * lots * config.pip_value_per_lot;
        PnlBreakdown {
            gross_pips,
            net_pips,
            currency,
        }
    }
}
