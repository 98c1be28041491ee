//! Position sizing from a fixed currency risk budget.

use super::backtest::BacktestConfig;
use super::error::GreenbarError;

/// Convert a stop distance into lots so that a stop-out loses exactly the
/// risk budget before transaction cost.
///
/// The resolver abandons zero-risk plans before sizing, but the sizer
/// defends independently.
pub fn position_size(
    entry: f64,
    stop: f64,
    config: &BacktestConfig,
) -> Result<f64, GreenbarError> {
    let risk_pips = (entry - stop).abs() / config.pip_size;
    if risk_pips == 0.0 {
        return Err(GreenbarError::ZeroRisk { entry, stop });
    }
    Ok(config.risk_per_trade / (risk_pips * config.pip_value_per_lot))
}
