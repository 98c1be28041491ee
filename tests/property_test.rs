//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Plan geometry holds for any ordered setup bar
//! 2. A stopped-out trade loses the risk budget plus friction, regardless of size
//! 3. Normalization output is always strictly date-ordered and complete
//! 4. Cumulative ledger PnL never drifts from the prefix sums

mod common;

use common::{date, raw_bar, sample_config};
use greenbar::domain::backtest::run_backtest;
use greenbar::domain::bar::Bar;
use greenbar::domain::ledger::{Ledger, Trade};
use greenbar::domain::plan::TradePlan;
use greenbar::domain::pnl::PnlBreakdown;
use greenbar::domain::resolver::Outcome;
use greenbar::domain::series::BarSeries;
use greenbar::domain::sizing::position_size;
use proptest::prelude::*;

fn arb_price() -> impl Strategy<Value = f64> {
    // pip-aligned prices keep the arithmetic away from denormals
    (9000u32..11000).prop_map(|p| f64::from(p) * 0.0001)
}

fn arb_range_pips() -> impl Strategy<Value = u32> {
    1u32..200
}

fn setup_bar(low: f64, range_pips: u32) -> Bar {
    let high = low + f64::from(range_pips) * 0.0001;
    Bar {
        date: date(2024, 1, 15),
        open: low,
        high,
        low,
        close: high,
    }
}

proptest! {
    /// stop <= entry <= target for every ordered setup bar, and the entry
    /// always sits one third of the range below the high.
    #[test]
    fn plan_geometry(low in arb_price(), range_pips in arb_range_pips()) {
        let bar = setup_bar(low, range_pips);
        let plan = TradePlan::from_signal(&bar, 1);

        prop_assert!(plan.stop <= plan.entry);
        prop_assert!(plan.entry <= plan.target);

        let range = bar.range();
        prop_assert!((plan.target - plan.entry - range / 3.0).abs() < 1e-9);
        prop_assert!((plan.entry - plan.stop - 2.0 * range / 3.0).abs() < 1e-9);
    }

    /// Position sizing inverts risk exactly: a trade that exits at the stop
    /// loses the full risk budget plus transaction friction, for any setup.
    #[test]
    fn stop_out_costs_budget_plus_friction(
        low in arb_price(),
        range_pips in arb_range_pips(),
    ) {
        let config = sample_config();
        let plan = TradePlan::from_signal(&setup_bar(low, range_pips), 1);

        let lots = position_size(plan.entry, plan.stop, &config).unwrap();
        let pnl = PnlBreakdown::compute(plan.entry, plan.stop, lots, &config);

        let friction = config.transaction_cost_pips * lots * config.pip_value_per_lot;
        prop_assert!((pnl.currency + config.risk_per_trade + friction).abs() < 1e-6);
    }

    /// The reward leg is half the risk leg, so a target exit always banks
    /// half the risk budget before friction.
    #[test]
    fn target_exit_banks_half_the_budget(
        low in arb_price(),
        range_pips in arb_range_pips(),
    ) {
        let config = sample_config();
        let plan = TradePlan::from_signal(&setup_bar(low, range_pips), 1);

        let lots = position_size(plan.entry, plan.stop, &config).unwrap();
        let pnl = PnlBreakdown::compute(plan.entry, plan.target, lots, &config);

        let friction = config.transaction_cost_pips * lots * config.pip_value_per_lot;
        prop_assert!((pnl.currency - (config.risk_per_trade / 2.0 - friction)).abs() < 1e-6);
    }

    /// Normalization always yields strictly increasing dates, whatever
    /// order and duplication the provider hands back.
    #[test]
    fn normalized_series_is_strictly_ordered(
        days in proptest::collection::vec(1u32..28, 3..30),
    ) {
        let raw: Vec<_> = days
            .iter()
            .map(|&d| raw_bar(d, 1.0000, 1.0020, 0.9990, 1.0010))
            .collect();

        match BarSeries::normalize("EURUSD", raw) {
            Ok(series) => {
                for pair in series.bars().windows(2) {
                    prop_assert!(pair[0].date < pair[1].date);
                }
            }
            // fewer than three distinct dates is a legitimate refusal
            Err(_) => {
                let mut distinct = days.clone();
                distinct.sort_unstable();
                distinct.dedup();
                prop_assert!(distinct.len() < 3);
            }
        }
    }

    /// The cumulative column equals the running prefix sum for any
    /// sequence of appended trades.
    #[test]
    fn cumulative_pnl_never_drifts(
        pnls in proptest::collection::vec(-2000.0..2000.0f64, 0..50),
    ) {
        let mut ledger = Ledger::new();
        for (i, pnl) in pnls.iter().enumerate() {
            ledger.append(Trade {
                signal_date: date(2024, 1, 1) + chrono::Days::new(i as u64),
                exit_date: date(2024, 1, 2) + chrono::Days::new(i as u64),
                entry_price: 1.0010,
                exit_price: 1.0010,
                outcome: Outcome::TimeExit,
                lots: 1.0,
                gross_pips: 0.0,
                net_pips: 0.0,
                pnl_currency: *pnl,
            });
        }

        let mut running = 0.0;
        for (row, pnl) in ledger.rows().iter().zip(&pnls) {
            running += pnl;
            prop_assert!((row.cumulative_pnl - running).abs() < 1e-6);
        }
        prop_assert!((ledger.total_pnl() - pnls.iter().sum::<f64>()).abs() < 1e-6);
    }

    /// Running the same series twice produces identical results.
    #[test]
    fn backtest_is_deterministic(
        days in proptest::collection::vec(1u32..28, 3..15),
        closes in proptest::collection::vec(9950u32..10050, 15),
    ) {
        let raw: Vec<_> = days
            .iter()
            .zip(&closes)
            .map(|(&d, &c)| {
                let close = f64::from(c) * 0.0001;
                raw_bar(d, 1.0000, close.max(1.0000) + 0.0005, close.min(1.0000) - 0.0005, close)
            })
            .collect();

        if let Ok(series) = BarSeries::normalize("EURUSD", raw) {
            let config = sample_config();
            let a = run_backtest(&series, &config);
            let b = run_backtest(&series, &config);
            prop_assert_eq!(a, b);
        }
    }
}
