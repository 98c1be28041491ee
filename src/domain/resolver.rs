//! Fill and exit resolution against the single resolution bar.
//!
//! A plan is tested for fill and resolved to its exit on the same bar, the
//! one immediately following the setup bar. Pending plans are never carried
//! forward across multiple bars.

use super::bar::Bar;
use super::plan::TradePlan;

/// Terminal classification of a filled trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Target,
    Stop,
    TimeExit,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Target => "target",
            Outcome::Stop => "stop",
            Outcome::TimeExit => "time-exit",
        };
        f.write_str(s)
    }
}

/// Why a plan produced no trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// The resolution bar never traded down to the entry price.
    NotFilled,
    /// entry == stop: no defined risk distance, so no position size.
    ZeroRisk,
}

/// Result of resolving one plan. Terminal either way.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Abandoned(AbandonReason),
    Closed {
        /// Entry and exit both happen within the resolution bar.
        exit_date: chrono::NaiveDate,
        exit_price: f64,
        outcome: Outcome,
    },
}

/// Run the plan state machine against its resolution bar.
///
/// Fill: the bar's low must touch the entry price; the fill is assumed at
/// entry exactly. Exit priority within the same bar: target before stop
/// (favorable excursion first, since the intrabar path is unknown), then
/// mark-to-close.
pub fn resolve(plan: &TradePlan, resolution_bar: &Bar) -> Resolution {
    if plan.risk_distance() <= 0.0 {
        return Resolution::Abandoned(AbandonReason::ZeroRisk);
    }

    if resolution_bar.low > plan.entry {
        return Resolution::Abandoned(AbandonReason::NotFilled);
    }

    let (outcome, exit_price) = if resolution_bar.high >= plan.target {
        (Outcome::Target, plan.target)
    } else if resolution_bar.low <= plan.stop {
        (Outcome::Stop, plan.stop)
    } else {
        (Outcome::TimeExit, resolution_bar.close)
    };

    Resolution::Closed {
        exit_date: resolution_bar.date,
        exit_price,
        outcome,
    }
}
