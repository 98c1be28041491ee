//! Core domain types and logic.

pub mod bar;
pub mod series;
pub mod signal;
pub mod plan;
pub mod resolver;
pub mod sizing;
pub mod pnl;
pub mod ledger;
pub mod summary;
pub mod backtest;
pub mod config_validation;
pub mod error;
