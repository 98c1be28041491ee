//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::GreenbarError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    validate_symbol(config)?;
    validate_dates(config)?;
    validate_risk(config)?;
    validate_pip_constants(config)?;
    validate_transaction_cost(config)?;
    validate_win_rule(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    match config.get_string("backtest", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(GreenbarError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(GreenbarError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, GreenbarError> {
    match value {
        None => Err(GreenbarError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| GreenbarError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_risk(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    let value = config.get_double("risk", "risk_per_trade", 1000.0);
    if value <= 0.0 {
        return Err(GreenbarError::ConfigInvalid {
            section: "risk".to_string(),
            key: "risk_per_trade".to_string(),
            reason: "risk_per_trade must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_pip_constants(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    let pip_value = config.get_double("risk", "pip_value_per_lot", 10.0);
    if pip_value <= 0.0 {
        return Err(GreenbarError::ConfigInvalid {
            section: "risk".to_string(),
            key: "pip_value_per_lot".to_string(),
            reason: "pip_value_per_lot must be positive".to_string(),
        });
    }
    let pip_size = config.get_double("risk", "pip_size", 0.0001);
    if pip_size <= 0.0 {
        return Err(GreenbarError::ConfigInvalid {
            section: "risk".to_string(),
            key: "pip_size".to_string(),
            reason: "pip_size must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_transaction_cost(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    let value = config.get_double("risk", "transaction_cost_pips", 2.0);
    if value < 0.0 {
        return Err(GreenbarError::ConfigInvalid {
            section: "risk".to_string(),
            key: "transaction_cost_pips".to_string(),
            reason: "transaction_cost_pips must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_win_rule(config: &dyn ConfigPort) -> Result<(), GreenbarError> {
    match config.get_string("risk", "win_rule") {
        None => Ok(()),
        Some(s) => match s.trim() {
            "target" | "non-negative" => Ok(()),
            other => Err(GreenbarError::ConfigInvalid {
                section: "risk".to_string(),
                key: "win_rule".to_string(),
                reason: format!("unknown win_rule '{}', expected target or non-negative", other),
            }),
        },
    }
}
