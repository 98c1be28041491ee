//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig, BacktestResult};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::error::GreenbarError;
use crate::domain::series::BarSeries;
use crate::domain::summary::WinRule;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "greenbar", about = "Green-bar retracement backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the available data range for a symbol
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with data files
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            symbol,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(&config, output.as_ref(), symbol.as_deref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GreenbarError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble a [`BacktestConfig`] from a validated config source.
pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, GreenbarError> {
    let start_str =
        adapter
            .get_string("backtest", "start_date")
            .ok_or_else(|| GreenbarError::ConfigMissing {
                section: "backtest".into(),
                key: "start_date".into(),
            })?;
    let end_str =
        adapter
            .get_string("backtest", "end_date")
            .ok_or_else(|| GreenbarError::ConfigMissing {
                section: "backtest".into(),
                key: "end_date".into(),
            })?;

    let start_date = parse_config_date(&start_str, "start_date")?;
    let end_date = parse_config_date(&end_str, "end_date")?;

    let win_rule = match adapter.get_string("risk", "win_rule").as_deref().map(str::trim) {
        None | Some("target") => WinRule::TargetOnly,
        Some("non-negative") => WinRule::NonNegativeExit,
        Some(other) => {
            return Err(GreenbarError::ConfigInvalid {
                section: "risk".into(),
                key: "win_rule".into(),
                reason: format!("unknown win_rule '{}'", other),
            });
        }
    };

    Ok(BacktestConfig {
        start_date,
        end_date,
        risk_per_trade: adapter.get_double("risk", "risk_per_trade", 1000.0),
        pip_value_per_lot: adapter.get_double("risk", "pip_value_per_lot", 10.0),
        pip_size: adapter.get_double("risk", "pip_size", 0.0001),
        transaction_cost_pips: adapter.get_double("risk", "transaction_cost_pips", 2.0),
        win_rule,
    })
}

fn parse_config_date(value: &str, key: &str) -> Result<NaiveDate, GreenbarError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| GreenbarError::ConfigInvalid {
        section: "backtest".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

pub fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    if let Some(s) = symbol_override {
        return Some(s.to_uppercase());
    }
    config
        .get_string("backtest", "symbol")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

fn data_adapter(config: &dyn ConfigPort) -> CsvAdapter {
    let base = config
        .get_string("data", "path")
        .unwrap_or_else(|| "./data".to_string());
    CsvAdapter::new(PathBuf::from(base))
}

fn run_backtest_command(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    symbol_override: Option<&str>,
) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: build run parameters
    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = match resolve_symbol(symbol_override, &adapter) {
        Some(s) => s,
        None => {
            eprintln!("error: symbol is required (use --symbol or set in config)");
            return ExitCode::from(2);
        }
    };

    // Stage 3: fetch and normalize bars
    eprintln!(
        "Fetching {} bars, {} to {}",
        symbol, bt_config.start_date, bt_config.end_date
    );
    let data_port = data_adapter(&adapter);
    let raw = match data_port.fetch_bars(&symbol, bt_config.start_date, bt_config.end_date) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match BarSeries::normalize(&symbol, raw) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  {} clean bars", series.len());

    // Stage 4: run the engine
    let result = run_backtest(&series, &bt_config);
    print_summary(&result);

    // Stage 5: export
    let output = output_path
        .cloned()
        .or_else(|| adapter.get_string("report", "output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("backtest.csv"));

    match CsvReportAdapter::new().write(&result, &output) {
        Ok(()) => {
            eprintln!("\nLedger written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn print_summary(result: &BacktestResult) {
    let s = &result.summary;
    eprintln!("\n=== Backtest Summary ===");
    eprintln!("Total Trades:     {}", s.total_trades);
    eprintln!("Win Rate:         {:.1}%", s.win_rate * 100.0);
    eprintln!("Avg Win:          {:.2}", s.avg_win);
    eprintln!("Median Win:       {:.2}", s.median_win);
    eprintln!("Avg Loss:         {:.2}", s.avg_loss);
    eprintln!("Median Loss:      {:.2}", s.median_loss);
    eprintln!("Largest Win:      {:.2}", s.largest_win);
    eprintln!("Largest Loss:     {:.2}", s.largest_loss);
    eprintln!("Avg Lots:         {:.2}", s.avg_lots);
    eprintln!("PnL per Lot:      {:.2}", s.pnl_per_lot);
    eprintln!("Total PnL:        {:.2}", s.total_pnl);
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = resolve_symbol(None, &adapter).unwrap_or_default();

    eprintln!("\nRun parameters:");
    eprintln!("  symbol:                {}", symbol);
    eprintln!(
        "  range:                 {} to {}",
        bt_config.start_date, bt_config.end_date
    );
    eprintln!("  risk_per_trade:        {}", bt_config.risk_per_trade);
    eprintln!("  pip_value_per_lot:     {}", bt_config.pip_value_per_lot);
    eprintln!("  pip_size:              {}", bt_config.pip_size);
    eprintln!(
        "  transaction_cost_pips: {}",
        bt_config.transaction_cost_pips
    );
    eprintln!("  win_rule:              {:?}", bt_config.win_rule);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_backtest_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(symbol_override: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let symbol = match resolve_symbol(symbol_override, &config) {
        Some(s) => s,
        None => {
            eprintln!("error: symbol is required (use --symbol or set in config)");
            return ExitCode::from(2);
        }
    };

    let adapter = data_adapter(&config);
    match adapter.get_data_range(&symbol) {
        Ok(Some((min_date, max_date, count))) => {
            println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", symbol);
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("error querying {}: {}", symbol, e);
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = data_adapter(&config);
    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No data files found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}
