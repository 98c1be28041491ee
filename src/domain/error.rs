//! Domain error types.

/// Top-level error type for greenbar.
#[derive(Debug, thiserror::Error)]
pub enum GreenbarError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("zero risk distance: entry {entry} equals stop {stop}")]
    ZeroRisk { entry: f64, stop: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GreenbarError> for std::process::ExitCode {
    fn from(err: &GreenbarError) -> Self {
        let code: u8 = match err {
            GreenbarError::Io(_) => 1,
            GreenbarError::ConfigParse { .. }
            | GreenbarError::ConfigMissing { .. }
            | GreenbarError::ConfigInvalid { .. } => 2,
            GreenbarError::Data { .. } | GreenbarError::InsufficientData { .. } => 3,
            GreenbarError::ZeroRisk { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
