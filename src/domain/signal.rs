//! Signal detection: green bars at interior positions.

use super::series::BarSeries;

/// Lazy ascending iterator over setup-bar indices.
///
/// Interior positions only: the first bar has no preceding context and the
/// last bar has no resolution bar, so neither can carry a signal.
pub fn signal_indices(series: &BarSeries) -> impl Iterator<Item = usize> + '_ {
    (1..series.len().saturating_sub(1)).filter(move |&i| series.get(i).is_green())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::RawBar;
    use chrono::NaiveDate;

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        // open fixed at 1.0, so close > 1.0 makes a green bar
        let raw: Vec<RawBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| RawBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: Some(1.0),
                high: Some(close.max(1.0) + 0.1),
                low: Some(close.min(1.0) - 0.1),
                close: Some(close),
            })
            .collect();
        BarSeries::normalize("EURUSD", raw).unwrap()
    }

    #[test]
    fn detects_interior_green_bars() {
        let series = series_from_closes(&[1.5, 0.5, 1.5, 1.5, 0.5]);
        let signals: Vec<usize> = signal_indices(&series).collect();
        assert_eq!(signals, vec![2, 3]);
    }

    #[test]
    fn excludes_first_and_last_bar() {
        // all green, but boundary bars never signal
        let series = series_from_closes(&[1.5, 1.5, 1.5]);
        let signals: Vec<usize> = signal_indices(&series).collect();
        assert_eq!(signals, vec![1]);
    }

    #[test]
    fn no_signals_in_red_series() {
        let series = series_from_closes(&[0.5, 0.5, 0.5, 0.5]);
        assert_eq!(signal_indices(&series).count(), 0);
    }

    #[test]
    fn doji_is_not_a_signal() {
        let series = series_from_closes(&[0.5, 1.0, 0.5]);
        assert_eq!(signal_indices(&series).count(), 0);
    }

    #[test]
    fn restartable_without_side_effects() {
        let series = series_from_closes(&[1.5, 0.5, 1.5, 0.5, 1.5]);
        let first: Vec<usize> = signal_indices(&series).collect();
        let second: Vec<usize> = signal_indices(&series).collect();
        assert_eq!(first, second);
    }
}
