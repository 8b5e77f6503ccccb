//! Autocorrelation diagnostics and stationarity signals.
//!
//! These estimates help judge whether a strategy's trend or seasonality
//! assumptions fit the training series. They are informational only; the
//! harness never feeds them back into model selection.

use crate::error::{ForecastError, Result};
use crate::pipeline::MonthlySeries;
use serde::Serialize;
use statrs::statistics::Statistics;

// A series is treated as stationary once its lag-1 autocorrelation drops
// below this threshold.
const STATIONARY_ACF_THRESHOLD: f64 = 0.5;
// Seasonal-lag autocorrelation above this suggests one seasonal difference.
const SEASONAL_ACF_THRESHOLD: f64 = 0.64;

/// Autocorrelation estimates for lags `0..=max_lag`.
///
/// Lag 0 is always 1. Requires `max_lag < series length`, otherwise
/// [`ForecastError::InsufficientWarmup`].
pub fn acf(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    if series.len() <= max_lag {
        return Err(ForecastError::InsufficientWarmup {
            window: max_lag,
            len: series.len(),
        });
    }

    let mean = series.mean();
    let denominator: f64 = series.iter().map(|x| (x - mean).powi(2)).sum();

    let mut result = Vec::with_capacity(max_lag + 1);
    result.push(1.0);
    for lag in 1..=max_lag {
        if denominator < 1e-10 {
            // constant series carries no correlation structure
            result.push(0.0);
            continue;
        }
        let numerator: f64 = series
            .iter()
            .skip(lag)
            .zip(series)
            .map(|(x, x_lagged)| (x - mean) * (x_lagged - mean))
            .sum();
        result.push(numerator / denominator);
    }
    Ok(result)
}

/// Partial autocorrelation estimates for lags `0..=max_lag`, via the
/// Durbin-Levinson recursion over the sample autocorrelations.
pub fn pacf(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let correlations = acf(series, max_lag)?;

    let mut result = Vec::with_capacity(max_lag + 1);
    result.push(1.0);
    if max_lag == 0 {
        return Ok(result);
    }

    let mut phi = vec![vec![0.0; max_lag + 1]; max_lag + 1];
    phi[1][1] = correlations[1];
    result.push(correlations[1]);

    for k in 2..=max_lag {
        let mut numerator = correlations[k];
        let mut denominator = 1.0;
        for j in 1..k {
            numerator -= phi[k - 1][j] * correlations[k - j];
            denominator -= phi[k - 1][j] * correlations[j];
        }

        let coefficient = if denominator.abs() < 1e-10 {
            0.0
        } else {
            numerator / denominator
        };
        phi[k][k] = coefficient;
        for j in 1..k {
            phi[k][j] = phi[k - 1][j] - coefficient * phi[k - 1][k - j];
        }
        result.push(coefficient);
    }

    Ok(result)
}

/// Difference a series at the given lag: `y[t] - y[t - lag]`.
pub fn difference(series: &[f64], lag: usize) -> Vec<f64> {
    if series.len() <= lag || lag == 0 {
        return Vec::new();
    }
    series
        .iter()
        .skip(lag)
        .zip(series)
        .map(|(current, lagged)| current - lagged)
        .collect()
}

fn lag_autocorrelation(series: &[f64], lag: usize) -> f64 {
    match acf(series, lag) {
        Ok(correlations) => correlations[lag],
        Err(_) => 0.0,
    }
}

/// Minimum number of ordinary differences (capped at 2) until the lag-1
/// autocorrelation drops below the stationarity threshold.
pub fn ndiffs(series: &[f64]) -> usize {
    let mut current = series.to_vec();
    let mut count = 0;
    while count < 2 && current.len() > 2 {
        if lag_autocorrelation(&current, 1) <= STATIONARY_ACF_THRESHOLD {
            break;
        }
        current = difference(&current, 1);
        count += 1;
    }
    count
}

/// Whether one seasonal difference is warranted (0 or 1), judged by the
/// autocorrelation at the seasonal lag.
pub fn nsdiffs(series: &[f64], period: usize) -> usize {
    if period < 2 || series.len() < 2 * period {
        return 0;
    }
    if lag_autocorrelation(series, period) > SEASONAL_ACF_THRESHOLD {
        1
    } else {
        0
    }
}

/// Diagnostics bundle for one training series.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesDiagnostics {
    /// ACF of the training series, lags 0..=max_lag
    pub acf: Vec<f64>,
    /// PACF of the training series, lags 0..=max_lag
    pub pacf: Vec<f64>,
    /// ACF of the first difference
    pub diff_acf: Vec<f64>,
    /// PACF of the first difference
    pub diff_pacf: Vec<f64>,
    /// Ordinary differences suggested for stationarity
    pub ndiffs: usize,
    /// Seasonal differences suggested for stationarity
    pub nsdiffs: usize,
}

/// Compute the diagnostics bundle on a training series.
///
/// The differenced series is one element shorter, so `max_lag` must be
/// smaller than `train.len() - 1`.
pub fn diagnose(train: &MonthlySeries, max_lag: usize, period: usize) -> Result<SeriesDiagnostics> {
    let values = train.values();
    let differenced = difference(&values, 1);

    Ok(SeriesDiagnostics {
        acf: acf(&values, max_lag)?,
        pacf: pacf(&values, max_lag)?,
        diff_acf: acf(&differenced, max_lag)?,
        diff_pacf: pacf(&differenced, max_lag)?,
        ndiffs: ndiffs(&values),
        nsdiffs: nsdiffs(&values, period),
    })
}
