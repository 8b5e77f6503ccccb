//! Trend and seasonal regression on the monthly time index.
//!
//! Values are regressed on the integer time index by ordinary least
//! squares: degree-1 and degree-2 polynomials, plus a seasonal variant
//! that adds eleven month-of-year dummy regressors (January is the
//! baseline level). Forecasts evaluate the fitted function at the
//! continuation of the time index, which the aggregator and splitter
//! guarantee to be contiguous.

use crate::error::{ForecastError, Result};
use crate::models::{FittedValues, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::pipeline::MonthlySeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrendKind {
    Linear,
    Quadratic,
    Seasonal,
}

impl TrendKind {
    fn regressor_count(self) -> usize {
        match self {
            TrendKind::Linear => 2,
            TrendKind::Quadratic => 3,
            // intercept + trend + 11 month dummies
            TrendKind::Seasonal => 13,
        }
    }

    fn design_row(self, time_index: f64, month: u32) -> Vec<f64> {
        match self {
            TrendKind::Linear => vec![1.0, time_index],
            TrendKind::Quadratic => vec![1.0, time_index, time_index * time_index],
            TrendKind::Seasonal => {
                let mut row = Vec::with_capacity(13);
                row.push(1.0);
                row.push(time_index);
                for level in 2..=12 {
                    row.push(if month == level { 1.0 } else { 0.0 });
                }
                row
            }
        }
    }
}

/// Degree-1 polynomial trend regression.
#[derive(Debug, Clone, Default)]
pub struct LinearTrend;

impl LinearTrend {
    pub fn new() -> Self {
        Self
    }
}

/// Degree-2 polynomial trend regression.
#[derive(Debug, Clone, Default)]
pub struct QuadraticTrend;

impl QuadraticTrend {
    pub fn new() -> Self {
        Self
    }
}

/// Linear trend plus month-of-year dummy regressors.
#[derive(Debug, Clone, Default)]
pub struct SeasonalRegression;

impl SeasonalRegression {
    pub fn new() -> Self {
        Self
    }
}

/// A fitted trend regression of any of the three kinds.
#[derive(Debug, Clone)]
pub struct TrainedTrend {
    name: String,
    kind: TrendKind,
    coefficients: Vec<f64>,
    fitted: FittedValues,
    next_time_index: usize,
    next_month: u32,
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedTrend;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        fit_trend(TrendKind::Linear, self.name(), train)
    }

    fn name(&self) -> &str {
        "Linear Trend"
    }
}

impl ForecastModel for QuadraticTrend {
    type Trained = TrainedTrend;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        fit_trend(TrendKind::Quadratic, self.name(), train)
    }

    fn name(&self) -> &str {
        "Quadratic Trend"
    }
}

impl ForecastModel for SeasonalRegression {
    type Trained = TrainedTrend;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        fit_trend(TrendKind::Seasonal, self.name(), train)
    }

    fn name(&self) -> &str {
        "Seasonal Regression"
    }
}

impl TrainedForecastModel for TrainedTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let mut values = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let time_index = (self.next_time_index + step) as f64;
            let month = cycle_month(self.next_month, step);
            let row = self.kind.design_row(time_index, month);
            values.push(dot(&row, &self.coefficients));
        }
        ForecastResult::new(values, horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn cycle_month(first: u32, offset: usize) -> u32 {
    ((first as usize - 1 + offset) % 12) as u32 + 1
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn fit_trend(kind: TrendKind, name: &str, train: &MonthlySeries) -> Result<TrainedTrend> {
    let k = kind.regressor_count();
    let n = train.len();
    if n < k {
        return Err(ForecastError::InsufficientData { needed: k, got: n });
    }

    let rows: Vec<Vec<f64>> = train
        .points()
        .iter()
        .map(|p| kind.design_row(p.time_index as f64, p.month))
        .collect();
    let targets = train.values();

    let coefficients = solve_least_squares(&rows, &targets)?;
    let fitted_values: Vec<f64> = rows.iter().map(|row| dot(row, &coefficients)).collect();

    // n >= k >= 2, so the series is non-empty
    let last = train.points()[n - 1];

    Ok(TrainedTrend {
        name: name.to_string(),
        kind,
        coefficients,
        fitted: FittedValues {
            values: fitted_values,
            warmup: 0,
        },
        next_time_index: last.time_index + 1,
        next_month: last.month % 12 + 1,
    })
}

/// Solve the normal equations X'X b = X'y by Gaussian elimination with
/// partial pivoting. The regressor count is at most 13, so there is no
/// need for anything fancier.
fn solve_least_squares(rows: &[Vec<f64>], targets: &[f64]) -> Result<Vec<f64>> {
    let k = rows[0].len();

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &y) in rows.iter().zip(targets) {
        for i in 0..k {
            for j in 0..k {
                xtx[i][j] += row[i] * row[j];
            }
            xty[i] += row[i] * y;
        }
    }

    // Augment and eliminate
    for i in 0..k {
        xtx[i].push(xty[i]);
    }
    for col in 0..k {
        let pivot_row = (col..k)
            .max_by(|&a, &b| {
                xtx[a][col]
                    .abs()
                    .partial_cmp(&xtx[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| ForecastError::DataError("empty design matrix".to_string()))?;
        if xtx[pivot_row][col].abs() < 1e-12 {
            return Err(ForecastError::DataError(
                "singular normal equations: a regressor is constant or a month \
                 level is absent from the training series"
                    .to_string(),
            ));
        }
        xtx.swap(col, pivot_row);

        let pivot = xtx[col][col];
        for j in col..=k {
            xtx[col][j] /= pivot;
        }
        for row in 0..k {
            if row != col {
                let factor = xtx[row][col];
                if factor != 0.0 {
                    for j in col..=k {
                        let subtrahend = factor * xtx[col][j];
                        xtx[row][j] -= subtrahend;
                    }
                }
            }
        }
    }

    Ok(xtx.iter().map(|row| row[k]).collect())
}
