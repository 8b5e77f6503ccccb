//! Exponential-smoothing family: level-only, level+trend, and the full
//! Holt-Winters seasonal variants.
//!
//! Smoothing parameters are not chosen by the caller; each variant
//! minimizes its in-sample sum of squared one-step errors with a bounded
//! Nelder-Mead search. The caller selects only which components are
//! enabled and, for the seasonal variants, the seasonal period.

use crate::error::{ForecastError, Result};
use crate::models::{FittedValues, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::optimize::{nelder_mead, NelderMeadConfig};
use crate::pipeline::MonthlySeries;

const PARAM_BOUNDS: (f64, f64) = (1e-4, 0.9999);

/// Type of seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalType {
    /// Additive seasonality: forecast = level + h*trend + seasonal
    #[default]
    Additive,
    /// Multiplicative seasonality: forecast = (level + h*trend) * seasonal
    Multiplicative,
}

/// Simple exponential smoothing: a level component only, forecast flat at
/// the final level.
#[derive(Debug, Clone, Default)]
pub struct HoltWintersLevel;

impl HoltWintersLevel {
    pub fn new() -> Self {
        Self
    }
}

/// Trained level-only exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedHoltWintersLevel {
    alpha: f64,
    level: f64,
    fitted: FittedValues,
}

impl TrainedHoltWintersLevel {
    /// The optimized level smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

// One-step-ahead predictions and final level for a given alpha. The first
// observation seeds the level, so fitted values start at position 1.
fn level_pass(values: &[f64], alpha: f64) -> (Vec<f64>, f64) {
    let mut level = values[0];
    let mut predictions = Vec::with_capacity(values.len() - 1);
    for &y in &values[1..] {
        predictions.push(level);
        level = alpha * y + (1.0 - alpha) * level;
    }
    (predictions, level)
}

fn level_sse(values: &[f64], alpha: f64) -> f64 {
    let mut level = values[0];
    let mut sse = 0.0;
    for &y in &values[1..] {
        let error = y - level;
        sse += error * error;
        level = alpha * y + (1.0 - alpha) * level;
    }
    sse
}

impl ForecastModel for HoltWintersLevel {
    type Trained = TrainedHoltWintersLevel;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        let values = train.values();
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        let optimum = nelder_mead(
            |p| level_sse(&values, p[0]),
            &[0.5],
            &[PARAM_BOUNDS],
            NelderMeadConfig::default(),
        );
        let alpha = optimum[0];

        let (predictions, level) = level_pass(&values, alpha);
        Ok(TrainedHoltWintersLevel {
            alpha,
            level,
            fitted: FittedValues {
                values: predictions,
                warmup: 1,
            },
        })
    }

    fn name(&self) -> &str {
        "Holt-Winters (level)"
    }
}

impl TrainedForecastModel for TrainedHoltWintersLevel {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        ForecastResult::new(vec![self.level; horizon], horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        "Holt-Winters (level)"
    }
}

/// Holt's linear method: level and trend components, no seasonality.
#[derive(Debug, Clone, Default)]
pub struct HoltWintersTrend;

impl HoltWintersTrend {
    pub fn new() -> Self {
        Self
    }
}

/// Trained level+trend exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedHoltWintersTrend {
    alpha: f64,
    beta: f64,
    level: f64,
    trend: f64,
    fitted: FittedValues,
}

impl TrainedHoltWintersTrend {
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

// The first observation seeds the level, the first difference seeds the
// trend; fitted values start at position 1.
fn trend_pass(values: &[f64], alpha: f64, beta: f64) -> (Vec<f64>, f64, f64) {
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut predictions = Vec::with_capacity(values.len() - 1);
    for &y in &values[1..] {
        predictions.push(level + trend);
        let level_prev = level;
        level = alpha * y + (1.0 - alpha) * (level_prev + trend);
        trend = beta * (level - level_prev) + (1.0 - beta) * trend;
    }
    (predictions, level, trend)
}

fn trend_sse(values: &[f64], alpha: f64, beta: f64) -> f64 {
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut sse = 0.0;
    for &y in &values[1..] {
        let error = y - (level + trend);
        sse += error * error;
        let level_prev = level;
        level = alpha * y + (1.0 - alpha) * (level_prev + trend);
        trend = beta * (level - level_prev) + (1.0 - beta) * trend;
    }
    sse
}

impl ForecastModel for HoltWintersTrend {
    type Trained = TrainedHoltWintersTrend;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        let values = train.values();
        if values.len() < 3 {
            return Err(ForecastError::InsufficientData {
                needed: 3,
                got: values.len(),
            });
        }

        let optimum = nelder_mead(
            |p| trend_sse(&values, p[0], p[1]),
            &[0.5, 0.1],
            &[PARAM_BOUNDS, PARAM_BOUNDS],
            NelderMeadConfig::default(),
        );
        let (alpha, beta) = (optimum[0], optimum[1]);

        let (predictions, level, trend) = trend_pass(&values, alpha, beta);
        Ok(TrainedHoltWintersTrend {
            alpha,
            beta,
            level,
            trend,
            fitted: FittedValues {
                values: predictions,
                warmup: 1,
            },
        })
    }

    fn name(&self) -> &str {
        "Holt-Winters (level+trend)"
    }
}

impl TrainedForecastModel for TrainedHoltWintersTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let values = (1..=horizon)
            .map(|h| self.level + h as f64 * self.trend)
            .collect();
        ForecastResult::new(values, horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        "Holt-Winters (level+trend)"
    }
}

/// Full Holt-Winters: level, trend and a seasonal component of the given
/// period, additive or multiplicative.
#[derive(Debug, Clone)]
pub struct HoltWintersSeasonal {
    name: String,
    seasonal_type: SeasonalType,
    period: usize,
}

impl HoltWintersSeasonal {
    pub fn new(seasonal_type: SeasonalType, period: usize) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::InvalidParameter(
                "seasonal period must be at least 2".to_string(),
            ));
        }
        let label = match seasonal_type {
            SeasonalType::Additive => "additive",
            SeasonalType::Multiplicative => "multiplicative",
        };
        Ok(Self {
            name: format!("Holt-Winters ({}, period={})", label, period),
            seasonal_type,
            period,
        })
    }

    pub fn additive(period: usize) -> Result<Self> {
        Self::new(SeasonalType::Additive, period)
    }

    pub fn multiplicative(period: usize) -> Result<Self> {
        Self::new(SeasonalType::Multiplicative, period)
    }
}

/// Trained seasonal Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWintersSeasonal {
    name: String,
    seasonal_type: SeasonalType,
    period: usize,
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    train_len: usize,
    fitted: FittedValues,
}

impl TrainedHoltWintersSeasonal {
    /// Final seasonal indices, one per position in the period.
    pub fn seasonals(&self) -> &[f64] {
        &self.seasonals
    }
}

struct SeasonalState {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
}

// Level starts at the mean of the first season; the trend estimate
// averages the season-over-season differences when two full seasons are
// available; seasonal indices come from the first season, normalized to
// sum to zero (additive) or average to one (multiplicative).
fn seasonal_init(values: &[f64], period: usize, seasonal_type: SeasonalType) -> SeasonalState {
    let first_season = &values[..period];
    let level = first_season.iter().sum::<f64>() / period as f64;

    let trend = if values.len() >= 2 * period {
        let sum: f64 = (0..period)
            .map(|i| (values[period + i] - values[i]) / period as f64)
            .sum();
        sum / period as f64
    } else {
        0.0
    };

    let mut seasonals: Vec<f64> = match seasonal_type {
        SeasonalType::Additive => first_season.iter().map(|y| y - level).collect(),
        SeasonalType::Multiplicative => first_season
            .iter()
            .map(|y| if level.abs() > 1e-10 { y / level } else { 1.0 })
            .collect(),
    };

    match seasonal_type {
        SeasonalType::Additive => {
            let adjustment = seasonals.iter().sum::<f64>() / period as f64;
            for s in &mut seasonals {
                *s -= adjustment;
            }
        }
        SeasonalType::Multiplicative => {
            let mean = seasonals.iter().sum::<f64>() / period as f64;
            if mean.abs() > 1e-10 {
                for s in &mut seasonals {
                    *s /= mean;
                }
            }
        }
    }

    SeasonalState {
        level,
        trend,
        seasonals,
    }
}

fn seasonal_step(
    state: &mut SeasonalState,
    y: f64,
    season_idx: usize,
    alpha: f64,
    beta: f64,
    gamma: f64,
    seasonal_type: SeasonalType,
) -> f64 {
    let s = state.seasonals[season_idx];
    let prediction = match seasonal_type {
        SeasonalType::Additive => state.level + state.trend + s,
        SeasonalType::Multiplicative => (state.level + state.trend) * s,
    };

    let level_prev = state.level;
    match seasonal_type {
        SeasonalType::Additive => {
            state.level = alpha * (y - s) + (1.0 - alpha) * (level_prev + state.trend);
            state.trend = beta * (state.level - level_prev) + (1.0 - beta) * state.trend;
            state.seasonals[season_idx] = gamma * (y - state.level) + (1.0 - gamma) * s;
        }
        SeasonalType::Multiplicative => {
            let deseasonalized = if s.abs() > 1e-10 { y / s } else { y };
            state.level = alpha * deseasonalized + (1.0 - alpha) * (level_prev + state.trend);
            state.trend = beta * (state.level - level_prev) + (1.0 - beta) * state.trend;
            if state.level.abs() > 1e-10 {
                state.seasonals[season_idx] = gamma * (y / state.level) + (1.0 - gamma) * s;
            }
        }
    }

    prediction
}

fn seasonal_sse(
    values: &[f64],
    period: usize,
    seasonal_type: SeasonalType,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> f64 {
    let mut state = seasonal_init(values, period, seasonal_type);
    let mut sse = 0.0;
    for (t, &y) in values.iter().enumerate().skip(period) {
        let prediction = seasonal_step(
            &mut state,
            y,
            t % period,
            alpha,
            beta,
            gamma,
            seasonal_type,
        );
        let error = y - prediction;
        sse += error * error;
    }
    sse
}

impl ForecastModel for HoltWintersSeasonal {
    type Trained = TrainedHoltWintersSeasonal;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        let values = train.values();
        if values.len() < 2 * self.period {
            return Err(ForecastError::InsufficientData {
                needed: 2 * self.period,
                got: values.len(),
            });
        }

        let optimum = nelder_mead(
            |p| seasonal_sse(&values, self.period, self.seasonal_type, p[0], p[1], p[2]),
            &[0.3, 0.1, 0.1],
            &[PARAM_BOUNDS, PARAM_BOUNDS, PARAM_BOUNDS],
            NelderMeadConfig::default(),
        );
        let (alpha, beta, gamma) = (optimum[0], optimum[1], optimum[2]);

        let mut state = seasonal_init(&values, self.period, self.seasonal_type);
        let mut predictions = Vec::with_capacity(values.len() - self.period);
        for (t, &y) in values.iter().enumerate().skip(self.period) {
            predictions.push(seasonal_step(
                &mut state,
                y,
                t % self.period,
                alpha,
                beta,
                gamma,
                self.seasonal_type,
            ));
        }

        Ok(TrainedHoltWintersSeasonal {
            name: self.name.clone(),
            seasonal_type: self.seasonal_type,
            period: self.period,
            level: state.level,
            trend: state.trend,
            seasonals: state.seasonals,
            train_len: values.len(),
            fitted: FittedValues {
                values: predictions,
                warmup: self.period,
            },
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedHoltWintersSeasonal {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let values = (1..=horizon)
            .map(|h| {
                let season_idx = (self.train_len + h - 1) % self.period;
                let s = self.seasonals[season_idx];
                match self.seasonal_type {
                    SeasonalType::Additive => self.level + h as f64 * self.trend + s,
                    SeasonalType::Multiplicative => (self.level + h as f64 * self.trend) * s,
                }
            })
            .collect();
        ForecastResult::new(values, horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}
