//! Moving-average smoothing models.
//!
//! All three variants share the same shape: a window of size n, in-sample
//! smoothed values undefined for the first n-1 positions, and a
//! flat-forward forecast equal to the last smoothed value, since the
//! filter has no new information past the end of the series.

use crate::error::{ForecastError, Result};
use crate::models::{FittedValues, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::pipeline::MonthlySeries;

// Constructors already reject a zero window; here only the series length
// can invalidate the fit.
fn check_window(window: usize, len: usize) -> Result<()> {
    if window > len {
        return Err(ForecastError::InsufficientWarmup { window, len });
    }
    Ok(())
}

/// Simple Moving Average: unweighted mean over a trailing window.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    name: String,
    window: usize,
}

impl SimpleMovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "window size must be positive".to_string(),
            ));
        }
        Ok(Self {
            name: format!("Simple Moving Average (window={})", window),
            window,
        })
    }
}

/// Trained Simple Moving Average model
#[derive(Debug, Clone)]
pub struct TrainedSimpleMovingAverage {
    name: String,
    fitted: FittedValues,
    last_smoothed: f64,
}

impl ForecastModel for SimpleMovingAverage {
    type Trained = TrainedSimpleMovingAverage;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        let values = train.values();
        check_window(self.window, values.len())?;

        let mut smoothed = Vec::with_capacity(values.len() - self.window + 1);
        for i in self.window - 1..values.len() {
            let window = &values[i + 1 - self.window..=i];
            smoothed.push(window.iter().sum::<f64>() / self.window as f64);
        }

        let last_smoothed = smoothed[smoothed.len() - 1];
        Ok(TrainedSimpleMovingAverage {
            name: self.name.clone(),
            fitted: FittedValues {
                values: smoothed,
                warmup: self.window - 1,
            },
            last_smoothed,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedSimpleMovingAverage {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        ForecastResult::new(vec![self.last_smoothed; horizon], horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Weighted Moving Average: linearly increasing weights over a trailing
/// window, the most recent value weighted heaviest.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    name: String,
    window: usize,
}

impl WeightedMovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "window size must be positive".to_string(),
            ));
        }
        Ok(Self {
            name: format!("Weighted Moving Average (window={})", window),
            window,
        })
    }
}

/// Trained Weighted Moving Average model
#[derive(Debug, Clone)]
pub struct TrainedWeightedMovingAverage {
    name: String,
    fitted: FittedValues,
    last_smoothed: f64,
}

impl ForecastModel for WeightedMovingAverage {
    type Trained = TrainedWeightedMovingAverage;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        let values = train.values();
        check_window(self.window, values.len())?;

        // weights 1..=n, oldest to newest
        let denominator = (self.window * (self.window + 1)) as f64 / 2.0;
        let mut smoothed = Vec::with_capacity(values.len() - self.window + 1);
        for i in self.window - 1..values.len() {
            let window = &values[i + 1 - self.window..=i];
            let weighted: f64 = window
                .iter()
                .enumerate()
                .map(|(j, &v)| (j + 1) as f64 * v)
                .sum();
            smoothed.push(weighted / denominator);
        }

        let last_smoothed = smoothed[smoothed.len() - 1];
        Ok(TrainedWeightedMovingAverage {
            name: self.name.clone(),
            fitted: FittedValues {
                values: smoothed,
                warmup: self.window - 1,
            },
            last_smoothed,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedWeightedMovingAverage {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        ForecastResult::new(vec![self.last_smoothed; horizon], horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Exponential Moving Average with the smoothing factor derived from the
/// window size as alpha = 2 / (n + 1).
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    name: String,
    window: usize,
    alpha: f64,
}

impl ExponentialMovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "window size must be positive".to_string(),
            ));
        }
        Ok(Self {
            name: format!("Exponential Moving Average (window={})", window),
            window,
            alpha: 2.0 / (window as f64 + 1.0),
        })
    }
}

/// Trained Exponential Moving Average model
#[derive(Debug, Clone)]
pub struct TrainedExponentialMovingAverage {
    name: String,
    fitted: FittedValues,
    last_smoothed: f64,
}

impl ForecastModel for ExponentialMovingAverage {
    type Trained = TrainedExponentialMovingAverage;

    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained> {
        let values = train.values();
        check_window(self.window, values.len())?;

        // Recursion runs from the start; only values past the warm-up lag
        // are reported, matching the other window filters.
        let mut current = values[0];
        let mut smoothed = Vec::with_capacity(values.len() - self.window + 1);
        for (i, &value) in values.iter().enumerate() {
            if i > 0 {
                current = self.alpha * value + (1.0 - self.alpha) * current;
            }
            if i >= self.window - 1 {
                smoothed.push(current);
            }
        }

        let last_smoothed = smoothed[smoothed.len() - 1];
        Ok(TrainedExponentialMovingAverage {
            name: self.name.clone(),
            fitted: FittedValues {
                values: smoothed,
                warmup: self.window - 1,
            },
            last_smoothed,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedExponentialMovingAverage {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        ForecastResult::new(vec![self.last_smoothed; horizon], horizon)
    }

    fn fitted(&self) -> &FittedValues {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}
