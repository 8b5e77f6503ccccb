//! Forecasting strategies compared by the harness.
//!
//! Every strategy is split into an untrained configuration implementing
//! [`ForecastModel`] and a fitted counterpart implementing
//! [`TrainedForecastModel`], so that fitting happens exactly once per
//! train set and the fitted state is immutable afterwards.

use crate::error::{ForecastError, Result};
use crate::pipeline::MonthlySeries;
use serde::Serialize;
use std::fmt::Debug;

/// Point forecasts for a fixed horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    values: Vec<f64>,
    horizon: usize,
}

impl ForecastResult {
    /// Create a forecast result, checking values against the horizon.
    pub fn new(values: Vec<f64>, horizon: usize) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::InvalidParameter(format!(
                "values length ({}) does not match horizon ({})",
                values.len(),
                horizon
            )));
        }
        Ok(Self { values, horizon })
    }

    /// The forecasted values, one per future period.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods forecasted.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Serialize the forecast to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ForecastError::DataError(e.to_string()))
    }
}

/// In-sample fitted values of a trained strategy.
///
/// `values` aligns with the training series starting `warmup` positions
/// in: smoothing windows and recursive initializations leave the first
/// `warmup` training points without a fitted value.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedValues {
    pub values: Vec<f64>,
    pub warmup: usize,
}

/// A strategy fitted to one training series.
pub trait TrainedForecastModel: Debug {
    /// Out-of-sample point forecasts for the next `horizon` periods.
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// In-sample fitted values, offset by the warm-up lag.
    fn fitted(&self) -> &FittedValues;

    /// Human-readable name of the fitted strategy.
    fn name(&self) -> &str;
}

/// A forecasting strategy that can be fitted to a monthly series.
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced.
    type Trained: TrainedForecastModel;

    /// Fit the strategy to the training prefix of a split.
    fn train(&self, train: &MonthlySeries) -> Result<Self::Trained>;

    /// Name of the strategy.
    fn name(&self) -> &str;
}

pub mod holt_winters;
pub mod moving_average;
pub mod trend;
