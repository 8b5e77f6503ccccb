//! Comparison harness: fit a battery of strategies on one split and
//! report held-out error per strategy.
//!
//! The harness compares, it never ensembles: each strategy gets its own
//! report and no averaging happens across strategies.

use crate::diagnostics::{diagnose, SeriesDiagnostics};
use crate::error::Result;
use crate::metrics::{forecast_accuracy, ForecastAccuracy};
use crate::models::holt_winters::{HoltWintersLevel, HoltWintersSeasonal, HoltWintersTrend};
use crate::models::moving_average::{
    ExponentialMovingAverage, SimpleMovingAverage, WeightedMovingAverage,
};
use crate::models::trend::{LinearTrend, QuadraticTrend, SeasonalRegression};
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::pipeline::Split;
use serde::Serialize;

/// Selection of one forecasting strategy, with its tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    LinearTrend,
    QuadraticTrend,
    SeasonalRegression,
    SimpleMovingAverage { window: usize },
    WeightedMovingAverage { window: usize },
    ExponentialMovingAverage { window: usize },
    HoltWintersLevel,
    HoltWintersTrend,
    HoltWintersSeasonalAdditive { period: usize },
    HoltWintersSeasonalMultiplicative { period: usize },
}

/// The full strategy battery with conventional settings for monthly data:
/// three-month smoothing windows and a twelve-month seasonal period.
pub fn default_battery() -> Vec<Strategy> {
    vec![
        Strategy::LinearTrend,
        Strategy::QuadraticTrend,
        Strategy::SeasonalRegression,
        Strategy::SimpleMovingAverage { window: 3 },
        Strategy::WeightedMovingAverage { window: 3 },
        Strategy::ExponentialMovingAverage { window: 3 },
        Strategy::HoltWintersLevel,
        Strategy::HoltWintersTrend,
        Strategy::HoltWintersSeasonalAdditive { period: 12 },
        Strategy::HoltWintersSeasonalMultiplicative { period: 12 },
    ]
}

/// Per-strategy error report on one split.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    /// Name of the fitted strategy
    pub strategy: String,
    /// Accuracy of in-sample fitted values against the training actuals,
    /// aligned past the warm-up lag
    pub train: ForecastAccuracy,
    /// Accuracy of the out-of-sample forecast against the test actuals
    pub test: ForecastAccuracy,
}

impl std::fmt::Display for StrategyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.strategy)?;
        writeln!(f, " train:")?;
        write!(f, "{}", self.train)?;
        writeln!(f, " test:")?;
        write!(f, "{}", self.test)?;
        Ok(())
    }
}

/// Runs a configured battery of strategies against one split.
#[derive(Debug, Clone)]
pub struct Harness {
    strategies: Vec<Strategy>,
}

impl Harness {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn with_default_battery() -> Self {
        Self::new(default_battery())
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Fit every configured strategy on the training prefix and report
    /// train and test accuracy for each. A strategy whose preconditions
    /// the split cannot satisfy fails the run with its own error.
    pub fn run(&self, split: &Split) -> Result<Vec<StrategyReport>> {
        self.strategies
            .iter()
            .map(|strategy| run_strategy(strategy, split))
            .collect()
    }

    /// Diagnostics on the training series of a split.
    pub fn diagnose_train(
        &self,
        split: &Split,
        max_lag: usize,
        period: usize,
    ) -> Result<SeriesDiagnostics> {
        diagnose(&split.train, max_lag, period)
    }
}

/// Fit a single strategy on the split's training prefix and evaluate it.
pub fn run_strategy(strategy: &Strategy, split: &Split) -> Result<StrategyReport> {
    match strategy {
        Strategy::LinearTrend => evaluate(LinearTrend::new(), split),
        Strategy::QuadraticTrend => evaluate(QuadraticTrend::new(), split),
        Strategy::SeasonalRegression => evaluate(SeasonalRegression::new(), split),
        Strategy::SimpleMovingAverage { window } => {
            evaluate(SimpleMovingAverage::new(*window)?, split)
        }
        Strategy::WeightedMovingAverage { window } => {
            evaluate(WeightedMovingAverage::new(*window)?, split)
        }
        Strategy::ExponentialMovingAverage { window } => {
            evaluate(ExponentialMovingAverage::new(*window)?, split)
        }
        Strategy::HoltWintersLevel => evaluate(HoltWintersLevel::new(), split),
        Strategy::HoltWintersTrend => evaluate(HoltWintersTrend::new(), split),
        Strategy::HoltWintersSeasonalAdditive { period } => {
            evaluate(HoltWintersSeasonal::additive(*period)?, split)
        }
        Strategy::HoltWintersSeasonalMultiplicative { period } => {
            evaluate(HoltWintersSeasonal::multiplicative(*period)?, split)
        }
    }
}

fn evaluate<M: ForecastModel>(model: M, split: &Split) -> Result<StrategyReport> {
    let trained = model.train(&split.train)?;

    let train_actual = split.train.values();
    let fitted = trained.fitted();
    let train = forecast_accuracy(&train_actual[fitted.warmup..], &fitted.values)?;

    let forecast = trained.forecast(split.test.len())?;
    let test_actual = split.test.values();
    let test = forecast_accuracy(&test_actual, forecast.values())?;

    Ok(StrategyReport {
        strategy: trained.name().to_string(),
        train,
        test,
    })
}
