//! # Price Forecast
//!
//! A Rust library for turning an irregular e-commerce price series into a
//! clean monthly series and comparing classical forecasting techniques on
//! held-out error.
//!
//! ## Pipeline
//!
//! Data flows one way through five stages, each an immutable value
//! consumed by the next:
//!
//! 1. **Regularizer** - raw (date, price) observations, possibly with
//!    duplicate dates and missing days, become a gap-marked daily series
//! 2. **Imputer** - gaps are filled by averaging forward and backward
//!    carries of the nearest known values
//! 3. **Aggregator** - days collapse into monthly means with a cyclical
//!    month-of-year feature and a contiguous integer time index
//! 4. **Splitter** - a chronological train/test partition at a fixed index
//! 5. **Harness** - a battery of forecasting strategies (trend regression,
//!    moving averages, Holt-Winters exponential smoothing) fitted on the
//!    training prefix and scored on both partitions
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use price_forecast::data::Observation;
//! use price_forecast::{aggregate_monthly, impute, regularize, split_at};
//!
//! let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let observations = vec![
//!     Observation { date: day(1), value: 10.0 },
//!     Observation { date: day(2), value: 20.0 },
//!     Observation { date: day(2), value: 30.0 }, // duplicate day, averaged
//!     Observation { date: day(3), value: 30.0 },
//!     Observation { date: day(5), value: 40.0 }, // day 4 missing, imputed
//! ];
//!
//! let daily = impute(&regularize(&observations).unwrap()).unwrap();
//! let monthly = aggregate_monthly(&daily);
//! assert_eq!(monthly.len(), 1);
//! assert_eq!(monthly.values(), vec![28.0]);
//! ```

pub mod data;
pub mod diagnostics;
pub mod error;
pub mod harness;
pub mod metrics;
pub mod models;
pub mod optimize;
pub mod pipeline;

// Re-export commonly used types
pub use crate::data::{sku_observations, DataLoader, Observation, PriceRecord};
pub use crate::error::{ForecastError, Result};
pub use crate::harness::{default_battery, Harness, Strategy, StrategyReport};
pub use crate::metrics::{forecast_accuracy, ForecastAccuracy};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::{
    aggregate_monthly, impute, regularize, split_at, ImputedSeries, MonthlySeries, RegularSeries,
    Split,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
