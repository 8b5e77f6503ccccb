use chrono::{Duration, NaiveDate};
use price_forecast::data::Observation;
use price_forecast::error::ForecastError;
use price_forecast::harness::{default_battery, run_strategy, Harness, Strategy};
use price_forecast::pipeline::{
    aggregate_monthly, impute, regularize, split_at, MonthlyPoint, MonthlySeries,
};

/// Three years of synthetic daily prices with trend, an annual cycle,
/// gaps, and duplicate dates, pushed through the whole cleaning pipeline.
fn monthly_from_synthetic_days() -> MonthlySeries {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let mut observations = Vec::new();
    for day in 0..(3 * 365) {
        if day % 17 == 3 {
            continue; // missing day
        }
        let date = start + Duration::days(day);
        let t = day as f64;
        let season = 8.0 * (2.0 * std::f64::consts::PI * t / 365.0).sin();
        let value = 120.0 + 0.03 * t + season;
        observations.push(Observation { date, value });
        if day % 23 == 0 {
            observations.push(Observation { date, value: value + 1.0 }); // duplicate date
        }
    }

    let daily = impute(&regularize(&observations).unwrap()).unwrap();
    aggregate_monthly(&daily)
}

#[test]
fn default_battery_has_one_report_per_strategy() {
    let monthly = monthly_from_synthetic_days();
    assert_eq!(monthly.len(), 36);

    let split = split_at(&monthly, monthly.len() - 6).unwrap();
    let harness = Harness::with_default_battery();
    assert_eq!(harness.strategies().len(), 10);

    let reports = harness.run(&split).unwrap();
    assert_eq!(reports.len(), 10);

    for report in &reports {
        assert!(!report.strategy.is_empty());
        for accuracy in [&report.train, &report.test] {
            assert!(accuracy.mae.is_finite());
            assert!(accuracy.mse >= 0.0);
            assert!(accuracy.rmse.is_finite());
            assert!(accuracy.mape.is_finite());
            assert!(accuracy.smape.is_finite());
        }
    }

    // No two strategies share a report label
    let mut names: Vec<&str> = reports.iter().map(|r| r.strategy.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 10);
}

#[test]
fn seasonal_strategies_win_on_seasonal_data() {
    let monthly = monthly_from_synthetic_days();
    let split = split_at(&monthly, monthly.len() - 6).unwrap();

    let seasonal = run_strategy(
        &Strategy::HoltWintersSeasonalAdditive { period: 12 },
        &split,
    )
    .unwrap();
    let flat = run_strategy(&Strategy::HoltWintersLevel, &split).unwrap();

    // The data carries a strong annual cycle; a seasonal model must beat
    // a flat level forecast on the held-out months.
    assert!(seasonal.test.rmse < flat.test.rmse);
}

#[test]
fn reports_serialize_to_json() {
    let monthly = monthly_from_synthetic_days();
    let split = split_at(&monthly, monthly.len() - 6).unwrap();

    let reports = Harness::new(vec![Strategy::LinearTrend]).run(&split).unwrap();
    let json = serde_json::to_string(&reports).unwrap();
    assert!(json.contains("\"strategy\":\"Linear Trend\""));
    assert!(json.contains("\"rmse\""));
}

#[test]
fn strategy_precondition_failure_fails_the_run() {
    // 6 training months cannot support a period-12 seasonal fit
    let points: Vec<MonthlyPoint> = (0..8)
        .map(|i| MonthlyPoint {
            month: i as u32 + 1,
            time_index: i + 1,
            mean_value: 10.0 + i as f64,
        })
        .collect();
    let split = split_at(&MonthlySeries::from_points(points), 6).unwrap();

    let harness = Harness::new(vec![
        Strategy::LinearTrend,
        Strategy::HoltWintersSeasonalAdditive { period: 12 },
    ]);
    assert!(matches!(
        harness.run(&split),
        Err(ForecastError::InsufficientData { .. })
    ));
}

#[test]
fn harness_surfaces_train_diagnostics() {
    let monthly = monthly_from_synthetic_days();
    let split = split_at(&monthly, monthly.len() - 6).unwrap();

    let diagnostics = Harness::with_default_battery()
        .diagnose_train(&split, 13, 12)
        .unwrap();
    assert_eq!(diagnostics.acf.len(), 14); // lags 0..=13
    assert!((diagnostics.acf[0] - 1.0).abs() < 1e-12);
    // Trending data wants at least one difference
    assert!(diagnostics.ndiffs >= 1);
}

#[test]
fn battery_composition_is_stable() {
    let battery = default_battery();
    assert_eq!(battery.len(), 10);
    assert!(battery.contains(&Strategy::SimpleMovingAverage { window: 3 }));
    assert!(battery.contains(&Strategy::HoltWintersSeasonalMultiplicative { period: 12 }));
}
