//! End-to-end demo: synthesize a noisy daily price table for one SKU,
//! run the cleaning pipeline and compare the default strategy battery on
//! the last six months of held-out data.

use chrono::{Duration, NaiveDate};
use price_forecast::data::Observation;
use price_forecast::diagnostics::diagnose;
use price_forecast::{aggregate_monthly, impute, regularize, split_at, Harness};

fn main() -> price_forecast::Result<()> {
    // Three years of daily prices with a mild upward trend and an annual
    // cycle; roughly one day in seventeen is missing and one in
    // twenty-three was recorded twice.
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date");
    let mut observations = Vec::new();
    for day in 0..(3 * 365) {
        if day % 17 == 3 {
            continue;
        }
        let date = start + Duration::days(day);
        let t = day as f64;
        let season = 8.0 * (2.0 * std::f64::consts::PI * t / 365.0).sin();
        let jitter = ((day * 31) % 7) as f64 * 0.4;
        let value = 120.0 + 0.03 * t + season + jitter;
        observations.push(Observation { date, value });
        if day % 23 == 0 {
            observations.push(Observation {
                date,
                value: value + 1.0,
            });
        }
    }

    let regular = regularize(&observations)?;
    println!(
        "regularized: {} days, {} observed",
        regular.len(),
        regular.known_count()
    );

    let daily = impute(&regular)?;
    let monthly = aggregate_monthly(&daily);
    println!("aggregated: {} months", monthly.len());

    let split = split_at(&monthly, monthly.len() - 6)?;
    let harness = Harness::with_default_battery();

    let reports = harness.run(&split)?;
    for report in &reports {
        println!("{report}");
    }
    println!(
        "reports as JSON: {}",
        serde_json::to_string_pretty(&reports).expect("serializable reports")
    );

    let diagnostics = diagnose(&split.train, 13, 12)?;
    println!(
        "diagnostics: ndiffs={} nsdiffs={}",
        diagnostics.ndiffs, diagnostics.nsdiffs
    );
    println!("acf lags 1-3: {:?}", &diagnostics.acf[1..4]);
    println!("pacf lags 1-3: {:?}", &diagnostics.pacf[1..4]);

    Ok(())
}
