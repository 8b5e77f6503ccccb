//! Loading and filtering of raw price records

use crate::error::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the input table: a price quote for a SKU on a date.
///
/// Several records may share the same SKU and date; the pipeline reduces
/// such duplicates by averaging.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRecord {
    /// Stock-keeping unit identifier
    pub sku: String,
    /// Calendar date of the quote
    pub date: NaiveDate,
    /// Quoted price
    pub price: f64,
}

/// A single (date, value) observation for one SKU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Loader for the raw price table
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load price records from a CSV file with a `sku,date,price` header.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PriceRecord>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load price records from any reader producing CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PriceRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            let record: PriceRecord = row?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Extract the observations for a single SKU, in input order.
///
/// The result may contain duplicate dates and calendar gaps; both are
/// handled downstream by the regularizer.
pub fn sku_observations(records: &[PriceRecord], sku: &str) -> Vec<Observation> {
    records
        .iter()
        .filter(|r| r.sku == sku)
        .map(|r| Observation {
            date: r.date,
            value: r.price,
        })
        .collect()
}
