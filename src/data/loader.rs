use std::path::Path;

use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use super::model::{Record, SalesDataset};

/// Column headers the source file must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Date",
    "Region",
    "Country",
    "ProductCategory",
    "Product",
    "UnitsSold",
    "UnitPrice",
    "TotalSales",
];

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Fatal load failure: the source is unreadable or a required column is
/// missing or unparsable. There is no retry path; the source is a static
/// file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {line}: {message}")]
    Row { line: usize, message: String },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Raw CSV row as it appears in the file; dates and numbers are validated
/// into a [`Record`] after deserialization.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "ProductCategory")]
    product_category: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "UnitsSold")]
    units_sold: String,
    #[serde(rename = "UnitPrice")]
    unit_price: String,
    #[serde(rename = "TotalSales")]
    total_sales: String,
}

/// Load the sales dataset from a CSV file.
///
/// Expects a header row containing all of [`REQUIRED_COLUMNS`] (extra
/// columns are ignored). Dates are normalized to [`NaiveDate`] here, once;
/// downstream components never re-parse them.
pub fn load_csv(path: &Path) -> Result<SalesDataset, LoadError> {
    let display = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?
        .clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }

    let mut records = Vec::new();
    // Line 1 is the header, so data rows start at line 2.
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        let line = i + 2;
        let raw = result.map_err(|e| LoadError::Row {
            line,
            message: e.to_string(),
        })?;
        records.push(parse_row(raw, line)?);
    }

    info!("loaded {} records from '{display}'", records.len());
    Ok(SalesDataset::from_records(records))
}

fn parse_row(raw: RawRow, line: usize) -> Result<Record, LoadError> {
    let date = parse_date(raw.date.trim()).ok_or_else(|| LoadError::Row {
        line,
        message: format!("'{}' is not a valid date", raw.date),
    })?;
    let units_sold = raw
        .units_sold
        .trim()
        .parse::<u64>()
        .map_err(|_| LoadError::Row {
            line,
            message: format!("UnitsSold '{}' is not a non-negative integer", raw.units_sold),
        })?;
    let unit_price = parse_measure(&raw.unit_price, "UnitPrice", line)?;
    let total_sales = parse_measure(&raw.total_sales, "TotalSales", line)?;

    Ok(Record {
        date,
        region: raw.region,
        country: raw.country,
        product_category: raw.product_category,
        product: raw.product,
        units_sold,
        unit_price,
        total_sales,
    })
}

fn parse_measure(value: &str, column: &str, line: usize) -> Result<f64, LoadError> {
    let parsed = value.trim().parse::<f64>().map_err(|_| LoadError::Row {
        line,
        message: format!("{column} '{value}' is not a number"),
    })?;
    if parsed < 0.0 {
        return Err(LoadError::Row {
            line,
            message: format!("{column} '{value}' is negative"),
        });
    }
    Ok(parsed)
}

/// Parse a calendar date, trying ISO `YYYY-MM-DD` first and the US
/// `MM/DD/YYYY` form as a fallback. Returns `None` when neither matches.
fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%m/%d/%Y") {
        return Some(date);
    }
    None
}
