use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{GroupKey, KeyValue, Measure, Record};

// ---------------------------------------------------------------------------
// Group-and-sum
// ---------------------------------------------------------------------------

/// Group `records` along `key` and sum `measure` per group.
///
/// One entry per distinct key value seen; key values with zero matching
/// records never appear. Period results are in ascending chronological
/// order (they feed a time series); categorical results come out in
/// ascending key order, which callers are free to re-sort.
pub fn aggregate(records: &[Record], key: GroupKey, measure: Measure) -> Vec<(KeyValue, f64)> {
    match key {
        GroupKey::Dimension(dim) => {
            let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
            for rec in records {
                *groups.entry(dim.value(rec)).or_insert(0.0) += measure.value(rec);
            }
            groups
                .into_iter()
                .map(|(label, sum)| (KeyValue::Label(label.to_string()), sum))
                .collect()
        }
        GroupKey::Period(bucket) => {
            let mut groups: BTreeMap<NaiveDate, f64> = BTreeMap::new();
            for rec in records {
                *groups.entry(bucket.period_start(rec.date)).or_insert(0.0) +=
                    measure.value(rec);
            }
            groups
                .into_iter()
                .map(|(start, sum)| (KeyValue::Period(start), sum))
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

/// Headline figures over a (possibly empty) filtered record set.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub units_sold: u64,
    /// Mean unit price; `None` over zero rows, never a division fault.
    pub avg_price: Option<f64>,
}

pub fn kpis(records: &[Record]) -> Kpis {
    let total_sales = records.iter().map(|r| r.total_sales).sum();
    let units_sold = records.iter().map(|r| r.units_sold).sum();
    let avg_price = if records.is_empty() {
        None
    } else {
        let sum: f64 = records.iter().map(|r| r.unit_price).sum();
        Some(sum / records.len() as f64)
    };
    Kpis {
        total_sales,
        units_sold,
        avg_price,
    }
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Correlation requested over fewer than 2 records. Recoverable: the
/// caller should render a placeholder instead of a heatmap.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("correlation requires at least 2 records, got {0}")]
pub struct InsufficientDataError(pub usize);

/// The measures the correlation view covers, in matrix order.
pub const CORRELATION_MEASURES: [Measure; 3] =
    [Measure::UnitsSold, Measure::UnitPrice, Measure::TotalSales];

/// Pairwise Pearson correlation over [`CORRELATION_MEASURES`].
///
/// `values[i][j]` correlates measure `i` with measure `j`. A zero-variance
/// column yields `NaN` entries, matching what pandas' `DataFrame.corr`
/// reports for a constant column.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub values: [[f64; 3]; 3],
}

pub fn correlation_matrix(records: &[Record]) -> Result<CorrelationMatrix, InsufficientDataError> {
    if records.len() < 2 {
        return Err(InsufficientDataError(records.len()));
    }

    let columns: Vec<Vec<f64>> = CORRELATION_MEASURES
        .iter()
        .map(|m| records.iter().map(|r| m.value(r)).collect())
        .collect();

    let mut values = [[0.0f64; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            values[i][j] = pearson(&columns[i], &columns[j]);
        }
    }
    Ok(CorrelationMatrix { values })
}

/// Pearson correlation coefficient of two equal-length series.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}
