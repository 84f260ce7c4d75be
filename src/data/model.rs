use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Record – one sales transaction line
// ---------------------------------------------------------------------------

/// A single sales transaction (one row of the source CSV).
///
/// `total_sales` is expected to equal `units_sold * unit_price` but the
/// pipeline treats it as given and never recomputes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub region: String,
    pub country: String,
    pub product_category: String,
    pub product: String,
    pub units_sold: u64,
    pub unit_price: f64,
    pub total_sales: f64,
}

// ---------------------------------------------------------------------------
// Dimensions, time buckets, measures
// ---------------------------------------------------------------------------

/// A categorical grouping dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Region,
    Country,
    ProductCategory,
    Product,
}

impl Dimension {
    /// All categorical dimensions, in drill-down order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Country,
        Dimension::ProductCategory,
        Dimension::Product,
    ];

    /// The record field this dimension groups on.
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Dimension::Region => &record.region,
            Dimension::Country => &record.country,
            Dimension::ProductCategory => &record.product_category,
            Dimension::Product => &record.product,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Region => "Region",
            Dimension::Country => "Country",
            Dimension::ProductCategory => "ProductCategory",
            Dimension::Product => "Product",
        };
        write!(f, "{name}")
    }
}

/// Granularity for time-series grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Day,
    Month,
}

impl TimeBucket {
    /// Map a date to the start of its containing period.
    ///
    /// `Day` is the identity; `Month` floors to the first of the month.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeBucket::Day => date,
            // Day 1 always exists, so with_day cannot fail here.
            TimeBucket::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBucket::Day => write!(f, "Day"),
            TimeBucket::Month => write!(f, "Month"),
        }
    }
}

/// The dimension an aggregation groups along: a categorical field or a
/// time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Dimension(Dimension),
    Period(TimeBucket),
}

/// The numeric column being summed or averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    UnitsSold,
    UnitPrice,
    TotalSales,
}

impl Measure {
    pub fn value(&self, record: &Record) -> f64 {
        match self {
            Measure::UnitsSold => record.units_sold as f64,
            Measure::UnitPrice => record.unit_price,
            Measure::TotalSales => record.total_sales,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Measure::UnitsSold => "UnitsSold",
            Measure::UnitPrice => "UnitPrice",
            Measure::TotalSales => "TotalSales",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// KeyValue – one group label in an aggregation result
// ---------------------------------------------------------------------------

/// A distinct group in an aggregation result: either a categorical label or
/// a period-start date. `Ord` gives lexical order for labels and
/// chronological order for periods, which is also the tie-break order used
/// by the ranker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyValue {
    Label(String),
    Period(NaiveDate),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Label(s) => write!(f, "{s}"),
            KeyValue::Period(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded record store
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct-value indices.
///
/// Immutable after construction; reload means building a new value and
/// swapping it in. The distinct sets and date range exist so a caller can
/// populate "select all" filter defaults without re-scanning the records.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Sorted distinct values per categorical dimension.
    pub regions: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub products: BTreeSet<String>,
    /// Min/max record date, `None` for an empty dataset.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SalesDataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut regions = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut products = BTreeSet::new();
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;

        for rec in &records {
            regions.insert(rec.region.clone());
            countries.insert(rec.country.clone());
            categories.insert(rec.product_category.clone());
            products.insert(rec.product.clone());
            date_range = match date_range {
                None => Some((rec.date, rec.date)),
                Some((lo, hi)) => Some((lo.min(rec.date), hi.max(rec.date))),
            };
        }

        SalesDataset {
            records,
            regions,
            countries,
            categories,
            products,
            date_range,
        }
    }

    /// Sorted distinct values for a dimension.
    pub fn distinct_values(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Region => &self.regions,
            Dimension::Country => &self.countries,
            Dimension::ProductCategory => &self.categories,
            Dimension::Product => &self.products,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
