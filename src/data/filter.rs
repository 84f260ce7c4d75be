use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Record, SalesDataset};

// ---------------------------------------------------------------------------
// FilterSpec – the conjunctive predicate narrowing the record set
// ---------------------------------------------------------------------------

/// Which values are allowed per categorical dimension, plus an inclusive
/// date interval. All four conditions are ANDed; there is no OR and no
/// negation.
///
/// An empty set rejects every record for that dimension. "Select all known
/// values" is the caller's job (see [`FilterSpec::select_all`]); the
/// pipeline itself never special-cases empty versus full sets. An inverted
/// interval (`date_from > date_to`) matches nothing and is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub regions: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl FilterSpec {
    /// A spec that admits every record of `dataset`: all distinct values
    /// selected, date interval spanning the full data range. This is how
    /// the dashboard populates its multiselect defaults.
    pub fn select_all(dataset: &SalesDataset) -> Self {
        let (date_from, date_to) = dataset
            .date_range
            .unwrap_or_else(|| (NaiveDate::MIN, NaiveDate::MAX));
        FilterSpec {
            regions: dataset.regions.clone(),
            countries: dataset.countries.clone(),
            categories: dataset.categories.clone(),
            date_from,
            date_to,
        }
    }

    /// Whether a single record passes all four conditions.
    pub fn matches(&self, record: &Record) -> bool {
        self.regions.contains(&record.region)
            && self.countries.contains(&record.country)
            && self.categories.contains(&record.product_category)
            && self.date_from <= record.date
            && record.date <= self.date_to
    }
}

/// Apply the filter to a record sequence, preserving input order.
///
/// This is a stable filter, not a set operation: the output is the exact
/// subsequence of `records` whose elements satisfy the predicate. Unknown
/// values in the allowed sets simply never match.
pub fn apply(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    records
        .iter()
        .filter(|rec| spec.matches(rec))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn record(date: &str, region: &str, country: &str, category: &str) -> Record {
        Record {
            date: date.parse().unwrap(),
            region: region.to_string(),
            country: country.to_string(),
            product_category: category.to_string(),
            product: "Widget".to_string(),
            units_sold: 1,
            unit_price: 3.0,
            total_sales: 3.0,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("2024-01-10", "US", "USA", "Toys"),
            record("2024-02-15", "US", "USA", "Toys"),
            record("2024-02-20", "EU", "Germany", "Books"),
        ]
    }

    fn spec_over(records: &[Record]) -> FilterSpec {
        FilterSpec::select_all(&SalesDataset::from_records(records.to_vec()))
    }

    #[test]
    fn select_all_admits_everything() {
        let records = sample();
        let spec = spec_over(&records);
        assert_eq!(apply(&records, &spec), records);
    }

    #[test]
    fn conjunctive_predicate_narrows_by_region_and_date() {
        let records = sample();
        let mut spec = spec_over(&records);
        spec.regions = ["US".to_string()].into();
        let out = apply(&records, &spec);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.region == "US"));

        spec.date_from = "2024-02-01".parse().unwrap();
        let out = apply(&records, &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date.to_string(), "2024-02-15");
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let records = sample();
        let mut spec = spec_over(&records);
        spec.date_from = "2024-01-10".parse().unwrap();
        spec.date_to = "2024-02-20".parse().unwrap();
        assert_eq!(apply(&records, &spec).len(), 3);

        spec.date_to = "2024-02-19".parse().unwrap();
        assert_eq!(apply(&records, &spec).len(), 2);
    }

    #[test]
    fn empty_selection_rejects_all() {
        let records = sample();
        let mut spec = spec_over(&records);
        spec.regions.clear();
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn inverted_date_range_yields_empty_not_error() {
        let records = sample();
        let mut spec = spec_over(&records);
        spec.date_from = "2024-12-31".parse().unwrap();
        spec.date_to = "2024-01-01".parse().unwrap();
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn unknown_allowed_values_are_harmless() {
        let records = sample();
        let mut spec = spec_over(&records);
        spec.regions.insert("Atlantis".to_string());
        assert_eq!(apply(&records, &spec).len(), 3);
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let records = sample();
        let mut spec = spec_over(&records);
        spec.countries = ["USA".to_string()].into();
        let once = apply(&records, &spec);
        let twice = apply(&once, &spec);
        assert_eq!(once, twice);
        // Order preserved: output dates are in input order.
        let dates: Vec<_> = once.iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
