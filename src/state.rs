use std::io::Write;

use chrono::NaiveDate;
use log::debug;

use crate::data::aggregate::{
    aggregate, correlation_matrix, kpis, CorrelationMatrix, InsufficientDataError, Kpis,
};
use crate::data::filter::{apply, FilterSpec};
use crate::data::model::{
    Dimension, GroupKey, KeyValue, Measure, Record, SalesDataset, TimeBucket,
};
use crate::data::rank::top_n;
use crate::data::{export, loader};

// ---------------------------------------------------------------------------
// Dashboard session state
// ---------------------------------------------------------------------------

/// Everything one dashboard session holds between interactions,
/// independent of rendering: the loaded dataset, the current filter, the
/// cached filtered records, and the per-view settings.
pub struct DashboardState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalesDataset>,

    /// Current filter selections; meaningless until a dataset is set.
    pub filter: FilterSpec,

    /// Records passing the current filter (cached, input order).
    pub filtered: Vec<Record>,

    /// Drill-down level for the bar chart view.
    pub drill_level: Dimension,

    /// Day/Month toggle for the time-series view.
    pub time_bucket: TimeBucket,

    /// Dimension for the distribution (pie) view.
    pub agg_dimension: Dimension,

    /// Top-N slider value for the product ranking.
    pub top_product_count: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter: FilterSpec::select_all(&SalesDataset::default()),
            filtered: Vec::new(),
            drill_level: Dimension::Region,
            time_bucket: TimeBucket::Month,
            agg_dimension: Dimension::Region,
            top_product_count: 5,
        }
    }
}

impl DashboardState {
    /// Ingest a newly loaded dataset and reset the filter to "everything
    /// selected, full date range", matching the dashboard's multiselect
    /// defaults.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        self.filter = FilterSpec::select_all(&dataset);
        self.filtered = dataset.records.clone();
        self.dataset = Some(dataset);
    }

    /// Recompute the cached filtered records after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filtered = apply(&ds.records, &self.filter);
            debug!(
                "filter matches {} of {} records",
                self.filtered.len(),
                ds.len()
            );
        }
    }

    /// Toggle a single value in a dimension's selection set.
    ///
    /// Only the three filterable dimensions respond; `Product` is not a
    /// filter in the dashboard and is ignored here.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        let Some(selected) = self.selection_mut(dim) else {
            return;
        };
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every known value of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        let all = match &self.dataset {
            Some(ds) => ds.distinct_values(dim).clone(),
            None => return,
        };
        if let Some(selected) = self.selection_mut(dim) {
            *selected = all;
            self.refilter();
        }
    }

    /// Deselect every value of a dimension (rejects all records).
    pub fn select_none(&mut self, dim: Dimension) {
        if let Some(selected) = self.selection_mut(dim) {
            selected.clear();
            self.refilter();
        }
    }

    /// Set the inclusive date interval.
    pub fn set_date_range(&mut self, from: NaiveDate, to: NaiveDate) {
        self.filter.date_from = from;
        self.filter.date_to = to;
        self.refilter();
    }

    fn selection_mut(
        &mut self,
        dim: Dimension,
    ) -> Option<&mut std::collections::BTreeSet<String>> {
        match dim {
            Dimension::Region => Some(&mut self.filter.regions),
            Dimension::Country => Some(&mut self.filter.countries),
            Dimension::ProductCategory => Some(&mut self.filter.categories),
            Dimension::Product => None,
        }
    }

    // -- View computations, one per dashboard widget --

    /// Headline KPI strip over the filtered records.
    pub fn kpis(&self) -> Kpis {
        kpis(&self.filtered)
    }

    /// Total sales by the current drill-down level.
    pub fn drilldown(&self) -> Vec<(KeyValue, f64)> {
        aggregate(
            &self.filtered,
            GroupKey::Dimension(self.drill_level),
            Measure::TotalSales,
        )
    }

    /// Total sales over time at the current bucket granularity.
    pub fn time_series(&self) -> Vec<(KeyValue, f64)> {
        aggregate(
            &self.filtered,
            GroupKey::Period(self.time_bucket),
            Measure::TotalSales,
        )
    }

    /// Sales distribution along the chosen aggregation dimension.
    pub fn distribution(&self) -> Vec<(KeyValue, f64)> {
        aggregate(
            &self.filtered,
            GroupKey::Dimension(self.agg_dimension),
            Measure::TotalSales,
        )
    }

    /// The top-N products by total sales.
    pub fn top_products(&self) -> Vec<(KeyValue, f64)> {
        let by_product = aggregate(
            &self.filtered,
            GroupKey::Dimension(Dimension::Product),
            Measure::TotalSales,
        );
        top_n(&by_product, self.top_product_count)
    }

    /// Pearson correlation over the numeric columns of the filtered set.
    pub fn correlation(&self) -> Result<CorrelationMatrix, InsufficientDataError> {
        correlation_matrix(&self.filtered)
    }

    /// Write the filtered records as a CSV download.
    pub fn export_filtered<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        export::write_csv(&self.filtered, writer)
    }

    /// Load a dataset from disk and ingest it.
    pub fn load(&mut self, path: &std::path::Path) -> Result<(), loader::LoadError> {
        let dataset = loader::load_csv(path)?;
        self.set_dataset(dataset);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn record(date: &str, region: &str, category: &str, product: &str, total: f64) -> Record {
        Record {
            date: date.parse().unwrap(),
            region: region.to_string(),
            country: "USA".to_string(),
            product_category: category.to_string(),
            product: product.to_string(),
            units_sold: 1,
            unit_price: total,
            total_sales: total,
        }
    }

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.set_dataset(SalesDataset::from_records(vec![
            record("2024-01-10", "US", "Toys", "Car", 20.0),
            record("2024-02-15", "US", "Toys", "Car", 10.0),
            record("2024-02-20", "EU", "Books", "Atlas", 15.0),
        ]));
        state
    }

    #[test]
    fn set_dataset_defaults_to_everything_visible() {
        let state = loaded_state();
        assert_eq!(state.filtered.len(), 3);
        assert_eq!(state.filter.regions.len(), 2);
    }

    #[test]
    fn toggling_a_region_refilters() {
        let mut state = loaded_state();
        state.toggle_filter_value(Dimension::Region, "EU");
        assert_eq!(state.filtered.len(), 2);
        assert!(state.filtered.iter().all(|r| r.region == "US"));

        state.toggle_filter_value(Dimension::Region, "EU");
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = loaded_state();
        state.select_none(Dimension::ProductCategory);
        assert!(state.filtered.is_empty());
        // Downstream views stay well-defined on the empty set.
        assert!(state.drilldown().is_empty());
        assert!(state.top_products().is_empty());
        assert_eq!(state.kpis().avg_price, None);
        assert!(state.correlation().is_err());

        state.select_all(Dimension::ProductCategory);
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn date_range_narrows_the_series() {
        let mut state = loaded_state();
        state.set_date_range("2024-02-01".parse().unwrap(), "2024-12-31".parse().unwrap());
        assert_eq!(state.filtered.len(), 2);
        let series = state.time_series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, KeyValue::Period("2024-02-01".parse().unwrap()));
    }

    #[test]
    fn top_products_respects_the_slider() {
        let mut state = loaded_state();
        state.top_product_count = 1;
        let top = state.top_products();
        assert_eq!(top, vec![(KeyValue::Label("Car".into()), 30.0)]);
    }
}
