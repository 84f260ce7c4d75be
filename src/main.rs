use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use salescope::data::aggregate::aggregate;
use salescope::data::model::{Dimension, GroupKey, Measure};
use salescope::state::DashboardState;

const DEFAULT_SOURCE: &str = "sales_data.csv";
const EXPORT_PATH: &str = "filtered_sales.csv";

fn main() -> Result<()> {
    env_logger::init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

    let mut state = DashboardState::default();
    state
        .load(&path)
        .with_context(|| format!("loading sales data from '{}'", path.display()))?;

    print_report(&state);

    let export = File::create(EXPORT_PATH)
        .with_context(|| format!("creating '{EXPORT_PATH}'"))?;
    state
        .export_filtered(export)
        .context("writing filtered data export")?;
    println!("\nFiltered data written to {EXPORT_PATH}");

    Ok(())
}

fn print_report(state: &DashboardState) {
    let kpis = state.kpis();
    println!("Sales Dashboard");
    println!("===============");
    println!("Total Sales: ${:.0}", kpis.total_sales);
    println!("Units Sold:  {}", kpis.units_sold);
    match kpis.avg_price {
        Some(avg) => println!("Avg Price:   ${avg:.2}"),
        None => println!("Avg Price:   -"),
    }

    println!("\nTotal Sales by {}", state.drill_level);
    for (key, sum) in state.drilldown() {
        println!("  {key:<20} {sum:>12.2}");
    }

    println!("\nSales Over Time ({})", state.time_bucket);
    for (period, sum) in state.time_series() {
        println!("  {period:<12} {sum:>12.2}");
    }

    println!("\nTop {} Products", state.top_product_count);
    for (rank, (product, sum)) in state.top_products().iter().enumerate() {
        println!("  {}. {product:<18} {sum:>12.2}", rank + 1);
    }

    // Stand-in for the choropleth: per-country totals.
    println!("\nSales by {}", Dimension::Country);
    let by_country = aggregate(
        &state.filtered,
        GroupKey::Dimension(Dimension::Country),
        Measure::TotalSales,
    );
    for (country, sum) in by_country {
        println!("  {country:<20} {sum:>12.2}");
    }

    println!("\nCorrelation (UnitsSold / UnitPrice / TotalSales)");
    match state.correlation() {
        Ok(matrix) => {
            for row in matrix.values {
                println!(
                    "  {:>7.3} {:>7.3} {:>7.3}",
                    row[0], row[1], row[2]
                );
            }
        }
        Err(e) => {
            warn!("{e}");
            println!("  not enough data for a correlation matrix");
        }
    }
}
