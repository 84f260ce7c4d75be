use std::io::Write;

use super::loader::REQUIRED_COLUMNS;
use super::model::Record;

/// Write records as CSV with the same columns and header as the input
/// file. This backs the "download filtered data" feature: inclusion is
/// simply post-filter membership, dates come out as `YYYY-MM-DD`.
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(REQUIRED_COLUMNS)?;
    for rec in records {
        out.write_record(&[
            rec.date.format("%Y-%m-%d").to_string(),
            rec.region.clone(),
            rec.country.clone(),
            rec.product_category.clone(),
            rec.product.clone(),
            rec.units_sold.to_string(),
            rec.unit_price.to_string(),
            rec.total_sales.to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
