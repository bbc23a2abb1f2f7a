//! CSV export with a declared column schema.

use std::io::Write;

use crate::error::ExportError;
use crate::record::ItemRecord;

/// Export columns, in order. Declared here rather than derived from row
/// key enumeration so every export has the same header.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "compositeId",
    "productName",
    "size",
    "color",
    "quantity",
    "price",
    "brand",
    "category",
    "remarks",
    "lastUpdated",
];

/// Write the given rows as CSV. Every field is quoted; embedded quotes,
/// commas, and newlines in free text survive the round trip. Returns the
/// number of data rows written.
pub fn write_csv<W: Write>(records: &[ItemRecord], out: W) -> Result<usize, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(EXPORT_COLUMNS)?;

    for record in records {
        let quantity = record.quantity.to_string();
        let last_updated = record.last_updated.to_rfc3339();
        writer.write_record([
            record.composite_id.as_str(),
            record.product_name.as_str(),
            record.size.as_str(),
            record.color.as_str(),
            quantity.as_str(),
            record.price.as_deref().unwrap_or(""),
            record.brand.as_deref().unwrap_or(""),
            record.category.as_deref().unwrap_or(""),
            record.remarks.as_deref().unwrap_or(""),
            last_updated.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(records.len())
}
