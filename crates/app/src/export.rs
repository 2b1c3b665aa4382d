use std::io::Write;

use chrono::NaiveDate;
use roll_core::UsageRecord;

use crate::error::Result;
use crate::util::time::format_locale_datetime;

pub const CSV_HEADER: [&str; 5] = ["Lot", "Supplier", "Mesin", "Counter", "Waktu Mulai"];

/// Writes the collection in its stored order. Fields that contain commas,
/// quotes or newlines are quoted.
pub fn write_csv<W: Write>(records: &[UsageRecord], writer: W) -> Result<usize> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for record in records {
        let counter = record.counter.to_string();
        let started = format_locale_datetime(&record.start_time);
        csv.write_record([
            record.lot.as_str(),
            record.supplier.as_str(),
            record.machine.as_str(),
            counter.as_str(),
            started.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(records.len())
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("roll_usage_export_{}.csv", date.format("%Y-%m-%d"))
}
