use num_format::{Locale, ToFormattedString};
use roll_core::UsageRecord;

use crate::util::time::format_table_datetime;

pub const EMPTY_TABLE_MESSAGE: &str = "Belum ada data. Silakan input data baru.";

/// A history table row, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub lot: String,
    pub supplier: String,
    pub machine: String,
    pub counter: String,
    pub start_time: String,
}

pub fn format_counter(value: u64) -> String {
    value.to_formatted_string(&Locale::id)
}

pub fn table_rows(records: &[&UsageRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|record| TableRow {
            id: record.id.clone(),
            lot: record.lot.clone(),
            supplier: record.supplier.clone(),
            machine: record.machine.clone(),
            counter: format_counter(record.counter),
            start_time: format_table_datetime(&record.start_time),
        })
        .collect()
}

pub fn table_footer(shown: usize, total: usize) -> String {
    format!("Menampilkan {} dari {} data", shown, total)
}
