mod report;
mod validate;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub use report::{
    ColorMap, MONTHS_SHORT, PALETTE, Period, PeriodBucket, PeriodReport, ReportSet, ReportTab,
    SupplierTotal, UnknownReportTab, aggregate_all, aggregate_by_period, aggregate_by_supplier,
    month_short_name, supplier_colors,
};
pub use validate::{Field, FieldError, ValidRecord, ValidationErrors, validate_input};

/// Format used by `datetime-local` inputs and by the persisted collection.
pub const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A single roll usage event.
///
/// Serialized with the field names of the browser storage blob
/// (`startTime`, `mesin`) so existing collections load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub id: String,
    pub lot: String,
    pub supplier: String,
    #[serde(rename = "mesin")]
    pub machine: String,
    pub counter: u64,
    #[serde(with = "start_time_serde")]
    pub start_time: NaiveDateTime,
}

impl UsageRecord {
    pub fn from_valid(id: impl Into<String>, valid: ValidRecord) -> Self {
        Self {
            id: id.into(),
            lot: valid.lot,
            supplier: valid.supplier,
            machine: valid.machine,
            counter: valid.counter,
            start_time: valid.start_time,
        }
    }
}

/// Raw form payload, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub lot: String,
    pub supplier: String,
    pub machine: String,
    pub counter: i64,
    pub start_time: String,
}

impl RecordInput {
    /// Prefills the form from an existing record, as edit mode does.
    pub fn from_record(record: &UsageRecord) -> Self {
        Self {
            lot: record.lot.clone(),
            supplier: record.supplier.clone(),
            machine: record.machine.clone(),
            counter: i64::try_from(record.counter).unwrap_or(i64::MAX),
            start_time: format_start_time(&record.start_time),
        }
    }
}

pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    if let Some(parsed) = FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn format_start_time(value: &NaiveDateTime) -> String {
    if value.nanosecond() != 0 {
        value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    } else if value.second() != 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format(START_TIME_FORMAT).to_string()
    }
}

mod start_time_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_start_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_start_time(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid start time {raw}")))
    }
}
