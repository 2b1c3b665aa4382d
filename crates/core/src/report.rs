use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::UsageRecord;

/// Display colours handed out to suppliers in alphabetical order.
pub const PALETTE: [&str; 10] = [
    "#dc2626", // red-600
    "#2563eb", // blue-600
    "#d97706", // amber-600
    "#059669", // emerald-600
    "#7c3aed", // violet-600
    "#db2777", // pink-600
    "#0891b2", // cyan-600
    "#65a30d", // lime-600
    "#c026d3", // fuchsia-600
    "#ea580c", // orange-600
];

/// Abbreviated month names of the `id-ID` display locale.
pub const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agt", "Sep", "Okt", "Nov", "Des",
];

pub type ColorMap = BTreeMap<String, String>;

pub fn month_short_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTHS_SHORT.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Assigns `PALETTE[i % len]` to the i-th supplier of the sorted distinct set.
pub fn supplier_colors<'a, I>(suppliers: I) -> ColorMap
where
    I: IntoIterator<Item = &'a str>,
{
    let sorted: BTreeSet<&str> = suppliers.into_iter().collect();
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, supplier)| {
            (
                supplier.to_string(),
                PALETTE[index % PALETTE.len()].to_string(),
            )
        })
        .collect()
}

fn distinct_suppliers(records: &[UsageRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.supplier.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn color_for(colors: &ColorMap, supplier: &str) -> String {
    colors
        .get(supplier)
        .cloned()
        .unwrap_or_else(|| PALETTE[0].to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierTotal {
    pub name: String,
    pub total: u64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Rounds down to the start of the containing period. Weeks start on Monday.
    pub fn truncate(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let date = ts.date();
        let start = match self {
            Period::Day => date,
            Period::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Period::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date),
        };
        start.and_time(NaiveTime::MIN)
    }

    pub fn label(&self, bucket_start: NaiveDateTime) -> String {
        let date = bucket_start.date();
        match self {
            Period::Day | Period::Week => {
                format!("{:02} {}", date.day(), month_short_name(date.month()))
            }
            Period::Month => format!("{} {}", month_short_name(date.month()), date.year()),
        }
    }
}

/// One bar group: the truncated instant it starts at, its label, and the
/// per-supplier sub-totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    pub start: NaiveDateTime,
    pub label: String,
    pub totals: BTreeMap<String, u64>,
}

impl PeriodBucket {
    pub fn total(&self) -> u64 {
        self.totals
            .values()
            .fold(0u64, |acc, value| acc.saturating_add(*value))
    }

    pub fn get(&self, supplier: &str) -> u64 {
        self.totals.get(supplier).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub buckets: Vec<PeriodBucket>,
    pub suppliers: Vec<String>,
    pub colors: ColorMap,
}

impl PeriodReport {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

pub fn aggregate_by_supplier(records: &[UsageRecord]) -> Vec<SupplierTotal> {
    let colors = supplier_colors(records.iter().map(|record| record.supplier.as_str()));
    supplier_totals(records, &colors)
}

fn supplier_totals(records: &[UsageRecord], colors: &ColorMap) -> Vec<SupplierTotal> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.supplier.as_str()).or_insert(0);
        *total = total.saturating_add(record.counter);
    }
    let mut result: Vec<SupplierTotal> = totals
        .into_iter()
        .map(|(name, total)| SupplierTotal {
            name: name.to_string(),
            total,
            color: color_for(colors, name),
        })
        .collect();
    // Stable sort over name-ordered input keeps equal totals alphabetical.
    result.sort_by(|a, b| b.total.cmp(&a.total));
    result
}

pub fn aggregate_by_period(records: &[UsageRecord], period: Period) -> PeriodReport {
    let suppliers = distinct_suppliers(records);
    let colors = supplier_colors(suppliers.iter().map(String::as_str));
    period_report(records, period, suppliers, colors)
}

fn period_report(
    records: &[UsageRecord],
    period: Period,
    suppliers: Vec<String>,
    colors: ColorMap,
) -> PeriodReport {
    let mut grouped: BTreeMap<NaiveDateTime, BTreeMap<String, u64>> = BTreeMap::new();
    for record in records {
        let start = period.truncate(record.start_time);
        let total = grouped
            .entry(start)
            .or_default()
            .entry(record.supplier.clone())
            .or_insert(0);
        *total = total.saturating_add(record.counter);
    }
    let buckets = grouped
        .into_iter()
        .map(|(start, totals)| PeriodBucket {
            start,
            label: period.label(start),
            totals,
        })
        .collect();
    PeriodReport {
        period,
        buckets,
        suppliers,
        colors,
    }
}

/// The four chart views, computed against one colour map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSet {
    pub by_supplier: Vec<SupplierTotal>,
    pub daily: PeriodReport,
    pub weekly: PeriodReport,
    pub monthly: PeriodReport,
    pub colors: ColorMap,
}

impl ReportSet {
    pub fn is_empty(&self) -> bool {
        self.by_supplier.is_empty()
    }

    pub fn period(&self, period: Period) -> &PeriodReport {
        match period {
            Period::Day => &self.daily,
            Period::Week => &self.weekly,
            Period::Month => &self.monthly,
        }
    }
}

pub fn aggregate_all(records: &[UsageRecord]) -> ReportSet {
    let suppliers = distinct_suppliers(records);
    let colors = supplier_colors(suppliers.iter().map(String::as_str));
    ReportSet {
        by_supplier: supplier_totals(records, &colors),
        daily: period_report(records, Period::Day, suppliers.clone(), colors.clone()),
        weekly: period_report(records, Period::Week, suppliers.clone(), colors.clone()),
        monthly: period_report(records, Period::Month, suppliers, colors.clone()),
        colors,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTab {
    #[default]
    Supplier,
    Daily,
    Weekly,
    Monthly,
}

impl ReportTab {
    pub const ALL: [ReportTab; 4] = [
        ReportTab::Supplier,
        ReportTab::Daily,
        ReportTab::Weekly,
        ReportTab::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTab::Supplier => "supplier",
            ReportTab::Daily => "daily",
            ReportTab::Weekly => "weekly",
            ReportTab::Monthly => "monthly",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportTab::Supplier => "Supplier",
            ReportTab::Daily => "Harian",
            ReportTab::Weekly => "Mingguan",
            ReportTab::Monthly => "Bulanan",
        }
    }

    pub fn period(&self) -> Option<Period> {
        match self {
            ReportTab::Supplier => None,
            ReportTab::Daily => Some(Period::Day),
            ReportTab::Weekly => Some(Period::Week),
            ReportTab::Monthly => Some(Period::Month),
        }
    }
}

impl fmt::Display for ReportTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReportTab(pub String);

impl fmt::Display for UnknownReportTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported report {} (expected supplier, daily, weekly or monthly)",
            self.0
        )
    }
}

impl std::error::Error for UnknownReportTab {}

impl FromStr for ReportTab {
    type Err = UnknownReportTab;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "supplier" => Ok(ReportTab::Supplier),
            "daily" | "day" | "harian" => Ok(ReportTab::Daily),
            "weekly" | "week" | "mingguan" => Ok(ReportTab::Weekly),
            "monthly" | "month" | "bulanan" => Ok(ReportTab::Monthly),
            _ => Err(UnknownReportTab(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_start_time;

    fn record(id: &str, supplier: &str, counter: u64, start: &str) -> UsageRecord {
        UsageRecord {
            id: id.to_string(),
            lot: format!("L-{id}"),
            supplier: supplier.to_string(),
            machine: "M1".to_string(),
            counter,
            start_time: parse_start_time(start).expect("timestamp"),
        }
    }

    fn scenario() -> Vec<UsageRecord> {
        vec![
            record("1", "A", 5, "2024-01-01T08:00"),
            record("2", "B", 3, "2024-01-01T13:30"),
            record("3", "A", 2, "2024-01-02T07:15"),
        ]
    }

    #[test]
    fn supplier_view_sums_and_sorts_descending() {
        let totals = aggregate_by_supplier(&scenario());
        let pairs: Vec<(&str, u64)> = totals
            .iter()
            .map(|item| (item.name.as_str(), item.total))
            .collect();
        assert_eq!(pairs, vec![("A", 7), ("B", 3)]);
        assert_eq!(totals[0].color, PALETTE[0]);
        assert_eq!(totals[1].color, PALETTE[1]);
    }

    #[test]
    fn daily_view_groups_by_day_in_order() {
        let report = aggregate_by_period(&scenario(), Period::Day);
        assert_eq!(report.suppliers, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(report.buckets.len(), 2);
        assert_eq!(report.buckets[0].label, "01 Jan");
        assert_eq!(report.buckets[0].get("A"), 5);
        assert_eq!(report.buckets[0].get("B"), 3);
        assert_eq!(report.buckets[1].label, "02 Jan");
        assert_eq!(report.buckets[1].get("A"), 2);
        assert!(!report.buckets[1].totals.contains_key("B"));
    }

    #[test]
    fn supplier_ties_break_alphabetically() {
        let records = vec![
            record("1", "Zeta", 4, "2024-01-01T08:00"),
            record("2", "Alpha", 4, "2024-01-01T08:00"),
            record("3", "Mid", 9, "2024-01-01T08:00"),
        ];
        let names: Vec<String> = aggregate_by_supplier(&records)
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn totals_are_conserved_across_views() {
        let records = vec![
            record("1", "A", 11, "2023-12-31T23:59"),
            record("2", "B", 0, "2024-01-01T00:00"),
            record("3", "C", 250, "2024-02-29T12:00"),
            record("4", "A", 7, "2024-03-04T09:00"),
            record("5", "B", 13, "2025-01-05T10:00"),
        ];
        let expected: u64 = records.iter().map(|record| record.counter).sum();
        let reports = aggregate_all(&records);
        let supplier_sum: u64 = reports.by_supplier.iter().map(|item| item.total).sum();
        assert_eq!(supplier_sum, expected);
        for period in Period::ALL {
            let bucket_sum: u64 = reports
                .period(period)
                .buckets
                .iter()
                .map(PeriodBucket::total)
                .sum();
            assert_eq!(bucket_sum, expected, "{}", period.as_str());
        }
    }

    #[test]
    fn colors_depend_only_on_supplier_set() {
        let first = vec![
            record("1", "Citra", 1, "2024-01-01T08:00"),
            record("2", "Abadi", 50, "2024-01-02T08:00"),
            record("3", "Bintang", 2, "2024-01-03T08:00"),
        ];
        let mut second = vec![
            record("4", "Bintang", 900, "2024-05-01T08:00"),
            record("5", "Abadi", 1, "2024-05-02T08:00"),
            record("6", "Citra", 3, "2024-05-03T08:00"),
            record("7", "Citra", 3, "2024-05-03T09:00"),
        ];
        second.reverse();
        let a = aggregate_all(&first);
        let b = aggregate_all(&second);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.colors["Abadi"], PALETTE[0]);
        assert_eq!(a.colors["Citra"], PALETTE[2]);
        assert_eq!(a.daily.colors, a.colors);
        assert_eq!(a.monthly.colors, a.colors);
        for item in &a.by_supplier {
            assert_eq!(item.color, a.colors[&item.name]);
        }
    }

    #[test]
    fn palette_wraps_after_ten_suppliers() {
        let names: Vec<String> = (0..11).map(|index| format!("S{index:02}")).collect();
        let colors = supplier_colors(names.iter().map(String::as_str));
        assert_eq!(colors["S10"], PALETTE[0]);
        assert_eq!(colors["S09"], PALETTE[9]);
    }

    #[test]
    fn colliding_labels_stay_chronological() {
        let records = vec![
            record("1", "A", 1, "2025-01-05T08:00"),
            record("2", "A", 2, "2024-01-05T08:00"),
            record("3", "A", 3, "2024-06-10T08:00"),
        ];
        let report = aggregate_by_period(&records, Period::Day);
        let labels: Vec<&str> = report
            .buckets
            .iter()
            .map(|bucket| bucket.label.as_str())
            .collect();
        assert_eq!(labels, vec!["05 Jan", "10 Jun", "05 Jan"]);
        assert_eq!(report.buckets[0].get("A"), 2);
        assert_eq!(report.buckets[2].get("A"), 1);
        assert!(
            report
                .buckets
                .windows(2)
                .all(|pair| pair[0].start < pair[1].start)
        );
    }

    #[test]
    fn week_buckets_start_on_monday() {
        let records = vec![
            record("1", "A", 1, "2024-01-07T22:00"),
            record("2", "A", 2, "2024-01-01T00:00"),
            record("3", "A", 4, "2024-01-08T00:00"),
        ];
        let report = aggregate_by_period(&records, Period::Week);
        assert_eq!(report.buckets.len(), 2);
        assert_eq!(report.buckets[0].label, "01 Jan");
        assert_eq!(report.buckets[0].get("A"), 3);
        assert_eq!(report.buckets[1].label, "08 Jan");
        assert_eq!(
            report.buckets[1].start,
            parse_start_time("2024-01-08T00:00").expect("ts")
        );
    }

    #[test]
    fn month_buckets_use_month_and_year() {
        let records = vec![
            record("1", "A", 1, "2024-08-31T22:00"),
            record("2", "B", 2, "2024-08-01T00:00"),
            record("3", "A", 4, "2023-12-15T10:00"),
        ];
        let report = aggregate_by_period(&records, Period::Month);
        let labels: Vec<&str> = report
            .buckets
            .iter()
            .map(|bucket| bucket.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Des 2023", "Agt 2024"]);
        assert_eq!(report.buckets[1].total(), 3);
    }

    #[test]
    fn same_day_different_times_share_a_bucket() {
        let records = vec![
            record("1", "A", 1, "2024-04-02T00:00"),
            record("2", "A", 1, "2024-04-02T23:59"),
        ];
        let report = aggregate_by_period(&records, Period::Day);
        assert_eq!(report.buckets.len(), 1);
        assert_eq!(report.buckets[0].get("A"), 2);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let reports = aggregate_all(&[]);
        assert!(reports.is_empty());
        assert!(reports.by_supplier.is_empty());
        for period in Period::ALL {
            assert!(reports.period(period).is_empty());
            assert!(reports.period(period).suppliers.is_empty());
        }
        assert!(reports.colors.is_empty());
    }

    #[test]
    fn report_tab_parses_english_and_indonesian_names() {
        assert_eq!("weekly".parse::<ReportTab>(), Ok(ReportTab::Weekly));
        assert_eq!("Bulanan".parse::<ReportTab>(), Ok(ReportTab::Monthly));
        assert_eq!(ReportTab::Daily.period(), Some(Period::Day));
        assert!("yearly".parse::<ReportTab>().is_err());
    }
}
