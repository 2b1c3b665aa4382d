use std::fmt::Write;

use chrono::NaiveDate;
use roll_app::{
    DashboardObserver, DashboardSnapshot, EMPTY_TABLE_MESSAGE, TableRow, format_counter,
    format_header_date, table_footer,
};
use roll_core::{PeriodReport, ReportSet, ReportTab, SupplierTotal};

const BAR_WIDTH: u64 = 40;
const CHART_TITLE: &str = "Analisa Penggunaan";

pub fn render_header(today: NaiveDate) -> String {
    format!(
        "PT Santos Jaya Abadi\nRoll Usage Monitor\n{}\n",
        format_header_date(today)
    )
}

pub fn render_welcome() -> String {
    "Selamat Datang\n\
Aplikasi Monitoring Penggunaan Roll PT Santos Jaya Abadi. Silakan catat dan pantau penggunaan roll produksi Anda.\n"
        .to_string()
}

/// The chart card for one tab. Nothing is drawn without data.
pub fn render_tab(reports: &ReportSet, tab: ReportTab) -> String {
    if reports.is_empty() {
        return String::new();
    }
    let mut out = format!("{} - {}\n", CHART_TITLE, tab.title());
    let body = match tab.period() {
        None => render_suppliers(&reports.by_supplier),
        Some(period) => render_period(reports.period(period)),
    };
    out.push_str(&body);
    out
}

pub fn render_suppliers(totals: &[SupplierTotal]) -> String {
    let max = totals.iter().map(|item| item.total).max().unwrap_or(0);
    let name_width = totals.iter().map(|item| item.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for item in totals {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<bar$}  {} {}",
            item.name,
            bar(item.total, max),
            format_counter(item.total),
            item.color,
            bar = BAR_WIDTH as usize,
        );
    }
    out
}

/// One line per bucket, then one indented line per supplier present in it,
/// in the report's supplier order.
pub fn render_period(report: &PeriodReport) -> String {
    let max = report
        .buckets
        .iter()
        .map(|bucket| bucket.total())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for bucket in &report.buckets {
        let total = bucket.total();
        let _ = writeln!(
            out,
            "{:<8}  {:<bar$}  {}",
            bucket.label,
            bar(total, max),
            format_counter(total),
            bar = BAR_WIDTH as usize,
        );
        for supplier in &report.suppliers {
            let value = bucket.get(supplier);
            if value == 0 {
                continue;
            }
            let color = report.colors.get(supplier).map(String::as_str).unwrap_or("");
            let _ = writeln!(out, "  {} {} {}", supplier, format_counter(value), color);
        }
    }
    out
}

pub fn render_table(rows: &[TableRow], total: usize) -> String {
    if rows.is_empty() {
        return format!("{}\n", EMPTY_TABLE_MESSAGE);
    }
    let headers = ["ID", "Lot", "Supplier", "Mesin", "Counter", "Waktu"];
    let cells: Vec<[&str; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.id.as_str(),
                row.lot.as_str(),
                row.supplier.as_str(),
                row.machine.as_str(),
                row.counter.as_str(),
                row.start_time.as_str(),
            ]
        })
        .collect();
    let mut widths = headers.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "{}", table_footer(rows.len(), total));
    out
}

fn push_row(out: &mut String, cells: &[&str; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((value as u128 * BAR_WIDTH as u128) / max as u128).max(1) as usize;
    "#".repeat(len)
}

/// Redraws the active chart after every dashboard change.
pub struct ChartPrinter;

impl DashboardObserver for ChartPrinter {
    fn on_change(&mut self, snapshot: &DashboardSnapshot<'_>) {
        print!("{}", render_tab(snapshot.reports, snapshot.active_tab));
    }
}
