use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike, Weekday};
use roll_core::month_short_name;

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn weekday_long(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

fn month_long(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTHS_LONG.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Current local wall-clock time at minute precision, the default start time
/// of a new record.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(now)
}

/// `id-ID` long form used by exports: `1/1/2024, 08.00.00`.
pub fn format_locale_datetime(value: &NaiveDateTime) -> String {
    format!(
        "{}/{}/{}, {:02}.{:02}.{:02}",
        value.day(),
        value.month(),
        value.year(),
        value.hour(),
        value.minute(),
        value.second()
    )
}

/// Short form used by the history table: `1 Jan 08.00`.
pub fn format_table_datetime(value: &NaiveDateTime) -> String {
    format!(
        "{} {} {:02}.{:02}",
        value.day(),
        month_short_name(value.month()),
        value.hour(),
        value.minute()
    )
}

/// Header date: `Senin, 1 Januari 2024`.
pub fn format_header_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_long(date.weekday()),
        date.day(),
        month_long(date.month()),
        date.year()
    )
}
