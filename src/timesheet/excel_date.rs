// src/timesheet/excel_date.rs

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Number format applied to date cells.
pub(crate) const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Date → Excel serial (days since 1899-12-30).
pub(crate) fn to_excel_serial(d: NaiveDate) -> f64 {
    match excel_epoch() {
        Some(epoch) => (d - epoch).num_days() as f64,
        None => 0.0,
    }
}

/// Excel serial → date, dropping the time-of-day fraction.
pub(crate) fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    excel_epoch()?.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Prova a interpretare testo come data, con o senza orario.
///
/// Values like `2025-07-01 00:00:00` come from sheets that were saved by
/// other tools with a date-time column.
pub(crate) fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    let dt_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // last resort: keep only the part before the first space
    s.split(' ')
        .next()
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}
