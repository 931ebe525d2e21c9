// src/timesheet/logic.rs

use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::status::Status;
use crate::timesheet::Timesheet;
use crate::utils::date;
use chrono::NaiveDate;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Guideline length for the Remarks column.
pub const MAX_REMARK_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Added,
    Updated,
}

impl fmt::Display for UpsertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertAction::Added => f.write_str("added"),
            UpsertAction::Updated => f.write_str("updated"),
        }
    }
}

/// Logica di alto livello sul timesheet mensile.
pub struct TimesheetLogic;

impl TimesheetLogic {
    /// Read the rows of `path`, optionally restricted to a period expression
    /// (see [`date::period_bounds`]). A missing file is created empty.
    pub fn read(path: &Path, period: Option<&str>, today: NaiveDate) -> AppResult<Vec<Entry>> {
        let sheet = Timesheet::open_or_create(path)?;
        if !sheet.unparsed().is_empty() {
            warn!(
                path = %path.display(),
                skipped = sheet.unparsed().len(),
                "unreadable rows left out of the listing"
            );
        }

        match period {
            None => Ok(sheet.entries().to_vec()),
            Some(p) if p.eq_ignore_ascii_case("all") => Ok(sheet.entries().to_vec()),
            Some(p) => {
                let (start, end) = date::period_bounds(p, today).map_err(AppError::InvalidPeriod)?;
                if sheet.is_empty() {
                    return Ok(Vec::new());
                }
                Ok(sheet.in_range(start, end))
            }
        }
    }

    /// Insert or update the row for `date`, holding the file lock for the
    /// whole read-modify-write.
    pub fn save_or_update(
        path: &Path,
        date_raw: &str,
        status_raw: &str,
        remarks: &str,
    ) -> AppResult<(NaiveDate, UpsertAction)> {
        let date = date::parse_date(date_raw)
            .ok_or_else(|| AppError::InvalidDate(format!("{date_raw} (expected YYYY-MM-DD)")))?;
        let status =
            Status::from_code(status_raw).ok_or_else(|| AppError::InvalidStatus(status_raw.to_string()))?;

        let remarks = remarks.trim();
        let words = remarks.split_whitespace().count();
        if words > MAX_REMARK_WORDS {
            warn!(words, "remarks exceed {MAX_REMARK_WORDS} words");
        }

        let lock = Timesheet::lock(path)?;

        let mut sheet = Timesheet::open_locked(path, &lock)?;
        if let Some(prev) = sheet.get(date) {
            debug!(date = %date, previous = %prev.status, "replacing existing row");
        }
        let action = sheet.upsert(Entry::new(date, status, remarks));
        sheet.save()?;

        info!(date = %date, status = %status, %action, path = %path.display(), "timesheet row saved");
        Ok((date, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    #[test]
    fn save_or_update_reports_action() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timesheet_july.xlsx");

        let (date, action) =
            TimesheetLogic::save_or_update(&path, "2025-07-01", "p", "Worked on AI").unwrap();
        assert_eq!(date, d(1));
        assert_eq!(action, UpsertAction::Added);

        let (_, action) = TimesheetLogic::save_or_update(&path, "2025-07-01", "L", "").unwrap();
        assert_eq!(action, UpsertAction::Updated);

        let rows = TimesheetLogic::read(&path, None, d(1)).unwrap();
        assert_eq!(rows, vec![Entry::new(d(1), Status::Leave, "")]);
        assert!(!path.with_file_name("timesheet_july.xlsx.lock").exists());
    }

    #[test]
    fn bad_inputs_are_rejected_before_touching_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timesheet_july.csv");

        assert!(matches!(
            TimesheetLogic::save_or_update(&path, "01/07/2025", "P", ""),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            TimesheetLogic::save_or_update(&path, "2025-07-01", "X", ""),
            Err(AppError::InvalidStatus(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn read_filters_by_period() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timesheet_july.csv");
        for day in [1, 14, 16, 20, 21] {
            TimesheetLogic::save_or_update(&path, &format!("2025-07-{day:02}"), "P", "").unwrap();
        }

        let week = TimesheetLogic::read(&path, Some("week"), d(16)).unwrap();
        let days: Vec<_> = week.iter().map(|e| e.date).collect();
        assert_eq!(days, vec![d(14), d(16), d(20)]);

        let single = TimesheetLogic::read(&path, Some("2025-07-21"), d(16)).unwrap();
        assert_eq!(single.len(), 1);

        assert!(matches!(
            TimesheetLogic::read(&path, Some("someday"), d(16)),
            Err(AppError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn concurrent_writers_do_not_lose_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timesheet_july.xlsx");

        std::thread::scope(|scope| {
            for day in 1..=8 {
                let path = &path;
                scope.spawn(move || {
                    let date = format!("2025-07-{day:02}");
                    TimesheetLogic::save_or_update(path, &date, "P", "").unwrap();
                });
            }
        });

        let rows = TimesheetLogic::read(&path, None, d(1)).unwrap();
        assert_eq!(rows.len(), 8);
        let mut days: Vec<u32> = rows.iter().map(|e| chrono::Datelike::day(&e.date)).collect();
        days.sort_unstable();
        assert_eq!(days, (1..=8).collect::<Vec<_>>());
        assert!(!path.with_file_name("timesheet_july.xlsx.lock").exists());
    }

    #[test]
    fn write_recovers_from_a_lock_left_by_a_dead_process() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timesheet_july.csv");
        std::fs::write(
            path.with_file_name("timesheet_july.csv.lock"),
            format!("{}\n", u32::MAX - 1),
        )
        .unwrap();

        let (_, action) = TimesheetLogic::save_or_update(&path, "2025-07-01", "P", "").unwrap();
        assert_eq!(action, UpsertAction::Added);
        let (_, action) = TimesheetLogic::save_or_update(&path, "2025-07-01", "L", "").unwrap();
        assert_eq!(action, UpsertAction::Updated);
        assert!(!path.with_file_name("timesheet_july.csv.lock").exists());
    }
}
