// src/timesheet/mod.rs

mod csv_file;
mod excel_date;
pub mod logic;
pub mod naming;
mod xlsx;

pub use logic::{TimesheetLogic, UpsertAction};

use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::status::Status;
use crate::utils::lock::FileLock;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Header row of every timesheet file.
pub const COLUMNS: [&str; 3] = ["Date", "Status", "Remarks"];

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnMap {
    pub date: usize,
    pub status: usize,
    pub remarks: usize,
}

impl ColumnMap {
    /// Look the three columns up by name; fall back to the standard order.
    pub(crate) fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str, default: usize| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .unwrap_or(default)
        };
        ColumnMap {
            date: find(COLUMNS[0], 0),
            status: find(COLUMNS[1], 1),
            remarks: find(COLUMNS[2], 2),
        }
    }
}

/// Row as found on disk that could not be read as an [`Entry`]
/// (unknown status, unreadable date). Written back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedRow {
    pub cells: [String; 3],
    /// Date recovered from the first cell, when there is one.
    pub date: Option<NaiveDate>,
}

/// Everything a reader returns for one file.
#[derive(Debug, Default)]
pub(crate) struct SheetRows {
    pub entries: Vec<Entry>,
    pub unparsed: Vec<UnparsedRow>,
}

impl SheetRows {
    /// Sort one data row into `entries` or `unparsed`. Blank dates are dropped.
    pub(crate) fn push_row(&mut self, date: Option<NaiveDate>, cells: [String; 3], row_no: usize) {
        if cells[0].trim().is_empty() {
            return;
        }
        match (date, Status::from_code(&cells[1])) {
            (Some(d), Some(status)) => self.entries.push(Entry::new(d, status, cells[2].trim())),
            (d, _) => {
                warn!(
                    row = row_no,
                    date = %cells[0],
                    status = %cells[1],
                    "unreadable timesheet row kept as is"
                );
                self.unparsed.push(UnparsedRow { cells, date: d });
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(SheetFormat::Xlsx),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(AppError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }

    fn read(&self, path: &Path) -> AppResult<SheetRows> {
        match self {
            SheetFormat::Xlsx => xlsx::read_xlsx(path),
            SheetFormat::Csv => csv_file::read_csv(path),
        }
    }

    fn write(&self, rows: &SheetRows, path: &Path) -> AppResult<()> {
        match self {
            SheetFormat::Xlsx => xlsx::write_xlsx(rows, path),
            SheetFormat::Csv => csv_file::write_csv(rows, path),
        }
    }
}

/// A monthly timesheet loaded in memory.
///
/// Rows keep file order; at most one row per date.
#[derive(Debug)]
pub struct Timesheet {
    path: PathBuf,
    format: SheetFormat,
    rows: SheetRows,
}

impl Timesheet {
    /// Load the file, creating an empty one (header only) when it is missing.
    /// Creation happens under the write lock, through the same temp + rename
    /// path as [`Timesheet::save`], so it never clobbers a concurrent write.
    pub fn open_or_create(path: &Path) -> AppResult<Self> {
        let format = SheetFormat::from_path(path)?;

        if !path.exists() {
            let lock = Self::lock(path)?;
            let sheet = Self::open_locked(path, &lock)?;
            if !path.exists() {
                debug!(path = %path.display(), "creating empty timesheet");
                sheet.save()?;
            }
            return Ok(sheet);
        }

        Self::load(path, format)
    }

    /// Load while holding `_lock`. A missing file gives an empty table
    /// that [`Timesheet::save`] will create.
    pub fn open_locked(path: &Path, _lock: &FileLock) -> AppResult<Self> {
        let format = SheetFormat::from_path(path)?;
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                format,
                rows: SheetRows::default(),
            });
        }
        Self::load(path, format)
    }

    fn load(path: &Path, format: SheetFormat) -> AppResult<Self> {
        let rows = format.read(path)?;
        debug!(
            path = %path.display(),
            format = format.as_str(),
            rows = rows.entries.len(),
            unparsed = rows.unparsed.len(),
            "timesheet loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            format,
            rows,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.rows.entries
    }

    /// Rows kept verbatim because they could not be read.
    pub fn unparsed(&self) -> &[UnparsedRow] {
        &self.rows.unparsed
    }

    pub fn is_empty(&self) -> bool {
        self.rows.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Entry> {
        self.rows.entries.iter().find(|e| e.date == date)
    }

    /// Rows whose date falls in `start..=end`.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Entry> {
        self.rows
            .entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect()
    }

    /// Update the row with the same date in place, or append a new one.
    /// An unreadable row for that date is replaced by the new one.
    pub fn upsert(&mut self, entry: Entry) -> UpsertAction {
        let before = self.rows.unparsed.len();
        self.rows.unparsed.retain(|r| r.date != Some(entry.date));
        let replaced_unparsed = self.rows.unparsed.len() != before;

        match self.rows.entries.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => {
                existing.status = entry.status;
                existing.remarks = entry.remarks;
                UpsertAction::Updated
            }
            None => {
                self.rows.entries.push(entry);
                if replaced_unparsed {
                    UpsertAction::Updated
                } else {
                    UpsertAction::Added
                }
            }
        }
    }

    /// Persist the full table: write a sibling temp file, then rename over.
    pub fn save(&self) -> AppResult<()> {
        let tmp = temp_sibling(&self.path);
        self.format.write(&self.rows, &tmp)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %self.path.display(), rows = self.rows.entries.len(), "timesheet saved");
        Ok(())
    }

    /// Take the exclusive write lock for `path`.
    pub fn lock(path: &Path) -> AppResult<FileLock> {
        FileLock::acquire(path)
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "timesheet".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
