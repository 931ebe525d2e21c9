// src/invoice/mod.rs

pub mod compute;
mod docx;
pub mod words;

pub use compute::{MonthlyInvoice, build_monthly_invoice};

use crate::config::Config;
use crate::config::profile::Profile;
use crate::errors::{AppError, AppResult};
use crate::models::invoice::InvoiceData;
use crate::timesheet::naming::{invoice_filename, timesheet_filename};
use crate::timesheet::Timesheet;
use crate::utils::path::resolve_in;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Logica di alto livello per le fatture.
pub struct InvoiceLogic;

impl InvoiceLogic {
    /// Write `data` as a DOCX named `filename` (`.docx` appended when
    /// missing), resolved against `work_dir`.
    pub fn create_document(work_dir: &Path, filename: &str, data: &InvoiceData) -> AppResult<PathBuf> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(AppError::Other("a file name is required".into()));
        }

        let filename = if filename.to_lowercase().ends_with(".docx") {
            filename.to_string()
        } else {
            format!("{filename}.docx")
        };

        let path = resolve_in(work_dir, &filename);
        docx::write_docx(data, &path)?;

        info!(path = %path.display(), "invoice document written");
        Ok(path)
    }

    /// Timesheet for `month` inside `work_dir`: the xlsx name, or a csv
    /// with the same stem when only that exists.
    pub fn locate_timesheet(work_dir: &Path, month: u32) -> AppResult<PathBuf> {
        let name = timesheet_filename(month).ok_or_else(|| AppError::InvalidMonth(month.to_string()))?;
        let xlsx = work_dir.join(&name);
        if xlsx.exists() {
            return Ok(xlsx);
        }
        let csv = xlsx.with_extension("csv");
        if csv.exists() {
            return Ok(csv);
        }
        Err(AppError::Other(format!(
            "No timesheet found for this month: {}",
            xlsx.display()
        )))
    }

    /// Build the invoice for `year-month` from its timesheet and the profile,
    /// write `invoice_<month>.docx`, and record the new leave balance in the
    /// profile ledger (the caller persists the profile).
    pub fn generate_monthly(
        cfg: &Config,
        work_dir: &Path,
        profile: &mut Profile,
        year: i32,
        month: u32,
        issue_date: NaiveDate,
    ) -> AppResult<(PathBuf, MonthlyInvoice)> {
        let sheet_path = Self::locate_timesheet(work_dir, month)?;
        let sheet = Timesheet::open_or_create(&sheet_path)?;

        let invoice = build_monthly_invoice(sheet.entries(), profile, cfg, year, month, issue_date)?;

        let out_name = invoice_filename(month).ok_or_else(|| AppError::InvalidMonth(month.to_string()))?;
        let path = Self::create_document(work_dir, &out_name, &invoice.data)?;

        profile.record_balance(year, month, invoice.balance_leaves);

        info!(
            year,
            month,
            working_days = invoice.working_days,
            leaves_taken = invoice.leaves_taken,
            balance = invoice.balance_leaves,
            "monthly invoice generated"
        );

        Ok((path, invoice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timesheet::TimesheetLogic;
    use tempfile::tempdir;

    #[test]
    fn extension_is_appended_once() {
        let dir = tempdir().unwrap();
        let data = InvoiceData {
            name: "NAME: A".into(),
            date: "Date: B".into(),
            bill_to: vec![],
            salary_description: String::new(),
            details: vec![],
            total: "0/-".into(),
            total_words: "Rs. Zero Only".into(),
        };

        let p1 = InvoiceLogic::create_document(dir.path(), "invoice_july", &data).unwrap();
        assert_eq!(p1, dir.path().join("invoice_july.docx"));
        let p2 = InvoiceLogic::create_document(dir.path(), "invoice_june.docx", &data).unwrap();
        assert_eq!(p2, dir.path().join("invoice_june.docx"));
        assert!(InvoiceLogic::create_document(dir.path(), "  ", &data).is_err());
    }

    #[test]
    fn monthly_generation_updates_leave_ledger() {
        let dir = tempdir().unwrap();
        let sheet = dir.path().join("timesheet_july.csv");
        TimesheetLogic::save_or_update(&sheet, "2025-07-01", "P", "").unwrap();
        TimesheetLogic::save_or_update(&sheet, "2025-07-02", "P", "").unwrap();
        TimesheetLogic::save_or_update(&sheet, "2025-07-03", "L", "").unwrap();

        let mut profile = Profile {
            name: Some("Jane".into()),
            employee_id: Some("E1".into()),
            department: Some("AI".into()),
            daily_rate: Some(1000.0),
            ..Profile::default()
        };
        let issue = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();

        let (path, inv) = InvoiceLogic::generate_monthly(
            &Config::default(),
            dir.path(),
            &mut profile,
            2025,
            7,
            issue,
        )
        .unwrap();

        assert_eq!(path, dir.path().join("invoice_july.docx"));
        assert!(path.exists());
        assert_eq!(inv.total, 2000.0);
        assert_eq!(inv.balance_leaves, 1);
        assert_eq!(profile.leave_history.get("2025-07"), Some(&1));

        // regenerating the same month does not double count
        let (_, again) = InvoiceLogic::generate_monthly(
            &Config::default(),
            dir.path(),
            &mut profile,
            2025,
            7,
            issue,
        )
        .unwrap();
        assert_eq!(again.balance_leaves, 1);
    }

    #[test]
    fn missing_timesheet_is_reported() {
        let dir = tempdir().unwrap();
        let err = InvoiceLogic::locate_timesheet(dir.path(), 3).unwrap_err();
        assert!(err.to_string().contains("timesheet_march.xlsx"));
    }
}
