//! Task handlers as seen by an agent layer: every call returns a
//! human-readable status string, never an error.

pub mod registry;

pub use registry::{Tool, ToolDefinition, ToolRegistry};

use crate::config::Config;
use crate::config::profile::Profile;
use crate::errors::AppResult;
use crate::invoice::InvoiceLogic;
use crate::models::invoice::InvoiceData;
use crate::notify::{NotifyLogic, TelegramClient, compose_message, greeting, month_label_for};
use crate::timesheet::TimesheetLogic;
use crate::timesheet::naming::{invoice_filename, timesheet_filename};
use crate::utils::date;
use crate::utils::path::resolve_in;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::error;

/// Everything a handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub cfg: Config,
    pub work_dir: PathBuf,
    pub profile_path: PathBuf,
    pub today: NaiveDate,
}

impl ToolContext {
    pub fn new(cfg: Config, work_dir: PathBuf) -> Self {
        Self {
            cfg,
            work_dir,
            profile_path: Profile::profile_file(),
            today: date::today(),
        }
    }

    fn resolve(&self, file: &str) -> PathBuf {
        resolve_in(&self.work_dir, file)
    }

    /// `timesheet_<month>.xlsx` for the month of `d`.
    fn default_timesheet(&self, d: NaiveDate) -> String {
        timesheet_filename(d.month()).unwrap_or_else(|| "timesheet.xlsx".to_string())
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Rows of the timesheet as `date | status | remarks` lines.
pub fn read_timesheet_data(ctx: &ToolContext, filename: Option<&str>, period: Option<&str>) -> String {
    let name = filename
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| ctx.default_timesheet(ctx.today));
    let path = ctx.resolve(&name);

    match TimesheetLogic::read(&path, period, ctx.today) {
        Ok(rows) if rows.is_empty() => match period {
            Some(p) if !p.eq_ignore_ascii_case("all") => {
                format!("No timesheet records found for period {p}.")
            }
            _ => "The Excel file is empty.".to_string(),
        },
        Ok(rows) => {
            let lines: Vec<String> = rows.iter().map(|e| e.to_line()).collect();
            format!("Timesheet Records:\n{}", lines.join("\n"))
        }
        Err(e) => {
            error!(error = %e, file = %path.display(), "read_timesheet_data failed");
            format!("Error reading Excel timesheet: {e}")
        }
    }
}

/// Upsert one row keyed by date.
pub fn save_or_update_timesheet(
    ctx: &ToolContext,
    filename: Option<&str>,
    date_raw: &str,
    status: &str,
    remarks: &str,
) -> String {
    let name = match filename.filter(|f| !f.trim().is_empty()) {
        Some(f) => f.to_string(),
        None => match date::parse_date(date_raw) {
            Some(d) => ctx.default_timesheet(d),
            None => return format!("Error modifying Excel timesheet: Invalid date format: {date_raw}"),
        },
    };
    let path = ctx.resolve(&name);

    match TimesheetLogic::save_or_update(&path, date_raw, status, remarks) {
        Ok((d, action)) => format!(
            "Success: The entry for {} was {} in {}.",
            d.format("%Y-%m-%d"),
            action,
            file_label(&path)
        ),
        Err(e) => {
            error!(error = %e, file = %path.display(), "save_or_update_timesheet failed");
            format!("Error modifying Excel timesheet: {e}")
        }
    }
}

/// Write a DOCX invoice from already-computed display values.
pub fn create_invoice_document(
    ctx: &ToolContext,
    filename: &str,
    data: Option<&serde_json::Value>,
) -> String {
    let data = match data {
        Some(v) if !v.is_null() && v.as_object().is_none_or(|o| !o.is_empty()) => v,
        _ => return "Error: Both 'filename' and 'data' are required.".to_string(),
    };
    if filename.trim().is_empty() {
        return "Error: Both 'filename' and 'data' are required.".to_string();
    }

    let result: AppResult<PathBuf> = serde_json::from_value::<InvoiceData>(data.clone())
        .map_err(Into::into)
        .and_then(|inv| InvoiceLogic::create_document(&ctx.work_dir, filename, &inv));

    match result {
        Ok(path) => format!("Invoice successfully written to {}", path.display()),
        Err(e) => {
            error!(error = %e, "create_invoice_document failed");
            format!("Failed to write Word document: {e}")
        }
    }
}

/// Compute and write the invoice for a month from its timesheet and the
/// stored profile, then record the remaining leaves.
pub fn generate_monthly_invoice(ctx: &ToolContext, month: Option<&str>) -> String {
    let (year, m) = match month {
        Some(s) => match date::parse_month(s, ctx.today) {
            Some(ym) => ym,
            None => return format!("Failed to generate invoice: Invalid month: {s}"),
        },
        None => (ctx.today.year(), ctx.today.month()),
    };

    let result = Profile::load_from(&ctx.profile_path).and_then(|mut profile| {
        let (path, inv) =
            InvoiceLogic::generate_monthly(&ctx.cfg, &ctx.work_dir, &mut profile, year, m, ctx.today)?;
        profile.save_to(&ctx.profile_path)?;
        Ok((path, inv))
    });

    match result {
        Ok((path, inv)) => {
            let label = date::month_name(m).unwrap_or_default();
            format!(
                "Invoice for {label} {year} written to {} (total {}). {}",
                path.display(),
                inv.data.total,
                Profile::balance_sentence(label, inv.balance_leaves)
            )
        }
        Err(e) => {
            error!(error = %e, "generate_monthly_invoice failed");
            format!("Failed to generate invoice: {e}")
        }
    }
}

/// Greet the chat and upload the month's timesheet and invoice.
pub fn send_message_with_attachments(
    ctx: &ToolContext,
    xlsx_filename: Option<&str>,
    docx_filename: Option<&str>,
) -> String {
    let month = ctx.today.month();
    let xlsx = xlsx_filename
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .or_else(|| timesheet_filename(month))
        .unwrap_or_default();
    let docx = docx_filename
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .or_else(|| invoice_filename(month))
        .unwrap_or_default();

    let files = vec![ctx.resolve(&xlsx), ctx.resolve(&docx)];

    let result = TelegramClient::from_env(&ctx.cfg.telegram_api_base()).and_then(|client| {
        let message = compose_message(greeting::greeting(), &month_label_for(&files, month));
        NotifyLogic::send_with_attachments(&client, &message, &files)
    });

    match result {
        Ok(report) => report.to_string(),
        Err(e) => {
            error!(error = %e, "send_message_with_attachments failed");
            format!("An error occurred: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::{TempDir, tempdir};

    fn ctx() -> (TempDir, ToolContext) {
        let dir = tempdir().unwrap();
        let ctx = ToolContext {
            cfg: Config::default(),
            work_dir: dir.path().to_path_buf(),
            profile_path: dir.path().join("profile.yml"),
            today: NaiveDate::from_ymd_opt(2025, 7, 16).unwrap(),
        };
        (dir, ctx)
    }

    #[test]
    fn reading_missing_sheet_creates_it_and_reports_empty() {
        let (dir, ctx) = ctx();
        let out = read_timesheet_data(&ctx, Some("timesheet_july.xlsx"), None);
        assert_eq!(out, "The Excel file is empty.");
        assert!(dir.path().join("timesheet_july.xlsx").exists());
    }

    #[test]
    fn save_then_read_lists_rows() {
        let (_dir, ctx) = ctx();
        let out = save_or_update_timesheet(&ctx, None, "2025-07-01", "P", "Worked on AI");
        assert_eq!(
            out,
            "Success: The entry for 2025-07-01 was added in timesheet_july.xlsx."
        );
        let out = save_or_update_timesheet(&ctx, None, "2025-07-01", "HL", "Doctor");
        assert_eq!(
            out,
            "Success: The entry for 2025-07-01 was updated in timesheet_july.xlsx."
        );

        let out = read_timesheet_data(&ctx, None, None);
        assert_eq!(out, "Timesheet Records:\n2025-07-01 | HL | Doctor");

        let out = read_timesheet_data(&ctx, None, Some("2025-07-02"));
        assert_eq!(out, "No timesheet records found for period 2025-07-02.");
    }

    #[test]
    fn failures_become_text() {
        let (_dir, ctx) = ctx();
        let out = save_or_update_timesheet(&ctx, None, "July 1st", "P", "");
        assert!(out.starts_with("Error modifying Excel timesheet:"), "{out}");

        let out = save_or_update_timesheet(&ctx, Some("t.xlsx"), "2025-07-01", "Z", "");
        assert!(out.starts_with("Error modifying Excel timesheet: Invalid status code"), "{out}");

        let out = read_timesheet_data(&ctx, Some("notes.txt"), None);
        assert!(out.starts_with("Error reading Excel timesheet:"), "{out}");
    }

    #[test]
    fn invoice_document_requires_filename_and_data() {
        let (_dir, ctx) = ctx();
        let required = "Error: Both 'filename' and 'data' are required.";
        assert_eq!(create_invoice_document(&ctx, "", Some(&json!({"a": 1}))), required);
        assert_eq!(create_invoice_document(&ctx, "inv", None), required);
        assert_eq!(create_invoice_document(&ctx, "inv", Some(&json!({}))), required);

        let out = create_invoice_document(&ctx, "inv", Some(&json!({"name": "x"})));
        assert!(out.starts_with("Failed to write Word document:"), "{out}");
    }

    #[test]
    fn invoice_document_is_written() {
        let (dir, ctx) = ctx();
        let data = json!({
            "name": "NAME: Jane",
            "date": "Date: 2025-07-31",
            "bill_to": ["ACME"],
            "salary_description": "Salary for the month of \"July 2025\" payroll",
            "details": ["Working Days: 20"],
            "total": "20,000/-",
            "total_words": "Rs. Twenty Thousand Only"
        });
        let out = create_invoice_document(&ctx, "invoice_july", Some(&data));
        let expected = dir.path().join("invoice_july.docx");
        assert_eq!(out, format!("Invoice successfully written to {}", expected.display()));
        assert!(expected.exists());
    }

    #[test]
    fn monthly_invoice_without_profile_reports_missing_data() {
        let (_dir, ctx) = ctx();
        save_or_update_timesheet(&ctx, None, "2025-07-01", "P", "");
        let out = generate_monthly_invoice(&ctx, Some("july"));
        assert_eq!(
            out,
            "Failed to generate invoice: invoice could not be generated due to missing data: name, employee_id, department, daily_rate"
        );
    }

    #[test]
    fn monthly_invoice_with_profile_records_leaves() {
        let (dir, ctx) = ctx();
        Profile {
            name: Some("Jane".into()),
            employee_id: Some("E1".into()),
            department: Some("AI".into()),
            daily_rate: Some(500.0),
            ..Profile::default()
        }
        .save_to(&ctx.profile_path)
        .unwrap();
        save_or_update_timesheet(&ctx, None, "2025-07-01", "P", "");
        save_or_update_timesheet(&ctx, None, "2025-07-02", "L", "");

        let out = generate_monthly_invoice(&ctx, None);
        assert!(out.starts_with("Invoice for July 2025 written to"), "{out}");
        assert!(out.contains("(total 500/-)"), "{out}");
        assert!(out.ends_with("My remaining leaves after July are 1."), "{out}");
        assert!(dir.path().join("invoice_july.docx").exists());

        let saved = Profile::load_from(&ctx.profile_path).unwrap();
        assert_eq!(saved.leave_history.get("2025-07"), Some(&1));
    }
}
