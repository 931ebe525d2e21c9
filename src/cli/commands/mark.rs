use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::timesheet::logic::MAX_REMARK_WORDS;
use crate::timesheet::naming::timesheet_filename;
use crate::timesheet::TimesheetLogic;
use crate::ui::messages::{success, warning};
use crate::utils::date;
use crate::utils::path::resolve_in;
use chrono::Datelike;

/// Handle the `mark` command: upsert the row for one date.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark {
        date: date_raw,
        status,
        remarks,
        file,
    } = cmd
    {
        let work_dir = cfg.work_dir();

        let path = match file {
            Some(f) => resolve_in(&work_dir, f),
            None => {
                let d = date::parse_date(date_raw)
                    .ok_or_else(|| AppError::InvalidDate(format!("{date_raw} (expected YYYY-MM-DD)")))?;
                let name = timesheet_filename(d.month())
                    .ok_or_else(|| AppError::InvalidMonth(d.month().to_string()))?;
                work_dir.join(name)
            }
        };

        let remarks = remarks.join(" ");
        if remarks.split_whitespace().count() > MAX_REMARK_WORDS {
            warning(format!("Remarks are longer than {MAX_REMARK_WORDS} words"));
        }

        let (d, action) = TimesheetLogic::save_or_update(&path, date_raw, status, &remarks)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        success(format!(
            "The entry for {} was {} in {}.",
            d.format("%Y-%m-%d"),
            action,
            name
        ));
    }
    Ok(())
}
