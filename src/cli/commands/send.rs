use crate::cli::commands::resolve_month;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::notify::{NotifyLogic, TelegramClient, compose_message, greeting, month_label_for};
use crate::timesheet::naming::{invoice_filename, timesheet_filename};
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::path::resolve_in;

/// Handle the `send` command: greeting message plus timesheet and invoice.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Send { month, xlsx, docx } = cmd {
        let work_dir = cfg.work_dir();
        let (_, m) = resolve_month(month.as_deref(), date::today())?;
        let bad_month = || AppError::InvalidMonth(m.to_string());

        let xlsx = match xlsx {
            Some(f) => f.clone(),
            None => timesheet_filename(m).ok_or_else(bad_month)?,
        };
        let docx = match docx {
            Some(f) => f.clone(),
            None => invoice_filename(m).ok_or_else(bad_month)?,
        };
        let files = vec![resolve_in(&work_dir, &xlsx), resolve_in(&work_dir, &docx)];

        let client = TelegramClient::from_env(&cfg.telegram_api_base())?;
        let message = compose_message(greeting::greeting(), &month_label_for(&files, m));

        info(format!("Sending {} and {}…", xlsx, docx));
        let report = NotifyLogic::send_with_attachments(&client, &message, &files)?;

        if !report.is_success() {
            return Err(AppError::Other(report.to_string()));
        }
        success(report);
    }
    Ok(())
}
