use crate::cli::commands::resolve_month;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::profile::Profile;
use crate::errors::{AppError, AppResult};
use crate::invoice::InvoiceLogic;
use crate::models::invoice::InvoiceData;
use crate::ui::messages::{info, success};
use crate::utils::date;
use std::fs;

/// Handle the `invoice` command
///
/// Two modes:
///  - `--data JSON --file OUT`: write a document from ready-made values
///  - otherwise: compute the month from its timesheet and the profile
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Invoice {
        month,
        issue_date,
        data,
        file,
    } = cmd
    {
        let work_dir = cfg.work_dir();

        if let Some(data_path) = data {
            let out = file
                .as_deref()
                .ok_or_else(|| AppError::Other("Both 'filename' and 'data' are required.".into()))?;
            let content = fs::read_to_string(data_path)?;
            let inv: InvoiceData = serde_json::from_str(&content)?;
            let path = InvoiceLogic::create_document(&work_dir, out, &inv)?;
            success(format!("Invoice successfully written to {}", path.display()));
            return Ok(());
        }

        let today = date::today();
        let issued = match issue_date {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => today,
        };
        let (year, m) = resolve_month(month.as_deref(), today)?;

        let profile_path = Profile::profile_file();
        let mut profile = Profile::load_from(&profile_path)?;
        let (path, inv) = InvoiceLogic::generate_monthly(cfg, &work_dir, &mut profile, year, m, issued)?;
        profile.save_to(&profile_path)?;

        let label = date::month_name(m).unwrap_or_default();
        success(format!("Invoice for {label} {year} written to {}", path.display()));
        println!("🗓️  Working days : {}", inv.working_days);
        println!("🏖️  Leaves taken : {}", inv.leaves_taken);
        println!("💰 Total        : {} ({})", inv.data.total, inv.data.total_words);
        info(Profile::balance_sentence(label, inv.balance_leaves));
    }
    Ok(())
}
