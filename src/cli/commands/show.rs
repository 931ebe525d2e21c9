use crate::cli::commands::resolve_month;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::month_summary::MonthSummary;
use crate::timesheet::TimesheetLogic;
use crate::timesheet::naming::timesheet_filename;
use crate::ui::messages::{header, info};
use crate::utils::date;
use crate::utils::path::resolve_in;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show {
        month,
        file,
        period,
        summary,
    } = cmd
    {
        let today = date::today();
        let work_dir = cfg.work_dir();

        let path = match file {
            Some(f) => resolve_in(&work_dir, f),
            None => {
                let (_, m) = resolve_month(month.as_deref(), today)?;
                let name = timesheet_filename(m).ok_or_else(|| AppError::InvalidMonth(m.to_string()))?;
                work_dir.join(name)
            }
        };

        let rows = TimesheetLogic::read(&path, period.as_deref(), today)?;

        if rows.is_empty() {
            match period {
                Some(p) if !p.eq_ignore_ascii_case("all") => {
                    info(format!("No timesheet records found for period {p}."))
                }
                _ => info("The Excel file is empty."),
            }
            return Ok(());
        }

        header(format!("Timesheet Records: {}", path.display()));

        let mut table = Table::new(["Date", "Status", "Remarks"]);
        for e in &rows {
            table.add_row(e.to_row().to_vec());
        }
        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        print!("{}", table.render(sep));

        if *summary {
            let s = MonthSummary::from_entries(&rows);
            println!();
            let mut counts = Table::new(["Status", "Days"]);
            for (status, n) in s.per_status() {
                counts.add_row(vec![format!("{} ({})", status.label(), status.code()), n.to_string()]);
            }
            counts.add_row(vec!["Total".to_string(), s.total().to_string()]);
            print!("{}", counts.render(sep));
        }
    }
    Ok(())
}
