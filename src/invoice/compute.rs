// src/invoice/compute.rs

use crate::config::Config;
use crate::config::profile::Profile;
use crate::errors::{AppError, AppResult};
use crate::invoice::words::amount_in_words;
use crate::models::entry::Entry;
use crate::models::invoice::{DetailLine, InvoiceData};
use crate::models::month_summary::MonthSummary;
use crate::utils::date::month_name;
use crate::utils::formatting::group_indian;
use chrono::{Datelike, NaiveDate};

/// Invoice content plus the figures it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyInvoice {
    pub year: i32,
    pub month: u32,
    pub working_days: u32,
    pub leaves_taken: u32,
    pub balance_leaves: i32,
    pub total: f64,
    pub data: InvoiceData,
}

/// `25000.0` → `25,000/-`; paise are kept when present.
pub fn format_total(total: f64) -> String {
    let paise = (total.max(0.0) * 100.0).round() as u64;
    let rupees = group_indian(paise / 100);
    match paise % 100 {
        0 => format!("{rupees}/-"),
        p => format!("{rupees}.{p:02}/-"),
    }
}

/// Apply the monthly billing rules to the rows of one month.
///
/// - working days = `P` rows, total = working days × daily rate
/// - leaves taken = `L` rows
/// - balance = carried balance + monthly allowance − leaves taken
pub fn build_monthly_invoice(
    entries: &[Entry],
    profile: &Profile,
    cfg: &Config,
    year: i32,
    month: u32,
    issue_date: NaiveDate,
) -> AppResult<MonthlyInvoice> {
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::MissingProfileData(missing.join(", ")));
    }

    let month_label =
        month_name(month).ok_or_else(|| AppError::InvalidMonth(format!("{year}-{month:02}")))?;

    let in_month: Vec<Entry> = entries
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .cloned()
        .collect();
    let summary = MonthSummary::from_entries(&in_month);

    let working_days = summary.present;
    let leaves_taken = summary.leave;
    let balance_leaves =
        profile.balance_before(year, month) + cfg.leaves_per_month as i32 - leaves_taken as i32;

    let rate = profile.daily_rate.unwrap_or_default();
    let total = working_days as f64 * rate;

    let field = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();

    let data = InvoiceData {
        name: format!("NAME: {}", field(&profile.name)),
        date: format!("Date: {}", issue_date.format("%Y-%m-%d")),
        bill_to: cfg.bill_to.clone(),
        salary_description: format!("Salary for the month of \"{month_label} {year}\" payroll"),
        details: vec![
            DetailLine::item("Employee Number", field(&profile.employee_id)),
            DetailLine::item("Department", field(&profile.department)),
            DetailLine::item("Month", month_label),
            DetailLine::item("Working Days", working_days.to_string()),
            DetailLine::item("Cumulative Leaves Taken", leaves_taken.to_string()),
            DetailLine::item("Balance Leaves", balance_leaves.to_string()),
        ],
        total: format_total(total),
        total_words: amount_in_words(total),
    };

    Ok(MonthlyInvoice {
        year,
        month,
        working_days,
        leaves_taken,
        balance_leaves,
        total,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::Status;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn profile() -> Profile {
        Profile {
            name: Some("Jane Doe".into()),
            employee_id: Some("EMP-042".into()),
            department: Some("AI Research".into()),
            daily_rate: Some(1250.0),
            opening_leave_balance: 1,
            ..Profile::default()
        }
    }

    fn july_rows() -> Vec<Entry> {
        let mut rows: Vec<Entry> = (1..=20)
            .map(|day| Entry::new(d(7, day), Status::Present, ""))
            .collect();
        rows.push(Entry::new(d(7, 21), Status::Leave, "sick"));
        rows.push(Entry::new(d(7, 22), Status::HalfDayLeave, ""));
        rows.push(Entry::new(d(7, 26), Status::WeekOff, ""));
        rows.push(Entry::new(d(7, 28), Status::Holiday, ""));
        // stray row from another month is ignored
        rows.push(Entry::new(d(8, 1), Status::Present, ""));
        rows
    }

    #[test]
    fn totals_follow_present_days_and_rate() {
        let inv =
            build_monthly_invoice(&july_rows(), &profile(), &Config::default(), 2025, 7, d(7, 31))
                .unwrap();

        assert_eq!(inv.working_days, 20);
        assert_eq!(inv.leaves_taken, 1);
        assert_eq!(inv.total, 25_000.0);
        assert_eq!(inv.data.total, "25,000/-");
        assert_eq!(inv.data.total_words, "Rs. Twenty Five Thousand Only");
        assert_eq!(inv.data.name, "NAME: Jane Doe");
        assert_eq!(inv.data.date, "Date: 2025-07-31");
        assert_eq!(
            inv.data.salary_description,
            "Salary for the month of \"July 2025\" payroll"
        );
    }

    #[test]
    fn balance_adds_allowance_and_subtracts_leaves() {
        let mut p = profile();
        let cfg = Config::default();

        // opening 1 + 2 allowed - 1 taken
        let inv = build_monthly_invoice(&july_rows(), &p, &cfg, 2025, 7, d(7, 31)).unwrap();
        assert_eq!(inv.balance_leaves, 2);

        p.record_balance(2025, 6, 5);
        let inv = build_monthly_invoice(&july_rows(), &p, &cfg, 2025, 7, d(7, 31)).unwrap();
        assert_eq!(inv.balance_leaves, 6);

        let cells: Vec<(String, String)> = inv.data.details.iter().map(|l| l.cells()).collect();
        assert_eq!(cells[0], ("Employee Number".into(), "EMP-042".into()));
        assert_eq!(cells[2], ("Month".into(), "July".into()));
        assert_eq!(cells[5], ("Balance Leaves".into(), "6".into()));
    }

    #[test]
    fn missing_profile_data_is_reported_by_name() {
        let p = Profile {
            department: None,
            ..profile()
        };
        let err = build_monthly_invoice(&[], &p, &Config::default(), 2025, 7, d(7, 31)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invoice could not be generated due to missing data: department"
        );
    }

    #[test]
    fn totals_keep_paise() {
        assert_eq!(format_total(1234567.5), "12,34,567.50/-");
        assert_eq!(format_total(0.0), "0/-");
    }
}
