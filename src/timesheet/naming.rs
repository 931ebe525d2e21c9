//! Monthly file naming: `timesheet_<month>.xlsx` and `invoice_<month>.docx`.

use crate::utils::date::{month_from_name, month_name};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static MONTH_IN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:timesheet|invoice)_([a-z]+)").expect("static regex")
});

pub fn timesheet_filename(month: u32) -> Option<String> {
    month_name(month).map(|m| format!("timesheet_{}.xlsx", m.to_lowercase()))
}

pub fn invoice_filename(month: u32) -> Option<String> {
    month_name(month).map(|m| format!("invoice_{}.docx", m.to_lowercase()))
}

/// Month number encoded in a conventional file name, if any.
pub fn month_from_filename(path: &Path) -> Option<u32> {
    let name = path.file_stem()?.to_string_lossy().to_string();
    let caps = MONTH_IN_NAME.captures(&name)?;
    month_from_name(caps.get(1)?.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_use_lowercase_month() {
        assert_eq!(timesheet_filename(7).as_deref(), Some("timesheet_july.xlsx"));
        assert_eq!(invoice_filename(12).as_deref(), Some("invoice_december.docx"));
        assert_eq!(timesheet_filename(0), None);
    }

    #[test]
    fn month_is_recovered_from_file_names() {
        assert_eq!(month_from_filename(Path::new("/tmp/timesheet_july.xlsx")), Some(7));
        assert_eq!(month_from_filename(Path::new("Invoice_Sep.docx")), Some(9));
        assert_eq!(month_from_filename(Path::new("report.docx")), None);
    }
}
