use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

/// One line of the monthly timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub date: NaiveDate, // ⇔ Date column (YYYY-MM-DD)
    pub status: Status,  // ⇔ Status column (P, HL, L, WO, H)
    pub remarks: String, // ⇔ Remarks column (free text)
}

impl Entry {
    pub fn new(date: NaiveDate, status: Status, remarks: impl Into<String>) -> Self {
        Self {
            date,
            status,
            remarks: remarks.into(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Row as written to the sheet, in column order.
    pub fn to_row(&self) -> [String; 3] {
        [
            self.date_str(),
            self.status.code().to_string(),
            self.remarks.clone(),
        ]
    }

    /// Line used in the plain-text timesheet listing.
    pub fn to_line(&self) -> String {
        format!("{} | {} | {}", self.date_str(), self.status, self.remarks)
    }
}
