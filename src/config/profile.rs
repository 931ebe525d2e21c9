//! Profile facts used to build invoices: who is billing, at what rate, and
//! how many leave days are left after each invoiced month.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Pay for one full working day, in rupees.
    #[serde(default)]
    pub daily_rate: Option<f64>,
    /// Balance before the first month in `leave_history`.
    #[serde(default)]
    pub opening_leave_balance: i32,
    /// `YYYY-MM` → leaves left after that month.
    #[serde(default)]
    pub leave_history: BTreeMap<String, i32>,
}

fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

impl Profile {
    pub fn profile_file() -> PathBuf {
        Config::config_dir().join("profile.yml")
    }

    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::profile_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Profile::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        if content.trim().is_empty() {
            return Ok(Profile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::profile_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Names of the facts an invoice needs but the profile lacks.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").is_empty();

        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if blank(&self.employee_id) {
            missing.push("employee_id");
        }
        if blank(&self.department) {
            missing.push("department");
        }
        if !self.daily_rate.is_some_and(|r| r > 0.0) {
            missing.push("daily_rate");
        }
        missing
    }

    /// Balance carried into `year-month`: the latest recorded earlier month,
    /// or the opening balance.
    pub fn balance_before(&self, year: i32, month: u32) -> i32 {
        let key = month_key(year, month);
        self.leave_history
            .range(..key)
            .next_back()
            .map(|(_, v)| *v)
            .unwrap_or(self.opening_leave_balance)
    }

    pub fn record_balance(&mut self, year: i32, month: u32, balance: i32) {
        self.leave_history.insert(month_key(year, month), balance);
    }

    /// The sentence the assistant keeps about remaining leaves.
    pub fn balance_sentence(month_name: &str, balance: i32) -> String {
        format!("My remaining leaves after {month_name} are {balance}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_profile_reports_every_missing_fact() {
        let p = Profile::default();
        assert_eq!(
            p.missing_fields(),
            vec!["name", "employee_id", "department", "daily_rate"]
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let p = Profile {
            name: Some("  ".into()),
            employee_id: Some("E-1".into()),
            department: Some("AI".into()),
            daily_rate: Some(0.0),
            ..Profile::default()
        };
        assert_eq!(p.missing_fields(), vec!["name", "daily_rate"]);
    }

    #[test]
    fn balance_carries_from_latest_earlier_month() {
        let mut p = Profile {
            opening_leave_balance: 3,
            ..Profile::default()
        };
        assert_eq!(p.balance_before(2025, 6), 3);

        p.record_balance(2025, 6, 4);
        p.record_balance(2025, 8, 1);

        assert_eq!(p.balance_before(2025, 6), 3);
        assert_eq!(p.balance_before(2025, 7), 4);
        assert_eq!(p.balance_before(2025, 9), 1);
        assert_eq!(p.balance_before(2026, 1), 1);
    }

    #[test]
    fn profile_round_trips_through_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.yml");
        let mut p = Profile {
            name: Some("Jane Doe".into()),
            daily_rate: Some(1000.0),
            ..Profile::default()
        };
        p.record_balance(2025, 7, 2);
        p.save_to(&path).unwrap();
        assert_eq!(Profile::load_from(&path).unwrap(), p);
    }

    #[test]
    fn sentence_matches_memory_format() {
        assert_eq!(
            Profile::balance_sentence("July", 2),
            "My remaining leaves after July are 2."
        );
    }
}
