pub mod config;
pub mod init;
pub mod invoice;
pub mod mark;
pub mod profile;
pub mod send;
pub mod show;
pub mod tool;

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::{Datelike, NaiveDate};

/// `--month` value, or the month of `today`.
pub(crate) fn resolve_month(month: Option<&str>, today: NaiveDate) -> AppResult<(i32, u32)> {
    match month {
        Some(m) => date::parse_month(m, today).ok_or_else(|| AppError::InvalidMonth(m.to_string())),
        None => Ok((today.year(), today.month())),
    }
}
