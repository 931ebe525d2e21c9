//! Unified application error type.
//! Every module (timesheet, invoice, notify, config, cli) returns AppError so
//! that the tool boundary has a single place to turn failures into text.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Spreadsheet / document backends
    // ---------------------------
    #[error("Spreadsheet read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Spreadsheet write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Document archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Unsupported timesheet format: {0}")]
    UnsupportedFormat(String),

    #[error("Timesheet is locked by another process: {0}")]
    Locked(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid status code: {0} (expected P, HL, L, WO or H)")]
    InvalidStatus(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Invoice errors
    // ---------------------------
    #[error("invoice could not be generated due to missing data: {0}")]
    MissingProfileData(String),

    // ---------------------------
    // Notification errors
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Missing TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID environment variables")]
    MissingCredentials,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
