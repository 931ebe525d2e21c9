// src/notify/mod.rs

pub mod greeting;
pub mod telegram;

pub use telegram::TelegramClient;

use crate::errors::AppResult;
use crate::timesheet::naming::month_from_filename;
use crate::utils::date::month_name;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a send-with-attachments run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    /// Message delivered and `n` (> 0) attachments accepted.
    Sent(usize),
    /// None of the attachments existed on disk.
    NoFiles,
    /// The API answered non-200; nothing after this call was attempted.
    Rejected { target: String, body: String },
}

impl DeliveryReport {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryReport::Sent(_))
    }
}

impl fmt::Display for DeliveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryReport::Sent(n) => write!(f, "Success: Sent {n} file(s) to Telegram chat."),
            DeliveryReport::NoFiles => {
                write!(f, "Failure: No valid files found to send via Telegram.")
            }
            DeliveryReport::Rejected { target, body } => {
                write!(f, "Failure: Telegram API error for {target}: {body}")
            }
        }
    }
}

/// Text sent ahead of the attachments.
/// Bare file name for user-facing text, the full path when there is none.
fn display_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

pub fn compose_message(greeting: &str, month_label: &str) -> String {
    format!(
        "Hi,\n{greeting}.\n\nI've attached the timesheet and invoice for the month of {month_label}.\nPlease review and approve at your convenience."
    )
}

/// Month named by the attachments, else `fallback_month`.
pub fn month_label_for(files: &[PathBuf], fallback_month: u32) -> String {
    files
        .iter()
        .find_map(|p| month_from_filename(p))
        .or(Some(fallback_month))
        .and_then(month_name)
        .unwrap_or("this month")
        .to_string()
}

pub struct NotifyLogic;

impl NotifyLogic {
    /// Post `message`, then upload every file of `files` that exists.
    /// Stops at the first non-200 answer; no retries.
    pub fn send_with_attachments(
        client: &TelegramClient,
        message: &str,
        files: &[PathBuf],
    ) -> AppResult<DeliveryReport> {
        let resp = client.send_message(message)?;
        if !resp.is_ok() {
            warn!(status = resp.status, "telegram rejected the message");
            return Ok(DeliveryReport::Rejected {
                target: "message".to_string(),
                body: resp.body,
            });
        }

        let mut sent = 0;

        for file in files {
            if !file.exists() {
                warn!(file = %file.display(), "attachment not found, skipping");
                continue;
            }

            let resp = client.send_document(file)?;
            if !resp.is_ok() {
                warn!(status = resp.status, file = %file.display(), "telegram rejected the file");
                return Ok(DeliveryReport::Rejected {
                    target: format!("file {}", display_name(file)),
                    body: resp.body,
                });
            }
            sent += 1;
        }

        if sent == 0 {
            return Ok(DeliveryReport::NoFiles);
        }

        info!(sent, "attachments delivered");
        Ok(DeliveryReport::Sent(sent))
    }
}
