//! Minimal Telegram Bot API client: `sendMessage` and `sendDocument`.

use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Status and raw body of one Bot API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(base_url: &str, token: &str, chat_id: &str) -> AppResult<Self> {
        if token.trim().is_empty() || chat_id.trim().is_empty() {
            return Err(AppError::MissingCredentials);
        }
        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
            chat_id: chat_id.trim().to_string(),
        })
    }

    /// Credentials from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    pub fn from_env(base_url: &str) -> AppResult<Self> {
        let token = env::var(TOKEN_ENV).unwrap_or_default();
        let chat_id = env::var(CHAT_ID_ENV).unwrap_or_default();
        Self::new(base_url, &token, &chat_id)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    pub fn send_message(&self, text: &str) -> AppResult<ApiResponse> {
        debug!(chars = text.len(), "telegram sendMessage");
        let resp = self
            .client
            .post(self.method_url("sendMessage"))
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()?;

        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(ApiResponse { status, body })
    }

    pub fn send_document(&self, path: &Path) -> AppResult<ApiResponse> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        debug!(file = %file_name, size = bytes.len(), "telegram sendDocument");

        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .part("document", part);

        let resp = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()?;

        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(ApiResponse { status, body })
    }
}
