use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod profile;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory holding the monthly timesheet and invoice files.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default = "default_leaves_per_month")]
    pub leaves_per_month: u32,
    #[serde(default = "default_bill_to")]
    pub bill_to: Vec<String>,
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_work_dir() -> String {
    ".".to_string()
}
fn default_leaves_per_month() -> u32 {
    2
}
fn default_bill_to() -> Vec<String> {
    vec![
        "PROD SOFTWARE INDIA PRIVATE LIMITED".to_string(),
        "Kalyani Platina, Ground Floor, Block I, No 24".to_string(),
        "EPIP Zone Phase II, Whitefield".to_string(),
        "Bangalore, Karnataka, 560 066".to_string(),
    ]
}
fn default_telegram_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            leaves_per_month: default_leaves_per_month(),
            bill_to: default_bill_to(),
            telegram_api_base: default_telegram_api_base(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rinvoicer")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rinvoicer")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rinvoicer.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Work dir with `~` expanded.
    pub fn work_dir(&self) -> PathBuf {
        crate::utils::path::expand_tilde(&self.work_dir)
    }

    /// API base, `TELEGRAM_API_BASE` winning over the file.
    pub fn telegram_api_base(&self) -> String {
        env::var("TELEGRAM_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.telegram_api_base.clone())
    }

    /// Initialize config dir, configuration file and empty profile.
    /// Existing files are left untouched. Returns the paths that were created.
    pub fn init_all(work_dir: Option<&str>) -> AppResult<Vec<PathBuf>> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut created = Vec::new();

        let cfg_path = Self::config_file();
        if !cfg_path.exists() {
            let mut config = Config::default();
            if let Some(wd) = work_dir {
                config.work_dir = wd.to_string();
            }
            config.save_to(&cfg_path)?;
            created.push(cfg_path);
        }

        let profile_path = profile::Profile::profile_file();
        if !profile_path.exists() {
            profile::Profile::default().save_to(&profile_path)?;
            created.push(profile_path);
        }

        Ok(created)
    }
}
