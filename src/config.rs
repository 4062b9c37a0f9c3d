use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::board::BoardLayout;
use crate::error::{AppError, AppResult};
use crate::reports::ReportPanel;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "CASEDESK_API_URL";
pub const CONFIG_DIR_ENV: &str = "CASEDESK_CONFIG_DIR";
const CONFIG_FILE_NAME: &str = "config.json";

/// Settings persisted by `casedesk config init`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub board_layout: Option<String>,
    pub employee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<ReportPanel>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

/// Effective configuration: stored settings with environment overrides.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
    pub board_layout: BoardLayout,
    pub employee_name: Option<String>,
    pub reports: Vec<ReportPanel>,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, env::var(API_URL_ENV).ok())
    }

    pub fn resolve(stored: StoredConfig, api_url_override: Option<String>) -> AppResult<Self> {
        let api_url = api_url_override
            .filter(|url| !url.trim().is_empty())
            .or(stored.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let board_layout = match stored.board_layout.as_deref().map(str::trim) {
            None | Some("") | Some("dashboard") => BoardLayout::Dashboard,
            Some("simple") => BoardLayout::Simple,
            Some(other) => {
                return Err(AppError::Configuration(format!(
                    "unknown board layout '{other}' (expected dashboard or simple)"
                )));
            }
        };

        let reports = if stored.reports.is_empty() {
            ReportPanel::defaults()
        } else {
            stored.reports
        };

        Ok(Self {
            api_url,
            request_timeout: stored
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            board_layout,
            employee_name: stored.employee_name.filter(|name| !name.trim().is_empty()),
            reports,
        })
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    ProjectDirs::from("", "", "casedesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            AppError::Configuration("could not determine a config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let config = AppConfig::resolve(StoredConfig::default(), None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.board_layout, BoardLayout::Dashboard);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.reports.len(), 6);
    }

    #[test]
    fn environment_overrides_stored_url() {
        let stored = StoredConfig {
            api_url: Some("https://stored.example/api".to_string()),
            ..Default::default()
        };
        let config =
            AppConfig::resolve(stored.clone(), Some("https://env.example/api".to_string()))
                .unwrap();
        assert_eq!(config.api_url, "https://env.example/api");

        let config = AppConfig::resolve(stored, Some("  ".to_string())).unwrap();
        assert_eq!(config.api_url, "https://stored.example/api");
    }

    #[test]
    fn reads_layout_and_timeout() {
        let stored = StoredConfig {
            board_layout: Some("simple".to_string()),
            request_timeout_secs: Some(15),
            ..Default::default()
        };
        let config = AppConfig::resolve(stored, None).unwrap();
        assert_eq!(config.board_layout, BoardLayout::Simple);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_unknown_layout() {
        let stored = StoredConfig {
            board_layout: Some("swimlanes".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            AppConfig::resolve(stored, None),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn stored_config_round_trips_through_json() {
        let raw = r#"{"api_url": "https://cases.example/api", "employee_name": "Lise"}"#;
        let stored: StoredConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(stored.employee_name.as_deref(), Some("Lise"));
        assert!(stored.reports.is_empty());
    }
}
