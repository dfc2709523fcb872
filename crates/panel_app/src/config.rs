use std::fs;
use std::path::Path;
use std::time::Duration;

use panel_engine::ClientSettings;
use panel_logging::{panel_info, panel_warn};
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

/// Settings read from the RON config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub backend_url: String,
    pub poll_interval_ms: u64,
    pub history_enabled: bool,
    pub log_destination: LogDestination,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_ms: 2000,
            history_enabled: true,
            log_destination: LogDestination::File,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
        }
    }
}

impl PanelConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Loads the config, falling back to defaults when the file is missing or
/// unreadable. Runs before logging is up, so problems are returned as
/// warnings for the caller to report.
pub fn load_config(path: &Path) -> (PanelConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (PanelConfig::default(), None);
        }
        Err(err) => {
            return (
                PanelConfig::default(),
                Some(format!("Failed to read config from {path:?}: {err}")),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            PanelConfig::default(),
            Some(format!("Failed to parse config from {path:?}: {err}")),
        ),
    }
}

pub fn report_config(path: &Path, warning: Option<&str>) {
    match warning {
        Some(warning) => panel_warn!("{warning}; using defaults"),
        None => panel_info!("Configuration resolved from {:?}", path),
    }
}
