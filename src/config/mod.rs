//! User preferences for the CLI collaborator and where they live on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::ReadState;
use crate::core::services::{dashboard_service::DEFAULT_TOP_LIMIT, DEFAULT_UPCOMING_DAYS};
use crate::errors::SubcycleError;
use crate::utils::persistence::{load_json_or_default, save_json};

/// Environment variable that overrides the base directory.
pub const HOME_ENV: &str = "SUBCYCLE_HOME";
const CONFIG_FILE: &str = "config.json";
const READ_STATE_FILE: &str = "read_state.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_upcoming_window_days")]
    pub upcoming_window_days: i64,
    #[serde(default = "Config::default_top_subscription_limit")]
    pub top_subscription_limit: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            upcoming_window_days: Self::default_upcoming_window_days(),
            top_subscription_limit: Self::default_top_subscription_limit(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            last_snapshot: None,
        }
    }
}

impl Config {
    pub fn default_upcoming_window_days() -> i64 {
        DEFAULT_UPCOMING_DAYS
    }

    pub fn default_top_subscription_limit() -> usize {
        DEFAULT_TOP_LIMIT
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SubcycleError> {
        let invalid = |reason: &str| SubcycleError::Config(format!("`{key}`: {reason}"));
        match key {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_ascii_uppercase(),
            "upcoming_window_days" => {
                let days: i64 = value.parse().map_err(|_| invalid("expected a number"))?;
                if days < 1 {
                    return Err(invalid("must be at least 1"));
                }
                self.upcoming_window_days = days;
            }
            "top_subscription_limit" => {
                self.top_subscription_limit =
                    value.parse().map_err(|_| invalid("expected a number"))?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = value.parse().map_err(|_| invalid("expected true or false"))?;
            }
            _ => return Err(SubcycleError::Config(format!("unknown setting `{key}`"))),
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] and the notification read-state blob.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    read_state_path: PathBuf,
}

impl ConfigManager {
    /// Uses `$SUBCYCLE_HOME` when set, otherwise the platform data directory.
    pub fn new() -> Result<Self, SubcycleError> {
        Self::with_base_dir(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, SubcycleError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            config_path: base.join(CONFIG_FILE),
            read_state_path: base.join(READ_STATE_FILE),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn read_state_path(&self) -> &Path {
        &self.read_state_path
    }

    pub fn load(&self) -> Result<Config, SubcycleError> {
        load_json_or_default(&self.config_path)
    }

    pub fn save(&self, config: &Config) -> Result<(), SubcycleError> {
        save_json(config, &self.config_path)?;
        tracing::info!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }

    pub fn load_read_state(&self) -> Result<ReadState, SubcycleError> {
        if !self.read_state_path.exists() {
            return Ok(ReadState::default());
        }
        ReadState::from_blob(&fs::read_to_string(&self.read_state_path)?)
    }

    pub fn save_read_state(&self, state: &ReadState) -> Result<(), SubcycleError> {
        save_json(state, &self.read_state_path)
    }
}

fn base_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subcycle")
}
