use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::vision::config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::vision::VisionConfig;

pub const API_KEY_ENV: &str = "LETSDOG_API_KEY";
pub const SETTINGS_FILE: &str = "settings.json";

/// Credential baked in when the crate was built, if the build environment had one.
const BUILD_TIME_API_KEY: Option<&str> = option_env!("LETSDOG_API_KEY");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// `settings.json` in the data directory, cached in memory and written back
/// on every update.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> UserSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, settings: UserSettings) -> Result<()> {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = settings;
        self.persist(&guard)
    }

    /// Vision settings with the credential resolved: runtime environment,
    /// then the build-time value, then the settings file.
    pub fn vision_config(&self) -> VisionConfig {
        let settings = self.current();
        let runtime_key = std::env::var(API_KEY_ENV).ok();
        let api_key = resolve_api_key(runtime_key, BUILD_TIME_API_KEY, settings.api_key);

        VisionConfig::new(api_key)
            .with_endpoint(settings.endpoint)
            .with_model(settings.model)
            .with_temperature(settings.temperature)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

fn resolve_api_key(
    runtime: Option<String>,
    build_time: Option<&str>,
    file: Option<String>,
) -> Option<String> {
    let non_empty = |key: &String| !key.trim().is_empty();
    runtime
        .filter(non_empty)
        .or_else(|| build_time.map(str::to_string).filter(non_empty))
        .or_else(|| file.filter(non_empty))
}

/// `override_dir` (flag or `LETSDOG_DATA_DIR`), else the platform data dir.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("letsdog"))
        .ok_or_else(|| anyhow!("no platform data directory; pass --data-dir"))
}
