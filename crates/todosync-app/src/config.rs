use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use todosync_store::validate_key;

/// Default slot name holding the task snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";
/// Default display time of a notification.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 2000;
/// Default interval between terminal UI redraws.
pub const DEFAULT_TICK_RATE_MS: u64 = 200;

/// Top-level application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub operations: OperationsConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML, used to write a starter file.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }

    fn validate(&self) -> Result<()> {
        validate_key(&self.storage.key)
            .with_context(|| format!("storage.key '{}' is not a valid slot name", self.storage.key))?;
        if self.notifications.duration_ms == 0 {
            bail!("notifications.duration_ms must be greater than zero");
        }
        if self.ui.tick_rate_ms == 0 {
            bail!("ui.tick_rate_ms must be greater than zero");
        }
        if self.ui.active_list_limit == Some(0) {
            bail!("ui.active_list_limit must be greater than zero when set");
        }
        Ok(())
    }
}

/// Where the task snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for the file store; the platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Slot name inside the store.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_owned()
}

/// Behaviour of task operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationsConfig {
    /// Artificial wait before each operation takes effect.
    #[serde(default)]
    pub simulated_delay_ms: u64,
}

impl OperationsConfig {
    pub const fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

/// Notification display settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notice_duration_ms")]
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}

impl NotificationConfig {
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

const fn default_notice_duration_ms() -> u64 {
    DEFAULT_NOTICE_DURATION_MS
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Cap on the number of active tasks rendered at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_list_limit: Option<usize>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            active_list_limit: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl UiConfig {
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

const fn default_tick_rate_ms() -> u64 {
    DEFAULT_TICK_RATE_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn missing_config_returns_defaults() -> Result<()> {
        let dir = tempdir()?;
        let cfg = AppConfig::load(dir.path().join("config.toml"))?;
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.storage.key, "tasks");
        assert_eq!(cfg.operations.simulated_delay(), Duration::ZERO);
        assert_eq!(cfg.notifications.duration(), Duration::from_millis(2000));
        assert_eq!(cfg.ui.active_list_limit, None);
        Ok(())
    }

    #[test]
    fn load_config_with_all_sections() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path)?;
        writeln!(
            file,
            "[storage]\ndir = \"/var/lib/todosync\"\nkey = \"todo-tasks\"\n\n[operations]\nsimulated_delay_ms = 1000\n\n[notifications]\nduration_ms = 1500\n\n[ui]\nactive_list_limit = 10\ntick_rate_ms = 100"
        )?;

        let cfg = AppConfig::load(&path)?;
        assert_eq!(cfg.storage.dir.as_deref(), Some(Path::new("/var/lib/todosync")));
        assert_eq!(cfg.storage.key, "todo-tasks");
        assert_eq!(cfg.operations.simulated_delay(), Duration::from_secs(1));
        assert_eq!(cfg.notifications.duration_ms, 1500);
        assert_eq!(cfg.ui.active_list_limit, Some(10));
        assert_eq!(cfg.ui.tick_rate(), Duration::from_millis(100));
        Ok(())
    }

    #[test]
    fn partial_sections_keep_defaults() -> Result<()> {
        let cfg = AppConfig::from_toml_str("[ui]\nactive_list_limit = 5\n")?;
        assert_eq!(cfg.ui.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(cfg.storage.key, DEFAULT_STORAGE_KEY);
        Ok(())
    }

    #[test]
    fn invalid_storage_key_is_rejected() {
        let Err(err) = AppConfig::from_toml_str("[storage]\nkey = \"../tasks\"\n") else {
            panic!("path-like key should error");
        };
        assert!(err.to_string().contains("storage.key"));
    }

    #[test]
    fn zero_durations_are_rejected() {
        assert!(AppConfig::from_toml_str("[notifications]\nduration_ms = 0\n").is_err());
        assert!(AppConfig::from_toml_str("[ui]\ntick_rate_ms = 0\n").is_err());
        assert!(AppConfig::from_toml_str("[ui]\nactive_list_limit = 0\n").is_err());
    }

    #[test]
    fn parse_errors_name_the_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage\nkey=")?;
        let Err(err) = AppConfig::load(&path) else {
            panic!("malformed config should error");
        };
        assert!(err.to_string().contains("config.toml"));
        Ok(())
    }

    #[test]
    fn defaults_survive_toml_roundtrip() -> Result<()> {
        let text = AppConfig::default().to_toml_string()?;
        assert_eq!(AppConfig::from_toml_str(&text)?, AppConfig::default());
        Ok(())
    }
}
