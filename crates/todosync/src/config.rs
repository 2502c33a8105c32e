//! Configuration and storage wiring for the todosync binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use todosync_app::{AppConfig, ServiceOptions, TaskService, TaskStore};
use todosync_store::FileStore;
use tracing::debug;

/// Default location of `config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("todosync").join("config.toml"))
}

/// Default directory for the task snapshot.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("todosync"))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(AppConfig::default()),
        },
    };
    debug!(path = %path.display(), "Loading configuration");
    AppConfig::load(&path)
}

/// Pick the snapshot directory: CLI flag, then config, then platform default.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    flag.or_else(|| config.storage.dir.clone())
        .or_else(default_data_dir)
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
}

/// Open the file store and build the task service for this process.
pub fn open_service(data_dir: Option<PathBuf>, config: &AppConfig) -> Result<TaskService<FileStore>> {
    let dir = resolve_data_dir(data_dir, config)?;
    let files = FileStore::open(&dir).with_context(|| format!("failed to open data directory {}", dir.display()))?;
    let store = TaskStore::open(files, config.storage.key.clone())
        .with_context(|| format!("failed to load tasks from {}", dir.display()))?;
    Ok(TaskService::new(store, ServiceOptions::from_config(config)))
}

/// Write the default configuration to `output` (or the default path).
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| anyhow!("could not determine the config directory"))?,
    };

    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let content = AppConfig::default().to_toml_string()?;
    std::fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"))
    }

    #[test]
    fn default_config_path_ends_with_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("todosync/config.toml"));
        }
    }

    #[test]
    fn data_dir_flag_wins_over_config() {
        let mut config = AppConfig::default();
        config.storage.dir = Some(PathBuf::from("/from/config"));

        let dir = resolve_data_dir(Some(PathBuf::from("/from/flag")), &config)
            .unwrap_or_else(|err| panic!("resolve: {err}"));
        assert_eq!(dir, PathBuf::from("/from/flag"));

        let dir = resolve_data_dir(None, &config).unwrap_or_else(|err| panic!("resolve: {err}"));
        assert_eq!(dir, PathBuf::from("/from/config"));
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = temp_dir();
        let config = load_config(Some(&dir.path().join("absent.toml")))
            .unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn init_config_writes_loadable_defaults() {
        let dir = temp_dir();
        let path = dir.path().join("nested").join("config.toml");

        let written = init_config(Some(&path), false).unwrap_or_else(|err| panic!("init: {err}"));
        assert_eq!(written, path);

        let loaded = load_config(Some(&path)).unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn init_config_refuses_to_overwrite_without_force() {
        let dir = temp_dir();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ntick_rate_ms = 50\n").unwrap_or_else(|err| panic!("write: {err}"));

        assert!(init_config(Some(&path), false).is_err());
        assert!(init_config(Some(&path), true).is_ok());
        let loaded = load_config(Some(&path)).unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(loaded.ui.tick_rate_ms, AppConfig::default().ui.tick_rate_ms);
    }

    #[test]
    fn open_service_creates_data_dir() {
        let dir = temp_dir();
        let data = dir.path().join("data");
        let service = open_service(Some(data.clone()), &AppConfig::default())
            .unwrap_or_else(|err| panic!("open: {err}"));
        assert!(data.is_dir());
        assert!(service.tasks().is_empty());
    }
}
