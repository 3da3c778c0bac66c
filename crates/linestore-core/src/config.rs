//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/linestore/config.toml)
//! 3. Environment variables (LINESTORE_* prefix)
//!
//! Environment variables take precedence over config file values.
//!
//! The config supplies what the store consumes from its surroundings: the
//! backing file path and the sort-on-write flag, plus the activity log
//! location.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "LINESTORE";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backing file for the store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Write entries in ascending key order on save
    #[serde(default)]
    pub sort_on_write: bool,

    /// Timestamped activity log file (optional)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            sort_on_write: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LINESTORE_STORE_PATH, LINESTORE_SORT_ON_WRITE,
    ///    LINESTORE_LOG_FILE)
    /// 2. Config file (~/.config/linestore/config.toml or LINESTORE_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit CLI-provided path over
    /// the default location
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // LINESTORE_STORE_PATH
        if let Ok(val) = std::env::var(format!("{}_STORE_PATH", ENV_PREFIX)) {
            self.store_path = PathBuf::from(val);
        }

        // LINESTORE_SORT_ON_WRITE
        if let Ok(val) = std::env::var(format!("{}_SORT_ON_WRITE", ENV_PREFIX)) {
            self.sort_on_write = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // LINESTORE_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific path, creating parent directories
    /// as needed
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with LINESTORE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linestore")
            .join("config.toml")
    }
}

/// Get the default store file path
fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linestore")
        .join("settings.dat")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "LINESTORE_STORE_PATH",
        "LINESTORE_SORT_ON_WRITE",
        "LINESTORE_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::default();
        assert!(!config.sort_on_write);
        assert!(config.log_file.is_none());
        assert!(config.store_path.ends_with("linestore/settings.dat"));
    }

    #[test]
    fn test_env_override_store_path() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINESTORE_STORE_PATH", "/tmp/linestore-test.dat");
        config.apply_env_overrides();

        assert_eq!(config.store_path, PathBuf::from("/tmp/linestore-test.dat"));
    }

    #[test]
    fn test_env_override_sort_on_write() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(!config.sort_on_write);

        env::set_var("LINESTORE_SORT_ON_WRITE", "true");
        config.apply_env_overrides();
        assert!(config.sort_on_write);

        env::set_var("LINESTORE_SORT_ON_WRITE", "1");
        config.sort_on_write = false;
        config.apply_env_overrides();
        assert!(config.sort_on_write);

        env::set_var("LINESTORE_SORT_ON_WRITE", "false");
        config.apply_env_overrides();
        assert!(!config.sort_on_write);
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(config.log_file.is_none());

        env::set_var("LINESTORE_LOG_FILE", "/var/log/linestore.log");
        config.apply_env_overrides();
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/var/log/linestore.log"))
        );

        // Empty string clears it
        env::set_var("LINESTORE_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            store_path: PathBuf::from("/data/settings.dat"),
            sort_on_write: true,
            log_file: Some(PathBuf::from("/data/linestore.log")),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("store_path"));
        assert!(toml_str.contains("sort_on_write"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.store_path, config.store_path);
        assert_eq!(parsed.sort_on_write, config.sort_on_write);
        assert_eq!(parsed.log_file, config.log_file);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            store_path = "/custom/settings.dat"
            sort_on_write = true
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/custom/settings.dat"));
        assert!(config.sort_on_write);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_save_to_path_writes_given_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let config = Config {
            store_path: PathBuf::from("/data/settings.dat"),
            sort_on_write: true,
            log_file: None,
        };
        config.save_to_path(&path).unwrap();

        let parsed: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.sort_on_write);
        assert_eq!(parsed.store_path, PathBuf::from("/data/settings.dat"));
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert!(!config.sort_on_write);
        assert!(config.log_file.is_none());
    }
}
