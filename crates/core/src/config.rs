use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataConfig {
    pub inventory_path: PathBuf,
    pub deliveries_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub inventory_path: Option<PathBuf>,
    pub deliveries_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                inventory_path: PathBuf::from("data/inventory.json"),
                deliveries_path: PathBuf::from("data/deliveries.json"),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    data: Option<DataPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DataPatch {
    dir: Option<PathBuf>,
    inventory_path: Option<PathBuf>,
    deliveries_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Defaults, then the TOML file (if any), then `STOCKLINE_*` environment
    /// overrides, then programmatic overrides, then validation.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("stockline.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(data) = patch.data {
            if let Some(dir) = data.dir {
                self.data.inventory_path = dir.join("inventory.json");
                self.data.deliveries_path = dir.join("deliveries.json");
            }
            if let Some(inventory_path) = data.inventory_path {
                self.data.inventory_path = inventory_path;
            }
            if let Some(deliveries_path) = data.deliveries_path {
                self.data.deliveries_path = deliveries_path;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(dir) = env_path("STOCKLINE_DATA_DIR") {
            self.data.inventory_path = dir.join("inventory.json");
            self.data.deliveries_path = dir.join("deliveries.json");
        }
        if let Some(path) = env_path("STOCKLINE_INVENTORY_PATH") {
            self.data.inventory_path = path;
        }
        if let Some(path) = env_path("STOCKLINE_DELIVERIES_PATH") {
            self.data.deliveries_path = path;
        }
        if let Ok(level) = env::var("STOCKLINE_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.logging.level = level;
            }
        }
        if let Ok(format) = env::var("STOCKLINE_LOG_FORMAT") {
            if !format.trim().is_empty() {
                self.logging.format = format.parse().map_err(|_| {
                    ConfigError::InvalidEnvOverride {
                        key: "STOCKLINE_LOG_FORMAT".to_string(),
                        value: format.clone(),
                    }
                })?;
            }
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.data_dir {
            self.data.inventory_path = dir.join("inventory.json");
            self.data.deliveries_path = dir.join("deliveries.json");
        }
        if let Some(path) = overrides.inventory_path {
            self.data.inventory_path = path;
        }
        if let Some(path) = overrides.deliveries_path {
            self.data.deliveries_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data.inventory_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("data.inventory_path is empty".to_string()));
        }
        if self.data.deliveries_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("data.deliveries_path is empty".to_string()));
        }
        if self.data.inventory_path == self.data.deliveries_path {
            return Err(ConfigError::Validation(
                "inventory and deliveries must be stored in separate documents".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level is empty".to_string()));
        }
        Ok(())
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path("STOCKLINE_CONFIG") {
        return Some(path);
    }
    let default = PathBuf::from("stockline.toml");
    default.exists().then_some(default)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

    #[test]
    fn defaults_point_at_the_data_directory() {
        let config = AppConfig::default();
        assert_eq!(config.data.inventory_path, PathBuf::from("data/inventory.json"));
        assert_eq!(config.data.deliveries_path, PathBuf::from("data/deliveries.json"));
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_patch_and_overrides_layer_in_order() {
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        writeln!(
            file,
            "[data]\ndir = \"/srv/stockline\"\n\n[logging]\nlevel = \"debug\"\nformat = \"json\""
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides {
                log_level: Some("trace".to_string()),
                ..ConfigOverrides::default()
            },
        })
        .expect("load config");

        assert_eq!(config.data.inventory_path, PathBuf::from("/srv/stockline/inventory.json"));
        assert_eq!(config.data.deliveries_path, PathBuf::from("/srv/stockline/deliveries.json"));
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/definitely/not/here.toml")),
            require_file: true,
            ..LoadOptions::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn data_dir_override_rewrites_both_paths() {
        let config = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                data_dir: Some(PathBuf::from("/tmp/retail")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("load config");

        assert_eq!(config.data.inventory_path, PathBuf::from("/tmp/retail/inventory.json"));
        assert_eq!(config.data.deliveries_path, PathBuf::from("/tmp/retail/deliveries.json"));
    }
}
