use crate::error::{Result, StockError};
use crate::model::{DEFAULT_CATEGORY, DEFAULT_UNIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for a stock sheet, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockConfig {
    /// Directory CSV exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Category used when an item is added without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Unit used when an item is added without one
    #[serde(default = "default_unit")]
    pub default_unit: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            default_category: default_category(),
            default_unit: default_unit(),
        }
    }
}

pub const CONFIG_KEYS: [&str; 3] = ["export-dir", "default-category", "default-unit"];

impl StockConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockError::Io)?;
        let config: StockConfig =
            serde_json::from_str(&content).map_err(StockError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockError::Serialization)?;
        fs::write(config_path, content).map_err(StockError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "export-dir" => Ok(self.export_dir.display().to_string()),
            "default-category" => Ok(self.default_category.clone()),
            "default-unit" => Ok(self.default_unit.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "export-dir" => self.export_dir = PathBuf::from(value),
            "default-category" | "default-unit" if value.is_empty() => {
                return Err(StockError::Config(format!("{} cannot be empty", key)));
            }
            "default-category" => self.default_category = value.to_string(),
            "default-unit" => self.default_unit = value.to_string(),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> StockError {
    StockError::Config(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.default_category, "Other");
        assert_eq!(config.default_unit, "Nos");
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = StockConfig::load(temp.path()).unwrap();
        assert_eq!(config, StockConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = StockConfig::default();
        config.set("default-unit", "kg").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = StockConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.default_unit, "kg");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"default_unit":"L"}"#).unwrap();
        let loaded = StockConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.default_unit, "L");
        assert_eq!(loaded.default_category, "Other");
    }

    #[test]
    fn test_unknown_and_empty_keys_rejected() {
        let mut config = StockConfig::default();
        assert!(matches!(config.set("colour", "red"), Err(StockError::Config(_))));
        assert!(matches!(config.set("default-category", " "), Err(StockError::Config(_))));
        assert!(config.get("colour").is_err());
    }
}
