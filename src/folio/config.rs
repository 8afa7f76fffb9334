use crate::commands::search::SearchMode;
use crate::error::{FolioError, Result};
use crate::store::fs::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for folio, stored in `config.json` next to the notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolioConfig {
    /// Name of the notes document inside the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// How note searches are shown: highlight matches in the full list, or
    /// filter the list down to matches
    #[serde(default)]
    pub search_mode: SearchMode,

    /// Ask before deleting folders and notes
    #[serde(default = "default_confirm_deletes")]
    pub confirm_deletes: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_confirm_deletes() -> bool {
    true
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            search_mode: SearchMode::default(),
            confirm_deletes: default_confirm_deletes(),
        }
    }
}

impl FolioConfig {
    pub const KEYS: &'static [&'static str] = &["data-file", "search-mode", "confirm-deletes"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FolioError::Io)?;
        let config: FolioConfig =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FolioError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FolioError::Serialization)?;
        fs::write(config_path, content).map_err(FolioError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "search-mode" => Some(self.search_mode.to_string()),
            "confirm-deletes" => Some(self.confirm_deletes.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => {
                let value = value.trim();
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err(FolioError::Api(format!(
                        "data-file must be a plain file name, got '{}'",
                        value
                    )));
                }
                self.data_file = value.to_string();
            }
            "search-mode" => {
                self.search_mode = value.parse().map_err(FolioError::Api)?;
            }
            "confirm-deletes" => {
                self.confirm_deletes = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(FolioError::Api(format!(
                            "confirm-deletes expects true or false, got '{}'",
                            other
                        )))
                    }
                };
            }
            other => return Err(FolioError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        Self::KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (k.to_string(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.data_file, "notes.json");
        assert_eq!(config.search_mode, SearchMode::Highlight);
        assert!(config.confirm_deletes);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = FolioConfig::load(temp.path().join("absent")).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"search_mode": "filter"}"#).unwrap();
        let config = FolioConfig::load(temp.path()).unwrap();
        assert_eq!(config.search_mode, SearchMode::Filter);
        assert_eq!(config.data_file, "notes.json");
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = FolioConfig::default();
        config.set("search-mode", "filter").unwrap();
        config.set("confirm-deletes", "no").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = FolioConfig::load(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = FolioConfig::default();
        assert!(config.set("search-mode", "hide").is_err());
        assert!(config.set("confirm-deletes", "maybe").is_err());
        assert!(config.set("data-file", "../escape.json").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_list_all_covers_every_key() {
        let all = FolioConfig::default().list_all();
        let keys: Vec<_> = all.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, FolioConfig::KEYS);
    }
}
