use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CATALOG_FILE: &str = "catalog.json";
const DEFAULT_EXPORT_FILE: &str = crate::export::DEFAULT_EXPORT_FILENAME;

/// Configuration for resdir, stored in the data directory as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResdirConfig {
    /// Filename of the JSON catalog inside the data directory
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Default filename for exported result documents
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

fn default_catalog_file() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

impl Default for ResdirConfig {
    fn default() -> Self {
        Self {
            catalog_file: default_catalog_file(),
            export_file: default_export_file(),
        }
    }
}

impl ResdirConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ResdirConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ResdirConfig::load(dir.path()).unwrap();
        assert_eq!(config, ResdirConfig::default());
        assert_eq!(config.catalog_file, "catalog.json");
        assert_eq!(config.export_file, "organizations.txt");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = ResdirConfig {
            catalog_file: "providers.json".into(),
            export_file: "providers.txt".into(),
        };
        config.save(dir.path()).unwrap();

        let loaded = ResdirConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"catalog_file": "providers.json"}"#,
        )
        .unwrap();

        let loaded = ResdirConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.catalog_file, "providers.json");
        assert_eq!(loaded.export_file, "organizations.txt");
    }
}
