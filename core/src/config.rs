use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ContributionRate;

const DATA_DIR_NAME: &str = ".visitledger";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub rate: ContributionRate,
    /// Scopes which stored rows belong to this user.
    pub owner: String,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rate: ContributionRate::default(),
            owner: "default".to_string(),
            currency_symbol: "₪".to_string(),
        }
    }
}

/// `base_dir` if given, otherwise `~/.visitledger`.
pub fn resolve_data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => {
            let home_dir =
                dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DATA_DIR_NAME))
        }
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it is absent.
    pub fn load(&self) -> Result<AppConfig> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)
                .with_context(|| format!("Could not read {}", self.path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Invalid config in {}", self.path.display()))?
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            AppConfig::default()
        };
        config.rate.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, config)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert_eq!(store.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let config = AppConfig {
            owner: "dana".to_string(),
            currency_symbol: "€".to_string(),
            ..AppConfig::default()
        };
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(store.path(), r#"{"owner":"sam"}"#).unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.owner, "sam");
        assert_eq!(config.rate.base_amount, Decimal::new(260, 0));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{"rate":{"base_amount":-5,"pension_rate":0.1,"benefits_rate":0,"employee_rate":0}}"#,
        )
        .unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/ledger");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }
}
