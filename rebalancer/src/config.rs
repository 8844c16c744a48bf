//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};

use log::debug;
use nanofolio::{LedgerOptions, SNAPSHOT_KEY, Weights};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            key: default_key(),
        }
    }
}

fn default_store_dir() -> String {
    "./data".into()
}
fn default_key() -> String {
    SNAPSHOT_KEY.into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_stock")]
    pub stock: f64,
    #[serde(default = "default_commodity")]
    pub commodity: f64,
    #[serde(default = "default_bond")]
    pub bond: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            stock: default_stock(),
            commodity: default_commodity(),
            bond: default_bond(),
        }
    }
}

fn default_stock() -> f64 {
    nanofolio::STOCK_WEIGHT
}
fn default_commodity() -> f64 {
    nanofolio::COMMODITY_WEIGHT
}
fn default_bond() -> f64 {
    nanofolio::BOND_WEIGHT
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Amounts are divided by this before display (10000 = 万).
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,
    #[serde(default = "default_unit_suffix")]
    pub unit_suffix: String,
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit_scale: default_unit_scale(),
            unit_suffix: default_unit_suffix(),
            decimals: default_decimals(),
        }
    }
}

fn default_unit_scale() -> f64 {
    10_000.0
}
fn default_unit_suffix() -> String {
    "万".into()
}
fn default_decimals() -> usize {
    2
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Load config from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.store.dir.trim().is_empty() {
            return Err(Error::Config("store dir must not be empty".into()));
        }
        if self.store.key.is_empty()
            || !self
                .store
                .key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::Config(format!(
                "store key '{}' must be non-empty ASCII letters, digits, '-' or '_'",
                self.store.key
            )));
        }
        self.weights()?;
        if !self.display.unit_scale.is_finite() || self.display.unit_scale <= 0.0 {
            return Err(Error::Config("unit_scale must be > 0".into()));
        }
        if self.display.decimals > 8 {
            return Err(Error::Config("decimals must be <= 8".into()));
        }
        Ok(())
    }

    /// Validated target weights.
    pub fn weights(&self) -> Result<Weights> {
        let w = &self.weights;
        Weights::new(w.stock, w.commodity, w.bond)
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Directory the snapshot store lives in.
    pub fn store_dir(&self) -> PathBuf {
        PathBuf::from(&self.store.dir)
    }

    /// Ledger options derived from this config.
    pub fn ledger_options(&self) -> Result<LedgerOptions> {
        Ok(LedgerOptions {
            key: self.store.key.clone(),
            weights: self.weights()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_toml() -> &'static str {
        r#"
[store]
dir = "./portfolio"
key = "assetData"

[weights]
stock = 0.6
commodity = 0.2
bond = 0.2

[display]
unit_scale = 1000.0
unit_suffix = "k"
decimals = 1
"#
    }

    #[test]
    fn parse_example_config() {
        let config = Config::from_toml(example_toml()).unwrap();
        assert_eq!(config.store.dir, "./portfolio");
        assert_eq!(config.store.key, "assetData");
        assert_eq!(config.weights.stock, 0.6);
        assert_eq!(config.display.unit_suffix, "k");
        assert_eq!(config.display.decimals, 1);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.store.dir, "./data");
        assert_eq!(config.store.key, SNAPSHOT_KEY);
        assert_eq!(config.weights().unwrap(), Weights::DEFAULT);
        assert_eq!(config.display.unit_scale, 10_000.0);
        assert_eq!(config.display.unit_suffix, "万");
        assert_eq!(config.display.decimals, 2);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config = Config::from_toml("[display]\ndecimals = 0\n").unwrap();
        assert_eq!(config.display.decimals, 0);
        assert_eq!(config.display.unit_scale, 10_000.0);
    }

    #[test]
    fn validate_catches_bad_weights() {
        let toml = example_toml().replace("stock = 0.6", "stock = 0.7");
        assert!(matches!(Config::from_toml(&toml), Err(Error::Config(_))));
    }

    #[test]
    fn validate_catches_bad_key() {
        let toml = example_toml().replace("key = \"assetData\"", "key = \"../x\"");
        assert!(Config::from_toml(&toml).is_err());
    }

    #[test]
    fn validate_catches_bad_scale() {
        let mut config = Config::from_toml(example_toml()).unwrap();
        config.display.unit_scale = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn ledger_options_carry_weights() {
        let config = Config::from_toml(example_toml()).unwrap();
        let options = config.ledger_options().unwrap();
        assert_eq!(options.key, "assetData");
        assert_eq!(options.weights.stock, 0.6);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.store.key, SNAPSHOT_KEY);
        assert!(matches!(
            Config::load(&dir.path().join("nope.toml")),
            Err(Error::ConfigRead { .. })
        ));
    }
}
