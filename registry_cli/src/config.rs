use anyhow::{Context, Result};
use registry_db::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ACCOUNT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// wallet address the session acts as
    pub account: String,
    pub certificate_dir: PathBuf,
    #[serde(default)]
    pub delays: DelayConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayConfig {
    pub register_ms: u64,
    pub listing_ms: u64,
    pub purchase_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        let defaults = RegistryConfig::default();
        Self {
            register_ms: defaults.register_delay.as_millis() as u64,
            listing_ms: defaults.listing_delay.as_millis() as u64,
            purchase_ms: defaults.purchase_delay.as_millis() as u64,
        }
    }
}

impl DelayConfig {
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::from_millis(self.register_ms, self.listing_ms, self.purchase_ms)
    }
}

impl Config {
    /// Get (~/.land_registry)
    pub fn registry_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".land_registry"))
    }

    pub fn default_certificate_dir() -> Result<PathBuf> {
        Ok(Self::registry_dir()?.join("certificates"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::registry_dir()?.join("config.json"))
    }

    pub fn with_certificate_dir(certificate_dir: PathBuf) -> Self {
        Self {
            account: DEFAULT_ACCOUNT.to_string(),
            certificate_dir,
            delays: DelayConfig::default(),
        }
    }

    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_file()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::with_certificate_dir(Self::default_certificate_dir()?))
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Config from `path` when given, otherwise the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path)
                .with_context(|| format!("Could not load config from {}", path.display())),
            None => Self::load_or_default(),
        }
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}
