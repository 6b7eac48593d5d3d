use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::path::{Path, PathBuf};

use registry_db::{HistoryView, LedgerError, Purchase, Record, Registry};

use crate::certificate;
use crate::config::Config;

/// One user's view of a registry for the lifetime of the process.
pub struct Session {
    registry: Registry,
    account: String,
    certificate_dir: PathBuf,
}

impl Session {
    pub fn new(registry: Registry, account: &str, certificate_dir: &Path) -> Self {
        Self {
            registry,
            account: account.to_owned(),
            certificate_dir: certificate_dir.to_path_buf(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let registry = Registry::new(config.delays.registry_config());
        Self::new(registry, &config.account, &config.certificate_dir)
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn register(&self, location: &str, size: &str) -> Result<Record> {
        if location.trim().is_empty() {
            bail!("Location cannot be empty");
        }
        if size.trim().is_empty() {
            bail!("Size cannot be empty");
        }

        Ok(self.registry.register(location, size, &self.account).await)
    }

    /// Properties the account could sell.
    pub fn my_properties(&self) -> Vec<Record> {
        self.registry.list_by_owner(&self.account)
    }

    pub fn market(&self) -> Vec<Record> {
        self.registry.properties_for_sale()
    }

    pub fn status(&self) -> Vec<Record> {
        self.registry.list_all()
    }

    pub async fn list_for_sale(&self, property_id: &str, price: &str) -> Result<Record, LedgerError> {
        self.registry.list_for_sale(property_id, price.trim()).await
    }

    pub async fn buy(&self, property_id: &str) -> Result<Purchase, LedgerError> {
        self.registry.buy(property_id, &self.account).await
    }

    pub fn history(&self, property_id: &str) -> Option<HistoryView> {
        self.registry.history(property_id)
    }

    pub fn certificate_text(&self, property_id: &str) -> Option<String> {
        self.registry
            .get(property_id)
            .map(|record| certificate::render(&record, Utc::now()))
    }

    pub fn export_certificate(&self, property_id: &str) -> Result<PathBuf> {
        let Some(text) = self.certificate_text(property_id) else {
            bail!("{}", LedgerError::NotFound(property_id.to_owned()));
        };

        std::fs::create_dir_all(&self.certificate_dir)
            .context("Failed to create certificate directory")?;

        let path = self.certificate_dir.join(certificate::file_name(property_id));
        std::fs::write(&path, text).context("Failed to write certificate")?;

        Ok(path)
    }
}
