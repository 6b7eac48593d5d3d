use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use super::config::RegistryConfig;
use crate::core::{HistoryView, Ledger, Purchase, Record};
use crate::error::LedgerError;

/// Async front of the [`Ledger`].
///
/// Mutations wait out their configured delay first, then apply their whole
/// find/check/mutate step under a single write lock. The lock is never held
/// across an await. Clones share the same ledger.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    ledger: Arc<RwLock<Ledger>>,
    config: RegistryConfig,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(Ledger::new())),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub async fn register(&self, location: &str, size: &str, owner: &str) -> Record {
        settle("register", self.config.register_delay).await;
        self.ledger.write().register(location, size, owner)
    }

    pub async fn list_for_sale(&self, property_id: &str, price: &str) -> Result<Record, LedgerError> {
        settle("list_for_sale", self.config.listing_delay).await;
        self.ledger.write().list_for_sale(property_id, price)
    }

    pub async fn buy(&self, property_id: &str, buyer: &str) -> Result<Purchase, LedgerError> {
        settle("buy", self.config.purchase_delay).await;
        self.ledger.write().buy(property_id, buyer)
    }

    pub fn list_all(&self) -> Vec<Record> {
        self.ledger.read().list_all()
    }

    pub fn list_by_owner(&self, owner: &str) -> Vec<Record> {
        self.ledger.read().list_by_owner(owner)
    }

    pub fn properties_for_sale(&self) -> Vec<Record> {
        self.ledger.read().properties_for_sale()
    }

    pub fn history(&self, property_id: &str) -> Option<HistoryView> {
        self.ledger.read().history(property_id)
    }

    pub fn get(&self, property_id: &str) -> Option<Record> {
        self.ledger.read().get(property_id)
    }

    pub fn len(&self) -> usize {
        self.ledger.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.read().is_empty()
    }

    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        self.ledger.read().verify_chain()
    }
}

async fn settle(operation: &str, delay: Duration) {
    if delay.is_zero() {
        return;
    }

    debug!(operation, delay_ms = delay.as_millis() as u64, "Waiting for confirmation");
    tokio::time::sleep(delay).await;
}
