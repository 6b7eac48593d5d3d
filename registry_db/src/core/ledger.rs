use std::collections::HashSet;

use tracing::{info, warn};

use super::record::{HistoryView, Purchase, Record};
use super::token::{GENESIS_PREV_HASH, property_id_for, unique_token};
use crate::error::LedgerError;

/// Append-only list of property records standing in for a chain.
///
/// Records are only ever pushed; ownership, sale status and history change in
/// place. Every query hands back owned clones so callers never hold references
/// into the ledger.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<Record>,
    transaction_hashes: HashSet<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, location: &str, size: &str, owner: &str) -> Record {
        let previous_hash = self
            .get_last_record()
            .map(|record| record.pseudo_hash.as_str())
            .unwrap_or(GENESIS_PREV_HASH);

        let record = Record::new(self.next_sequence_number(), location, size, owner, previous_hash);

        info!(
            property_id = %record.property_id,
            block = record.sequence_number,
            hash = %record.pseudo_hash,
            prev_hash = %record.previous_pseudo_hash,
            "Block added to chain"
        );

        self.records.push(record.clone());
        record
    }

    fn next_sequence_number(&self) -> u64 {
        self.records.len() as u64 + 1
    }

    fn get_last_record(&self) -> Option<&Record> {
        self.records.last()
    }

    fn find_mut(&mut self, property_id: &str) -> Option<&mut Record> {
        self.records
            .iter_mut()
            .find(|record| record.property_id == property_id)
    }

    pub fn get(&self, property_id: &str) -> Option<Record> {
        self.records
            .iter()
            .find(|record| record.property_id == property_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn list_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn list_by_owner(&self, owner: &str) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.owner == owner)
            .cloned()
            .collect()
    }

    pub fn properties_for_sale(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.for_sale)
            .cloned()
            .collect()
    }

    pub fn list_for_sale(&mut self, property_id: &str, price: &str) -> Result<Record, LedgerError> {
        let Some(record) = self.find_mut(property_id) else {
            warn!(property_id, "Listing failed: unknown property");
            return Err(LedgerError::NotFound(property_id.to_owned()));
        };

        record.list(price)?;
        info!(property_id, price, "Property listed for sale");

        Ok(record.clone())
    }

    pub fn buy(&mut self, property_id: &str, buyer: &str) -> Result<Purchase, LedgerError> {
        // field-level borrows: the record and the issued-hash set are disjoint
        let Some(record) = self
            .records
            .iter_mut()
            .find(|record| record.property_id == property_id)
        else {
            warn!(property_id, buyer, "Purchase failed: unknown property");
            return Err(LedgerError::NotFound(property_id.to_owned()));
        };

        if !record.is_listed() {
            warn!(property_id, buyer, "Purchase failed: property not for sale");
            return Err(LedgerError::NotEligible(property_id.to_owned()));
        }

        let transaction_hash = unique_token(&mut self.transaction_hashes);
        let receipt = record.transfer_to(buyer, transaction_hash)?;

        info!(
            property_id,
            from = %receipt.from,
            to = %receipt.to,
            price = %receipt.price,
            tx = %receipt.transaction_hash,
            "Ownership transferred"
        );

        Ok(Purchase {
            record: record.clone(),
            receipt,
        })
    }

    pub fn history(&self, property_id: &str) -> Option<HistoryView> {
        self.records
            .iter()
            .find(|record| record.property_id == property_id)
            .map(HistoryView::from)
    }

    /// Checks block numbering and the cosmetic prev-hash links. The tokens are
    /// random, so this says nothing about record contents.
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        let mut expected_prev = GENESIS_PREV_HASH;

        for (position, record) in self.records.iter().enumerate() {
            let expected_block = position as u64 + 1;

            if record.sequence_number != expected_block {
                return Err(LedgerError::ChainValidation(format!(
                    "Block at position {} has number {}, expected {}",
                    position, record.sequence_number, expected_block
                )));
            }

            if record.property_id != property_id_for(expected_block) {
                return Err(LedgerError::ChainValidation(format!(
                    "Block {} carries property id {}",
                    expected_block, record.property_id
                )));
            }

            if record.previous_pseudo_hash != expected_prev {
                return Err(LedgerError::ChainValidation(format!(
                    "Block {} does not link to its predecessor",
                    expected_block
                )));
            }

            expected_prev = record.pseudo_hash.as_str();
        }

        Ok(())
    }
}
