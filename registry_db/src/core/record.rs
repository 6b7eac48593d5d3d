use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::token::{property_id_for, pseudo_hash};
use crate::error::LedgerError;

/// One completed sale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub price: String,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: String,
}

/// A registered parcel, i.e. one block in the mock chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub sequence_number: u64,
    pub property_id: String,

    pub location: String,
    pub size: String,
    pub owner: String,

    pub for_sale: bool,
    pub price: Option<String>,

    pub created_at: DateTime<Utc>,
    pub pseudo_hash: String,
    pub previous_pseudo_hash: String,

    pub transfer_history: Vec<Transfer>,
}

impl Record {
    pub fn new(
        sequence_number: u64,
        location: &str,
        size: &str,
        owner: &str,
        previous_pseudo_hash: &str,
    ) -> Self {
        Self {
            sequence_number,
            property_id: property_id_for(sequence_number),

            location: location.to_owned(),
            size: size.to_owned(),
            owner: owner.to_owned(),

            for_sale: false,
            price: None,

            created_at: Utc::now(),
            pseudo_hash: pseudo_hash(),
            previous_pseudo_hash: previous_pseudo_hash.to_owned(),

            transfer_history: Vec::new(),
        }
    }

    pub fn is_listed(&self) -> bool {
        self.for_sale && self.price.is_some()
    }

    pub(crate) fn list(&mut self, price: &str) -> Result<(), LedgerError> {
        if price.is_empty() {
            return Err(LedgerError::EmptyPrice);
        }

        self.for_sale = true;
        self.price = Some(price.to_owned());
        Ok(())
    }

    /// Moves ownership to `buyer`. Sale status and price reset together.
    pub(crate) fn transfer_to(
        &mut self,
        buyer: &str,
        transaction_hash: String,
    ) -> Result<Receipt, LedgerError> {
        let price = match (self.for_sale, &self.price) {
            (true, Some(price)) => price.clone(),
            _ => return Err(LedgerError::NotEligible(self.property_id.clone())),
        };

        let transfer = Transfer {
            from: self.owner.clone(),
            to: buyer.to_owned(),
            price,
            timestamp: Utc::now(),
            transaction_hash,
        };
        let receipt = Receipt::new(&self.property_id, &transfer);

        self.transfer_history.push(transfer);
        self.owner = buyer.to_owned();
        self.for_sale = false;
        self.price = None;

        Ok(receipt)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub property_id: String,
    pub from: String,
    pub to: String,
    pub price: String,
    pub transaction_hash: String,
}

impl Receipt {
    fn new(property_id: &str, transfer: &Transfer) -> Self {
        Self {
            property_id: property_id.to_owned(),
            from: transfer.from.clone(),
            to: transfer.to.clone(),
            price: transfer.price.clone(),
            transaction_hash: transfer.transaction_hash.clone(),
        }
    }
}

/// Result of a successful buy: the record after transfer and its receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub record: Record,
    pub receipt: Receipt,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryView {
    pub property_id: String,
    pub current_owner: String,
    pub sequence_number: u64,
    pub pseudo_hash: String,
    pub created_at: DateTime<Utc>,
    pub transfer_history: Vec<Transfer>,
}

impl From<&Record> for HistoryView {
    fn from(record: &Record) -> Self {
        Self {
            property_id: record.property_id.clone(),
            current_owner: record.owner.clone(),
            sequence_number: record.sequence_number,
            pseudo_hash: record.pseudo_hash.clone(),
            created_at: record.created_at,
            transfer_history: record.transfer_history.clone(),
        }
    }
}
