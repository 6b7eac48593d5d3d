pub mod ledger;
pub mod record;
pub mod token;

pub use ledger::Ledger;
pub use record::{HistoryView, Purchase, Receipt, Record, Transfer};
