#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]

pub mod core;
pub mod error;
pub mod registry;

pub use crate::core::{HistoryView, Ledger, Purchase, Receipt, Record, Transfer};
pub use crate::error::LedgerError;
pub use crate::registry::{Registry, RegistryConfig};
