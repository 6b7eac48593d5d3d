use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("No property registered with id {0}")]
    NotFound(String),

    #[error("Property {0} is not listed for sale")]
    NotEligible(String),

    #[error("Sale price cannot be empty")]
    EmptyPrice,

    #[error("{0}")]
    ChainValidation(String),
}
