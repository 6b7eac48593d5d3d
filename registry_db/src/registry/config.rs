use std::time::Duration;

const REGISTER_DELAY_MS: u64 = 1000;
const LISTING_DELAY_MS: u64 = 1000;
const PURCHASE_DELAY_MS: u64 = 1500;

/// Artificial latency applied before each mutation takes effect, standing in
/// for block confirmation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub register_delay: Duration,
    pub listing_delay: Duration,
    pub purchase_delay: Duration,
}

impl RegistryConfig {
    pub fn from_millis(register: u64, listing: u64, purchase: u64) -> Self {
        Self {
            register_delay: Duration::from_millis(register),
            listing_delay: Duration::from_millis(listing),
            purchase_delay: Duration::from_millis(purchase),
        }
    }

    /// No delays at all, for tests and scripted runs.
    pub fn instant() -> Self {
        Self::from_millis(0, 0, 0)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::from_millis(REGISTER_DELAY_MS, LISTING_DELAY_MS, PURCHASE_DELAY_MS)
    }
}
