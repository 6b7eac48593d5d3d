pub mod config;
pub mod service;

pub use config::RegistryConfig;
pub use service::Registry;
