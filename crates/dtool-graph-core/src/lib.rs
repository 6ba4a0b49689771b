//! dtool-graph core
//!
//! Shared domain types: dataset records as returned by the lookup server,
//! and the configuration needed to reach that server.

pub mod record;
pub mod config;

pub use record::DatasetRecord;
pub use config::{LookupConfig, ConfigError, SERVER_URL_KEY, SERVER_TOKEN_KEY, SERVER_TIMEOUT_KEY};
