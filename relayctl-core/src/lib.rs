//! relayctl-core: domain types shared by the relayctl server and CLI
//!
//! - RFID tag validation and scan request parsing
//! - Binary relay state and the status report document
//! - Scan outcomes and their wire messages
//! - Layered configuration (defaults, TOML file, environment)

pub mod config;
pub mod error;
pub mod models;

pub use config::{DatabaseConfig, RelayctlConfig, ServerSection};
pub use error::{ConfigError, Result};
pub use models::{
    parse_scan_request, RelayId, RelayState, RelayStatusReport, RfidTag, ScanOutcome,
    ScanReceipt, ScanResponse, ValidationError,
};
