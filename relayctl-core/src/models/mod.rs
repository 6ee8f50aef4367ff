//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod relay;
pub mod rfid;
pub mod scan;
pub mod validation;

pub use relay::{RelayId, RelayState, RelayStatusReport};
pub use rfid::{parse_scan_request, RfidTag};
pub use scan::{ScanOutcome, ScanReceipt, ScanResponse};
pub use validation::ValidationError;
