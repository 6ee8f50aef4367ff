//! Scan outcomes and the scan endpoint's response body

use serde::Serialize;

use super::{RelayId, RelayState};

/// Result of a committed scan transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Tag logged; no user owns it
    NoUser,

    /// Tag logged; its user has no relay assignments
    NoRelays { user_id: i64 },

    /// Tag logged and every assigned relay flipped
    Toggled {
        user_id: i64,
        relays: Vec<(RelayId, RelayState)>,
    },
}

impl ScanOutcome {
    /// Message returned to the scanner for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoUser => "RFID Tag logged successfully. No associated user found.",
            Self::NoRelays { .. } => {
                "RFID Tag logged successfully. No relays assigned to the user."
            }
            Self::Toggled { .. } => "RFID Tag logged successfully. Relay statuses toggled.",
        }
    }
}

/// Committed scan: the generated log row id plus the outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReceipt {
    pub log_id: i64,
    pub outcome: ScanOutcome,
}

/// Scan endpoint body: `{"success": "..."}` or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanResponse {
    Success(String),
    Error(String),
}

impl ScanResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

impl From<&ScanOutcome> for ScanResponse {
    fn from(outcome: &ScanOutcome) -> Self {
        Self::Success(outcome.message().to_owned())
    }
}
