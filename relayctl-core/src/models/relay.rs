//! Relay state and the status report served to devices

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Relay identifier as stored in `relay_status.relay_id`
pub type RelayId = i32;

/// Message sent when the status table is empty or unreadable
pub const NO_RELAY_DATA: &str = "No relay data found";

/// Binary relay state, stored and serialized as 0/1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayState {
    Off,
    On,
}

impl RelayState {
    /// State a relay takes on its first toggle.
    pub const FIRST_TOGGLE: Self = Self::On;

    /// Decode a stored status column. Only 0 and 1 are valid.
    pub fn from_stored(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            _ => None,
        }
    }

    /// Stored representation.
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl Serialize for RelayState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.as_i16())
    }
}

/// Response document for the relay status endpoint.
///
/// Serializes as `{"status":"success","relays":{"1":1}}` or
/// `{"status":"error","message":"No relay data found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RelayStatusReport {
    Success {
        relays: BTreeMap<RelayId, RelayState>,
    },
    Error {
        message: String,
    },
}

impl RelayStatusReport {
    /// Build a report from stored rows; an empty set yields the error form.
    pub fn from_states<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (RelayId, RelayState)>,
    {
        let relays: BTreeMap<_, _> = rows.into_iter().collect();
        if relays.is_empty() {
            return Self::unavailable();
        }
        Self::Success { relays }
    }

    /// Error form used for an empty table or a failed query.
    pub fn unavailable() -> Self {
        Self::Error {
            message: NO_RELAY_DATA.to_owned(),
        }
    }
}
