//! Validation error types
//!
//! The Display text of each variant is the message returned to scanners.

use std::fmt;

/// Request rejected before any database work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Scan endpoint called with anything other than POST
    InvalidMethod,

    /// Body is not well-formed JSON
    InvalidJson,

    /// `rfid_tag` absent, not a string/number, blank after trimming, or
    /// containing NUL
    MissingTag,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMethod => write!(f, "Invalid request method."),
            Self::InvalidJson => write!(f, "Invalid JSON format."),
            Self::MissingTag => write!(f, "Missing or empty 'rfid_tag' in request."),
        }
    }
}

impl std::error::Error for ValidationError {}
