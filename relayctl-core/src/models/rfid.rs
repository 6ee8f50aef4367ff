//! RFID tag validation and scan request parsing

use std::borrow::Cow;

use serde_json::Value;

use super::ValidationError;

/// Validated, trimmed RFID tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RfidTag(String);

impl RfidTag {
    /// Create a tag from raw scanner input.
    ///
    /// Surrounding whitespace is trimmed. A tag that is blank after trimming
    /// or contains a NUL character is rejected; Postgres text cannot hold NUL.
    ///
    /// # Example
    /// ```
    /// use relayctl_core::RfidTag;
    ///
    /// assert_eq!(RfidTag::new("  C3D4\n").unwrap().as_str(), "C3D4");
    /// assert!(RfidTag::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.contains('\0') {
            return Err(ValidationError::MissingTag);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RfidTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a raw scan request body into a tag.
///
/// Malformed JSON is `InvalidJson`. Well-formed JSON without a usable
/// `rfid_tag` (not an object, field absent, null, bool, array, object, or
/// blank) is `MissingTag`. Scanners that send the tag as a bare number are
/// accepted; the number's decimal text becomes the tag.
pub fn parse_scan_request(body: &[u8]) -> Result<RfidTag, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?;

    let raw: Cow<'_, str> = match value.get("rfid_tag") {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        _ => return Err(ValidationError::MissingTag),
    };

    RfidTag::new(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let tag = RfidTag::new("\t A1B2 \r\n").unwrap();
        assert_eq!(tag.as_str(), "A1B2");
    }

    #[test]
    fn keeps_inner_whitespace() {
        let tag = RfidTag::new(" A1 B2 ").unwrap();
        assert_eq!(tag.as_str(), "A1 B2");
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(RfidTag::new("").unwrap_err(), ValidationError::MissingTag);
        assert_eq!(RfidTag::new(" \n\t").unwrap_err(), ValidationError::MissingTag);
    }

    #[test]
    fn rejects_nul() {
        assert_eq!(RfidTag::new("A1\0B2").unwrap_err(), ValidationError::MissingTag);
        assert_eq!(
            parse_scan_request(br#"{"rfid_tag": "A1\u0000B2"}"#).unwrap_err(),
            ValidationError::MissingTag
        );
    }

    #[test]
    fn parses_object_body() {
        let tag = parse_scan_request(br#"{"rfid_tag": " C3D4 "}"#).unwrap();
        assert_eq!(tag.as_str(), "C3D4");
    }

    #[test]
    fn ignores_extra_fields() {
        let tag = parse_scan_request(br#"{"rfid_tag": "C3D4", "device": "door-1"}"#).unwrap();
        assert_eq!(tag.as_str(), "C3D4");
    }

    #[test]
    fn numeric_tag_becomes_text() {
        let tag = parse_scan_request(br#"{"rfid_tag": 123456}"#).unwrap();
        assert_eq!(tag.as_str(), "123456");
    }

    #[test]
    fn malformed_json_is_invalid_json() {
        let bodies: [&[u8]; 5] = [b"", b"{", b"rfid_tag=A1B2", b"{\"rfid_tag\": }", b"\xff\xfe"];
        for body in bodies {
            assert_eq!(
                parse_scan_request(body).unwrap_err(),
                ValidationError::InvalidJson,
                "body {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn unusable_tag_is_missing() {
        for body in [
            r#"{}"#,
            r#"{"rfid_tag": ""}"#,
            r#"{"rfid_tag": "   "}"#,
            r#"{"rfid_tag": null}"#,
            r#"{"rfid_tag": true}"#,
            r#"{"rfid_tag": ["A1B2"]}"#,
            r#"{"rfid_tag": {"id": "A1B2"}}"#,
            r#"{"RFID_TAG": "A1B2"}"#,
            r#"null"#,
            r#"[]"#,
            r#""A1B2""#,
        ] {
            assert_eq!(
                parse_scan_request(body.as_bytes()).unwrap_err(),
                ValidationError::MissingTag,
                "body {body}"
            );
        }
    }
}
