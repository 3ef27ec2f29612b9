//! Row shapes exchanged with the row table.

use std::string::FromUtf8Error;

/// A value as the backend hands it over, before any coercion.
///
/// Backends disagree on how text comes back (SQLite alone may return TEXT,
/// BLOB or INTEGER for the same column), so adapters capture the native
/// representation here and call [`RawValue::normalize`] exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Real(f64),
}

impl RawValue {
    /// Collapse the native representation into canonical text.
    ///
    /// `Null` yields `None`. Bytes must be valid UTF-8; the decoding error is
    /// returned to the caller rather than replaced.
    pub fn normalize(self) -> Result<Option<String>, FromUtf8Error> {
        match self {
            Self::Null => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            Self::Bytes(bytes) => String::from_utf8(bytes).map(Some),
            Self::Integer(n) => Ok(Some(n.to_string())),
            Self::Real(x) => Ok(Some(x.to_string())),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// A row after the adapter has committed to canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub key: String,
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_unchanged() {
        let raw = RawValue::from("https://start.exactonline.co.uk/api");
        assert_eq!(
            raw.normalize().unwrap().as_deref(),
            Some("https://start.exactonline.co.uk/api")
        );
    }

    #[test]
    fn test_normalize_utf8_bytes() {
        let raw = RawValue::from(b"hello".to_vec());
        assert_eq!(raw.normalize().unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_normalize_invalid_bytes() {
        let raw = RawValue::from(vec![0xff_u8, 0xfe, 0x68]);
        assert!(raw.normalize().is_err());
    }

    #[test]
    fn test_normalize_integer() {
        let raw = RawValue::from(1_426_492_503_i64);
        assert_eq!(raw.normalize().unwrap().as_deref(), Some("1426492503"));
    }

    #[test]
    fn test_normalize_null() {
        assert_eq!(RawValue::Null.normalize().unwrap(), None);
    }
}
