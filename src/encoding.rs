//! Type-safe encoding wrapper for binary payload fields
//!
//! Signature bytes and public key material travel base64-encoded on the wire
//! but are raw bytes in memory. Keeping them in a dedicated newtype means the
//! encoding is handled once, at the serde boundary, instead of at every call
//! site.

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A binary payload that is base64-encoded in JSON
///
/// Deserialization rejects malformed base64, so a constructed value always
/// holds the decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Base64Data(Vec<u8>);

impl Base64Data {
    /// Wrap raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Base64Data(bytes.into())
    }

    /// Parse from a base64-encoded string (standard alphabet)
    pub fn from_base64(s: &str) -> Result<Self> {
        Ok(Base64Data(STANDARD.decode(s)?))
    }

    /// Encode as a base64 string
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the wrapper, yielding the underlying bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Whether the payload holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Base64Data {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Base64Data {
    fn from(bytes: Vec<u8>) -> Self {
        Base64Data(bytes)
    }
}

impl Serialize for Base64Data {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Base64Data {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD
            .decode(&s)
            .map(Base64Data)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_roundtrip() {
        let data = Base64Data::from_bytes(b"hello world".to_vec());
        let decoded = Base64Data::from_base64(&data.to_base64()).unwrap();
        assert_eq!(data, decoded);
    }

    #[test]
    fn test_serde_as_base64_string() {
        let data = Base64Data::from_bytes(b"A".to_vec());
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, "\"QQ==\"");
        let back: Base64Data = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_bytes(), b"A");
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(Base64Data::from_base64("not base64!!!").is_err());
        assert!(serde_json::from_str::<Base64Data>("\"not base64!!!\"").is_err());
    }
}
