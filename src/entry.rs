//! Transparency log entry model and validation
//!
//! A log entry travels as a JSON object mapping entry UUIDs to payloads. The
//! payload carries the entry's position in the log, the digest of the signed
//! content, and the signature envelope. Validation here is structural only:
//! presence, bounds, and encoding shape. Verifying the signature bytes is the
//! verifier's job, not the model's.

use crate::encoding::Base64Data;
use crate::error::{CompositeError, Error, Result};
use crate::pki::SupportedPkiFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// The log's first real entry is index 1; index 0 is reserved.
pub const MIN_LOG_INDEX: i64 = 1;

/// Pattern a rendered SHA-256 digest must match: exactly 64 hex characters,
/// either case, no separators or prefix.
pub const SHA256_HEX_PATTERN: &str = "^[0-9a-fA-F]{64}$";

static SHA256_HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SHA256_HEX_PATTERN).expect("SHA256_HEX_PATTERN compiles"));

/// A log entry payload, keyed by entry UUID
///
/// The wire form is a bare JSON object; an empty object is structurally
/// valid. This is a transient transfer object owned by the request or
/// response that created it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(BTreeMap<String, LogEntryAnon>);

impl LogEntry {
    /// Create an empty entry map
    pub fn new() -> Self {
        LogEntry(BTreeMap::new())
    }

    /// Insert a payload under the given entry UUID
    pub fn insert(&mut self, uuid: impl Into<String>, entry: LogEntryAnon) {
        self.0.insert(uuid.into(), entry);
    }

    /// Look up a payload by entry UUID
    pub fn get(&self, uuid: &str) -> Option<&LogEntryAnon> {
        self.0.get(uuid)
    }

    /// Number of entries in the map
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(uuid, payload)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LogEntryAnon)> {
        self.0.iter()
    }

    /// Validate every payload in the map.
    ///
    /// Zero-value payloads are skipped: an all-default [`LogEntryAnon`] is
    /// treated as "not required" and passes, so a sparse map never fails on
    /// its empty slots. Payloads that fail validation stop the pass
    /// immediately; unlike [`LogEntryAnon::validate`], this does not
    /// aggregate failures across keys, and callers receive the first failing
    /// key's error only. Iteration is in key order, so the reported failure
    /// is deterministic.
    pub fn validate(&self) -> Result<()> {
        for entry in self.0.values() {
            if entry.is_empty() {
                continue;
            }
            entry.validate()?;
        }
        Ok(())
    }

    /// Parse an entry map from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Json)
    }

    /// Serialize the entry map to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Json)
    }
}

impl From<BTreeMap<String, LogEntryAnon>> for LogEntry {
    fn from(entries: BTreeMap<String, LogEntryAnon>) -> Self {
        LogEntry(entries)
    }
}

impl FromIterator<(String, LogEntryAnon)> for LogEntry {
    fn from_iter<I: IntoIterator<Item = (String, LogEntryAnon)>>(iter: I) -> Self {
        LogEntry(iter.into_iter().collect())
    }
}

/// One log record: content digest, position in the log, and signature envelope
///
/// Required fields are `Option` so that an absent or `null` wire value can be
/// represented and reported as a missing-field failure instead of failing at
/// parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryAnon {
    /// Free-form metadata attached to the entry
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_data: BTreeMap<String, String>,
    /// Position of the entry in the log, starting at 1
    pub log_index: Option<i64>,
    /// Signature envelope over the content
    pub signature: Option<Signature>,
    /// SHA-256 digest of the signed content, hex-encoded
    #[serde(rename = "signedContentSHA256")]
    pub signed_content_sha256: Option<String>,
}

impl LogEntryAnon {
    /// Whether this is the zero value (every field absent or empty)
    pub fn is_empty(&self) -> bool {
        *self == LogEntryAnon::default()
    }

    /// Validate the payload, collecting every field failure.
    ///
    /// All three checks run unconditionally so the caller sees each problem
    /// in one pass. Failures come back as a composite carrying the dotted
    /// field path of every violation.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(err) = self.validate_log_index() {
            errors.push(err);
        }
        if let Err(err) = self.validate_signature() {
            errors.push(err);
        }
        if let Err(err) = self.validate_signed_content_sha256() {
            errors.push(err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CompositeError::new(errors).into())
        }
    }

    /// Hex-decode the content digest into raw bytes.
    ///
    /// Fails with the same errors as validation if the digest is absent or
    /// not a well-formed SHA-256 rendering.
    pub fn digest_bytes(&self) -> Result<[u8; 32]> {
        self.validate_signed_content_sha256()?;
        let Some(digest) = self.signed_content_sha256.as_deref() else {
            return Err(Error::MissingField {
                field: "signedContentSHA256".to_string(),
            });
        };
        let mut out = [0u8; 32];
        hex::decode_to_slice(digest, &mut out).map_err(|_| Error::PatternMismatch {
            field: "signedContentSHA256".to_string(),
            pattern: SHA256_HEX_PATTERN,
            value: digest.to_string(),
        })?;
        Ok(out)
    }

    fn validate_log_index(&self) -> Result<()> {
        let log_index = self.log_index.ok_or_else(|| Error::MissingField {
            field: "logIndex".to_string(),
        })?;
        if log_index < MIN_LOG_INDEX {
            return Err(Error::BelowMinimum {
                field: "logIndex".to_string(),
                minimum: MIN_LOG_INDEX,
                value: log_index,
            });
        }
        Ok(())
    }

    fn validate_signature(&self) -> Result<()> {
        match &self.signature {
            None => Err(Error::MissingField {
                field: "signature".to_string(),
            }),
            // Re-tag nested failures so they read as e.g. signature.content
            Some(signature) => signature.validate().map_err(|err| err.prefixed("signature")),
        }
    }

    fn validate_signed_content_sha256(&self) -> Result<()> {
        let digest = self
            .signed_content_sha256
            .as_deref()
            .ok_or_else(|| Error::MissingField {
                field: "signedContentSHA256".to_string(),
            })?;
        if !SHA256_HEX_RE.is_match(digest) {
            return Err(Error::PatternMismatch {
                field: "signedContentSHA256".to_string(),
                pattern: SHA256_HEX_PATTERN,
                value: digest.to_string(),
            });
        }
        Ok(())
    }
}

/// Signature envelope: signature bytes, public key material, and format tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// The signature bytes, base64 on the wire
    pub content: Option<Base64Data>,
    /// How to interpret the signature and key material
    pub format: Option<SupportedPkiFormat>,
    /// The signer's public key material, base64 on the wire
    pub public_key: Option<Base64Data>,
}

impl Signature {
    /// Create a fully-populated envelope
    pub fn new(format: SupportedPkiFormat, content: Base64Data, public_key: Base64Data) -> Self {
        Signature {
            content: Some(content),
            format: Some(format),
            public_key: Some(public_key),
        }
    }

    /// Validate the envelope, collecting every field failure.
    ///
    /// Presence checks only: base64 well-formedness is [`Base64Data`]'s
    /// concern, and a present `format` is a member of the supported set by
    /// construction.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.content.is_none() {
            errors.push(Error::MissingField {
                field: "content".to_string(),
            });
        }
        if self.format.is_none() {
            errors.push(Error::MissingField {
                field: "format".to_string(),
            });
        }
        if self.public_key.is_none() {
            errors.push(Error::MissingField {
                field: "publicKey".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CompositeError::new(errors).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signature() -> Signature {
        Signature::new(
            SupportedPkiFormat::X509,
            Base64Data::from_bytes(b"A".to_vec()),
            Base64Data::from_bytes(b"B".to_vec()),
        )
    }

    fn valid_entry() -> LogEntryAnon {
        LogEntryAnon {
            extra_data: BTreeMap::new(),
            log_index: Some(1),
            signature: Some(valid_signature()),
            signed_content_sha256: Some("a".repeat(64)),
        }
    }

    #[test]
    fn test_valid_entry_passes() {
        assert!(valid_entry().validate().is_ok());
    }

    #[test]
    fn test_empty_map_passes() {
        assert!(LogEntry::new().validate().is_ok());
    }

    #[test]
    fn test_zero_value_payload_skipped() {
        let mut map = LogEntry::new();
        map.insert("e1", LogEntryAnon::default());
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_map_short_circuits_on_first_failing_key() {
        let mut map = LogEntry::new();
        let mut bad = valid_entry();
        bad.log_index = Some(0);
        map.insert("a-bad", bad);
        map.insert("b-good", valid_entry());

        let err = map.validate().unwrap_err();
        // One composite for the single failing key, not an aggregate of keys
        match err {
            Error::Composite(c) => assert_eq!(c.len(), 1),
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_all_violations_collected() {
        let entry = LogEntryAnon {
            extra_data: BTreeMap::new(),
            log_index: Some(0),
            signature: None,
            signed_content_sha256: Some("short".to_string()),
        };
        let err = entry.validate().unwrap_err();
        match err {
            Error::Composite(c) => {
                let fields: Vec<_> = c.iter().filter_map(Error::field).collect();
                assert_eq!(fields, vec!["logIndex", "signature", "signedContentSHA256"]);
            }
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_signature_failures_get_dotted_paths() {
        let mut entry = valid_entry();
        entry.signature = Some(Signature::default());
        let err = entry.validate().unwrap_err();
        let Error::Composite(c) = err else {
            panic!("expected composite");
        };
        let inner = c.into_errors().into_iter().next().unwrap();
        let Error::Composite(nested) = inner else {
            panic!("expected nested composite for signature");
        };
        let fields: Vec<_> = nested.iter().filter_map(Error::field).collect();
        assert_eq!(
            fields,
            vec!["signature.content", "signature.format", "signature.publicKey"]
        );
    }

    #[test]
    fn test_digest_bytes_decodes_validated_digest() {
        let mut entry = valid_entry();
        entry.signed_content_sha256 =
            Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string());
        let bytes = entry.digest_bytes().unwrap();
        assert_eq!(bytes[0], 0xe3);
        assert_eq!(bytes[31], 0x55);
    }

    #[test]
    fn test_digest_bytes_rejects_missing_digest() {
        let mut entry = valid_entry();
        entry.signed_content_sha256 = None;
        assert!(matches!(
            entry.digest_bytes(),
            Err(Error::MissingField { .. })
        ));
    }
}
