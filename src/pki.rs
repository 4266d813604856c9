//! Supported PKI signature formats
//!
//! The format tag on a signature envelope identifies how the signature and
//! public key bytes should be interpreted. The set is closed: unknown values
//! are rejected when parsed rather than carried around as open strings.

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Supported PKI signature formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedPkiFormat {
    /// OpenPGP signature
    Pgp,
    /// Minisign signature
    Minisign,
    /// X.509 signature
    X509,
    /// SSH signature
    Ssh,
    /// TUF metadata
    Tuf,
}

impl SupportedPkiFormat {
    /// All members of the closed set, in wire order
    pub fn variants() -> &'static [SupportedPkiFormat] {
        &[
            SupportedPkiFormat::Pgp,
            SupportedPkiFormat::Minisign,
            SupportedPkiFormat::X509,
            SupportedPkiFormat::Ssh,
            SupportedPkiFormat::Tuf,
        ]
    }

    /// Get the wire string for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedPkiFormat::Pgp => "pgp",
            SupportedPkiFormat::Minisign => "minisign",
            SupportedPkiFormat::X509 => "x509",
            SupportedPkiFormat::Ssh => "ssh",
            SupportedPkiFormat::Tuf => "tuf",
        }
    }
}

impl FromStr for SupportedPkiFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "pgp" => Ok(SupportedPkiFormat::Pgp),
            "minisign" => Ok(SupportedPkiFormat::Minisign),
            "x509" => Ok(SupportedPkiFormat::X509),
            "ssh" => Ok(SupportedPkiFormat::Ssh),
            "tuf" => Ok(SupportedPkiFormat::Tuf),
            other => Err(Error::InvalidEnumValue {
                field: "format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SupportedPkiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SupportedPkiFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SupportedPkiFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
