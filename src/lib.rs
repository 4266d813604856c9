//! Transparency log entry model and validation
//!
//! This crate provides the wire model for a single transparency log entry:
//! the record a client submits to, or reads back from, an append-only signed
//! log. It covers the JSON shape and the structural acceptance rules (field
//! presence, index bounds, digest pattern, signature format membership).
//! Transport, persistence, and cryptographic verification live elsewhere.

pub mod encoding;
pub mod entry;
pub mod error;
pub mod pki;

pub use encoding::Base64Data;
pub use entry::{LogEntry, LogEntryAnon, Signature, MIN_LOG_INDEX, SHA256_HEX_PATTERN};
pub use error::{CompositeError, Error, Result};
pub use pki::SupportedPkiFormat;
