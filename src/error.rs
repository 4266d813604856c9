//! Error types for tlog-entry

use thiserror::Error;

/// Errors that can occur while validating or (de)serializing log entries
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is absent or null
    #[error("{field} in body is required")]
    MissingField {
        /// Dotted path of the field (e.g. `signature.content`)
        field: String,
    },

    /// A numeric field is below its minimum
    #[error("{field} in body should be greater than or equal to {minimum}, got {value}")]
    BelowMinimum {
        /// Dotted path of the field
        field: String,
        /// Smallest accepted value
        minimum: i64,
        /// Value that was supplied
        value: i64,
    },

    /// A string field does not match its required pattern
    #[error("{field} in body should match '{pattern}', got {value:?}")]
    PatternMismatch {
        /// Dotted path of the field
        field: String,
        /// The pattern the field must match
        pattern: &'static str,
        /// Value that was supplied
        value: String,
    },

    /// An enumerated field holds a value outside its closed set
    #[error("{field} in body is not a supported value: {value:?}")]
    InvalidEnumValue {
        /// Dotted path of the field
        field: String,
        /// Value that was supplied
        value: String,
    },

    /// One or more field-level failures from a single validation pass
    #[error(transparent)]
    Composite(#[from] CompositeError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl Error {
    /// Re-tag the error's field path with a parent field name, turning
    /// `content` into e.g. `signature.content`. Recurses into composites so
    /// every underlying failure reports its full dotted path.
    pub fn prefixed(self, prefix: &str) -> Self {
        match self {
            Error::MissingField { field } => Error::MissingField {
                field: format!("{}.{}", prefix, field),
            },
            Error::BelowMinimum {
                field,
                minimum,
                value,
            } => Error::BelowMinimum {
                field: format!("{}.{}", prefix, field),
                minimum,
                value,
            },
            Error::PatternMismatch {
                field,
                pattern,
                value,
            } => Error::PatternMismatch {
                field: format!("{}.{}", prefix, field),
                pattern,
                value,
            },
            Error::InvalidEnumValue { field, value } => Error::InvalidEnumValue {
                field: format!("{}.{}", prefix, field),
                value,
            },
            Error::Composite(composite) => Error::Composite(CompositeError::new(
                composite
                    .into_errors()
                    .into_iter()
                    .map(|e| e.prefixed(prefix))
                    .collect(),
            )),
            other => other,
        }
    }

    /// The dotted field path this error refers to, if it is a field-level
    /// validation failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::MissingField { field }
            | Error::BelowMinimum { field, .. }
            | Error::PatternMismatch { field, .. }
            | Error::InvalidEnumValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// An aggregate of field-level validation failures.
///
/// Object-level validators run every field check and collect all failures
/// into one of these, so a caller sees every problem in a single pass.
#[derive(Debug)]
pub struct CompositeError {
    errors: Vec<Error>,
}

impl CompositeError {
    /// Wrap a list of failures. Callers should only construct this with a
    /// non-empty list; an empty composite displays as a bare count.
    pub fn new(errors: Vec<Error>) -> Self {
        CompositeError { errors }
    }

    /// Iterate over the underlying failures
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    /// Number of underlying failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no underlying failures
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the composite, yielding the underlying failures
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl std::fmt::Display for CompositeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failure list:")?;
        for err in &self.errors {
            write!(f, "\n{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositeError {}

/// Result type for tlog-entry operations
pub type Result<T> = std::result::Result<T, Error>;
