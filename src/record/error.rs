//! Error types for record operations.
//!
//! Almost every record operation is total: reading an undeclared key yields
//! `None` and writing one is a no-op. The fallible variants (`try_set`,
//! `wrap`) report those situations explicitly instead.

/// Errors reported by the fallible record operations.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::{RecordError, RecordFamily};
///
/// let family = RecordFamily::new([("a", 1)]);
/// let record = family.empty();
///
/// assert_eq!(record.try_set("b", 2).unwrap_err(), RecordError::UndeclaredKey);
/// assert_eq!(
///     format!("{}", RecordError::UndeclaredKey),
///     "key is not declared by the record schema"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordError {
    /// The key is not part of the record's schema.
    UndeclaredKey,
    /// The record was produced by a family with a different schema.
    ForeignSchema {
        /// The name of the family that rejected the record.
        family: &'static str,
    },
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredKey => write!(formatter, "key is not declared by the record schema"),
            Self::ForeignSchema { family } => write!(
                formatter,
                "{family}::wrap: record belongs to a different schema"
            ),
        }
    }
}

impl std::error::Error for RecordError {}
