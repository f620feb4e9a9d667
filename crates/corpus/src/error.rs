//! Corpus Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Absence of data (unknown slugs, the end of the corpus)
//! is never an error: queries return empty slices or `None` instead.

use derive_more::{Display, Error};

/// A corpus error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The raw corpus could not be decoded into verse records.
    #[display("malformed corpus input: {_0}")]
    MalformedInput(#[error(not(source))] String),
    /// A verse record lacks a value the index is keyed on.
    #[display("record {record} is missing required field: {field}")]
    MissingField {
        /// Zero-based position of the offending record in the input.
        record: usize,
        /// Dotted path of the missing field.
        field: &'static str,
    },
    /// The requested book/chapter pair is not part of the current index.
    ///
    /// Signals that the caller is out of sync with the corpus, not that
    /// data is missing.
    #[display("position not present in the corpus: {book}/{chapter}")]
    InvalidPosition {
        /// Requested book slug.
        book: String,
        /// Requested chapter slug.
        chapter: String,
    },
    /// A value was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// Details about the parsing failure.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Ingestion and navigation are pure in-memory computations, the same
        // input always produces the same error.
        false
    }

    /// Returns `true` for errors caused by the ingested data rather than
    /// by the caller.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_) | Self::MissingField { .. })
    }
}
