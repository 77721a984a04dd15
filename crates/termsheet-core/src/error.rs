//! Error types for the termsheet-core library.

use thiserror::Error;

/// Main error type for the termsheet library.
#[derive(Error, Debug)]
pub enum TermsheetError {
    /// Document loading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a source document into raw text.
///
/// All of these mean the input was unavailable; the extraction engine is
/// never invoked when one of them occurs.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The source file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// The source file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The DOCX container could not be parsed.
    #[error("failed to parse DOCX: {0}")]
    Docx(String),

    /// The plain text file is not valid UTF-8.
    #[error("invalid text encoding in {0}")]
    Encoding(String),
}

/// Errors related to field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The loader produced empty or whitespace-only text.
    #[error("no extractable text in document")]
    NoText,

    /// A rule could not be compiled.
    #[error("invalid rule for {field}: {reason}")]
    InvalidRule { field: String, reason: String },
}

/// Result type for the termsheet library.
pub type Result<T> = std::result::Result<T, TermsheetError>;
