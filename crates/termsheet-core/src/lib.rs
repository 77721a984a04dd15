//! Core library for financial term sheet field extraction.
//!
//! This crate provides:
//! - Document loading (DOCX and plain text) into one raw text blob
//! - Text normalization and value cleaning
//! - A declarative rule table with terminator-bounded captures and a
//!   candidate chain for the barrier field
//! - Result assembly with the full target-field vocabulary

pub mod document;
pub mod error;
pub mod extraction;
pub mod models;

pub use document::{load_document, DocumentKind, DocumentLoader, DocxLoader, PlainTextLoader};
pub use error::{DocumentError, ExtractionError, Result, TermsheetError};
pub use extraction::{
    clean_value, normalize, FieldMatcher, TermsheetExtractor, TermsheetParser,
};
pub use extraction::rules::{Capture, FieldRule, RuleSet};
pub use models::config::{CandidatePolicy, TermsheetConfig};
pub use models::termsheet::{ExtractionResult, MarketTerms, TargetField, TBD};

use std::path::Path;

/// Load a document and extract its term sheet fields.
///
/// Loading failures and blank documents are reported as errors; unmatched
/// fields are not.
pub fn extract_file(path: &Path, config: &TermsheetConfig) -> Result<ExtractionResult> {
    let text = load_document(path, &config.document)?;
    let parser = TermsheetParser::from_config(&config.extraction);
    Ok(parser.parse(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deal.txt");
        std::fs::write(&path, "Party A: Acme Bank\nParty B: Beta Corp\n").unwrap();

        let result = extract_file(&path, &TermsheetConfig::default()).unwrap();

        assert_eq!(result.entities_found, 2);
        assert_eq!(result.missing_fields().len(), 8);
    }

    #[test]
    fn test_extract_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "\n\n   \n").unwrap();

        let err = extract_file(&path, &TermsheetConfig::default()).unwrap_err();

        assert!(matches!(err, TermsheetError::Extraction(ExtractionError::NoText)));
    }

    #[test]
    fn test_extract_missing_file() {
        let err = extract_file(Path::new("/nonexistent/deal.txt"), &TermsheetConfig::default())
            .unwrap_err();

        assert!(matches!(err, TermsheetError::Document(DocumentError::NotFound(_))));
    }
}
