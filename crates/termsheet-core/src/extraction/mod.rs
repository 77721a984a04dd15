//! Term sheet field extraction module.

pub mod clean;
pub mod matcher;
pub mod normalize;
mod parser;
pub mod rules;

pub use clean::clean_value;
pub use matcher::FieldMatcher;
pub use normalize::normalize;
pub use parser::TermsheetParser;

use crate::error::ExtractionError;
use crate::models::termsheet::ExtractionResult;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for term sheet field extractors.
pub trait TermsheetExtractor {
    /// Extract fields from raw document text. Never fails; unmatched fields
    /// are simply absent.
    fn extract(&self, raw_text: &str) -> ExtractionResult;

    /// Extract fields, rejecting empty or whitespace-only text first.
    fn parse(&self, raw_text: &str) -> Result<ExtractionResult> {
        if raw_text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(self.extract(raw_text))
    }
}
