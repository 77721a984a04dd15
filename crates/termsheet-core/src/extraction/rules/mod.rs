//! Rule-based field extractors for term sheets.

pub mod field;
pub mod market;
pub mod patterns;
pub mod ruleset;

pub use field::{CandidatePattern, Capture, FieldRule};
pub use market::scan_market_terms;
pub use ruleset::RuleSet;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidate values for the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the candidate pattern that produced it (0 = highest priority).
    pub priority: usize,
    /// Byte range of the raw capture in the source text.
    pub position: Option<(usize, usize)>,
    /// Raw captured text, before cleaning.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, priority: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            priority,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
