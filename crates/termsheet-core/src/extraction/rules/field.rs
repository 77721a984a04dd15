//! Per-field rules: candidate anchors and terminator-bounded capture regions.

use regex::Regex;
use tracing::trace;

use crate::error::ExtractionError;
use crate::extraction::clean::clean_value;
use crate::extraction::Result;
use crate::models::termsheet::TargetField;

use super::{ExtractionMatch, FieldExtractor};

/// Shape of the value captured after an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Any run of at least one non-line-break character.
    Free,
    /// A percentage such as `70%` or `62.5%`, followed by anything.
    PercentLed,
}

const PERCENT_LEAD: &str = r"(?P<lead>[0-9]+\.?[0-9]*%)";

/// One way of locating a field: an anchor regex and a capture shape.
#[derive(Debug, Clone)]
pub struct CandidatePattern {
    anchor: Regex,
    /// Word that must not directly precede the anchor (one whitespace apart).
    excluded_prefix: Option<String>,
}

impl CandidatePattern {
    fn new(anchor: &str, capture: Capture) -> std::result::Result<Self, regex::Error> {
        let pattern = match capture {
            Capture::Free => format!("(?i){anchor}"),
            Capture::PercentLed => format!("(?i){anchor}{PERCENT_LEAD}"),
        };

        Ok(Self {
            anchor: Regex::new(&pattern)?,
            excluded_prefix: None,
        })
    }

    /// Locate the first occurrence of this candidate.
    ///
    /// Returns the byte offset and the raw captured text. The capture ends at
    /// the earliest terminator, line break or end of text.
    pub fn find<'t>(&self, text: &'t str, boundary: Option<&Regex>) -> Option<(usize, &'t str)> {
        for caps in self.anchor.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if self.is_excluded(text, whole.start()) {
                continue;
            }

            let (start, min_end) = match caps.name("lead") {
                Some(lead) => (lead.start(), lead.end()),
                None => {
                    let start = whole.end();
                    match text[start..].chars().next() {
                        Some(c) if !is_line_break(c) => (start, start + c.len_utf8()),
                        _ => continue,
                    }
                }
            };

            let end = region_end(text, min_end, boundary);
            return Some((start, &text[start..end]));
        }

        None
    }

    fn is_excluded(&self, text: &str, start: usize) -> bool {
        let Some(prefix) = &self.excluded_prefix else {
            return false;
        };

        let mut before = text[..start].chars();
        match before.next_back() {
            Some(c) if c.is_whitespace() => {}
            _ => return false,
        }

        let before = before.as_str();
        before.len() >= prefix.len()
            && before.is_char_boundary(before.len() - prefix.len())
            && before[before.len() - prefix.len()..].eq_ignore_ascii_case(prefix)
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// End of the shortest capture region starting no earlier than `from`.
fn region_end(text: &str, from: usize, boundary: Option<&Regex>) -> usize {
    let line_end = text[from..]
        .find(is_line_break)
        .map_or(text.len(), |i| from + i);

    boundary
        .and_then(|re| re.find_at(text, from))
        .map_or(line_end, |m| m.start().min(line_end))
}

/// Extraction rule for one target field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: TargetField,
    candidates: Vec<CandidatePattern>,
    /// Labels expected to follow this field.
    terminators: Vec<String>,
    boundary: Option<Regex>,
    /// Accepted values are strictly shorter than this many characters.
    max_len: Option<usize>,
}

impl FieldRule {
    /// Create a rule whose values end where one of `terminators` begins.
    pub fn new(field: TargetField, terminators: &[&str]) -> Result<Self> {
        let terminators: Vec<String> = terminators.iter().map(|t| t.to_string()).collect();

        let boundary = if terminators.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = terminators.iter().map(|t| regex::escape(t)).collect();
            let pattern = format!(r"(?i)\s+(?:{})", alternatives.join("|"));
            Some(Regex::new(&pattern).map_err(|e| invalid(field, e))?)
        };

        Ok(Self {
            field,
            candidates: Vec::new(),
            terminators,
            boundary,
            max_len: None,
        })
    }

    /// Append a candidate; candidates are tried in insertion order.
    pub fn candidate(mut self, anchor: &str, capture: Capture) -> Result<Self> {
        let candidate = CandidatePattern::new(anchor, capture).map_err(|e| invalid(self.field, e))?;
        self.candidates.push(candidate);
        Ok(self)
    }

    /// Append a candidate that is skipped when `prefix` and one whitespace
    /// character directly precede the anchor.
    pub fn candidate_not_after(mut self, anchor: &str, capture: Capture, prefix: &str) -> Result<Self> {
        let mut candidate = CandidatePattern::new(anchor, capture).map_err(|e| invalid(self.field, e))?;
        candidate.excluded_prefix = Some(prefix.to_string());
        self.candidates.push(candidate);
        Ok(self)
    }

    /// Set the maximum accepted value length.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn field(&self) -> TargetField {
        self.field
    }

    pub fn candidates(&self) -> &[CandidatePattern] {
        &self.candidates
    }

    pub fn terminators(&self) -> &[String] {
        &self.terminators
    }

    pub fn max_value_len(&self) -> Option<usize> {
        self.max_len
    }

    pub(crate) fn set_max_len(&mut self, max_len: Option<usize>) {
        self.max_len = max_len;
    }

    /// Whether a cleaned value is acceptable for this field.
    pub fn accepts(&self, value: &str) -> bool {
        !value.is_empty() && self.max_len.is_none_or(|max| value.chars().count() < max)
    }

    fn match_candidate(&self, priority: usize, text: &str) -> Option<ExtractionMatch<String>> {
        let candidate = self.candidates.get(priority)?;
        let (start, raw) = candidate.find(text, self.boundary.as_ref())?;

        Some(
            ExtractionMatch::new(clean_value(raw), priority, raw)
                .with_position(start, start + raw.len()),
        )
    }
}

fn invalid(field: TargetField, err: regex::Error) -> ExtractionError {
    ExtractionError::InvalidRule {
        field: field.label().to_string(),
        reason: err.to_string(),
    }
}

impl FieldExtractor for FieldRule {
    type Output = ExtractionMatch<String>;

    /// First candidate, in priority order, whose value is acceptable.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        for priority in 0..self.candidates.len() {
            let Some(found) = self.match_candidate(priority, text) else {
                continue;
            };

            if self.accepts(&found.value) {
                return Some(found);
            }

            trace!(
                "Rejected {} candidate {}: {:?}",
                self.field,
                priority,
                found.value
            );
        }

        None
    }

    /// First occurrence of every candidate with a non-empty value, whether
    /// or not it passes the length limit.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        (0..self.candidates.len())
            .filter_map(|priority| self.match_candidate(priority, text))
            .filter(|found| !found.value.is_empty())
            .collect()
    }
}
