//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for termsheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermsheetConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Document loading configuration.
    pub document: DocumentConfig,

    /// Result output configuration.
    pub output: OutputConfig,
}

/// How a rule with several candidate patterns picks its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
    /// Candidates are tried in priority order; the first acceptable one wins.
    #[default]
    FirstAcceptable,

    /// Every acceptable candidate is scored and the best one wins.
    BestScore,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Barrier values must be strictly shorter than this many characters.
    pub barrier_max_len: usize,

    /// Selection policy for multi-candidate rules.
    pub candidate_policy: CandidatePolicy,

    /// Also scan for format-based market terms (ISIN, tenor, ...).
    pub market_terms: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            barrier_max_len: 50,
            candidate_policy: CandidatePolicy::FirstAcceptable,
            market_terms: false,
        }
    }
}

/// Document loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Extensions loaded as DOCX containers.
    pub docx_extensions: Vec<String>,

    /// Extensions accepted in batch mode; plain text is assumed for
    /// anything that is not DOCX.
    pub text_extensions: Vec<String>,

    /// Include table cell text after the paragraph it follows.
    pub include_tables: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            docx_extensions: vec!["docx".to_string()],
            text_extensions: vec!["txt".to_string(), "text".to_string(), "md".to_string()],
            include_tables: true,
        }
    }
}

impl DocumentConfig {
    /// Whether a file extension is handled as DOCX.
    pub fn is_docx(&self, extension: &str) -> bool {
        self.docx_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Whether a file extension is a known input format.
    pub fn is_supported(&self, extension: &str) -> bool {
        self.is_docx(extension)
            || self
                .text_extensions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Result output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name used when results are saved without an explicit path.
    pub default_file: String,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_file: "ner_results.json".to_string(),
            pretty: true,
        }
    }
}

impl TermsheetConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: TermsheetConfig =
            serde_json::from_str(r#"{"extraction": {"candidate_policy": "best_score"}}"#).unwrap();

        assert_eq!(config.extraction.candidate_policy, CandidatePolicy::BestScore);
        assert_eq!(config.extraction.barrier_max_len, 50);
        assert!(!config.extraction.market_terms);
        assert_eq!(config.output.default_file, "ner_results.json");
    }

    #[test]
    fn test_extension_checks() {
        let config = DocumentConfig::default();

        assert!(config.is_docx("DOCX"));
        assert!(!config.is_docx("txt"));
        assert!(config.is_supported("md"));
        assert!(!config.is_supported("pdf"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TermsheetConfig::default();
        config.extraction.market_terms = true;
        config.save(&path).unwrap();

        let loaded = TermsheetConfig::from_file(&path).unwrap();
        assert!(loaded.extraction.market_terms);
    }
}
