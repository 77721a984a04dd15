//! Term sheet parser: normalization, rule matching and result assembly.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::termsheet::ExtractionResult;

use super::matcher::FieldMatcher;
use super::normalize::normalize;
use super::rules::{scan_market_terms, RuleSet};
use super::TermsheetExtractor;

/// Rule-based term sheet parser.
#[derive(Debug, Clone, Default)]
pub struct TermsheetParser {
    matcher: FieldMatcher,
    /// Whether to scan for format-based market terms.
    market_terms: bool,
}

impl TermsheetParser {
    /// Create a parser with the standard rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_rules(RuleSet::from_config(config))
            .with_market_terms(config.market_terms)
    }

    /// Use a custom rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.matcher = FieldMatcher::new(rules);
        self
    }

    /// Enable market term scanning.
    pub fn with_market_terms(mut self, enabled: bool) -> Self {
        self.market_terms = enabled;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        self.matcher.rules()
    }
}

impl TermsheetExtractor for TermsheetParser {
    fn extract(&self, raw_text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Extracting term sheet fields from {} characters of text", raw_text.len());

        let text = normalize(raw_text);
        let fields = self.matcher.extract_fields(&text);
        let mut result = ExtractionResult::new(fields, self.rules().fields());

        if self.market_terms {
            result = result.with_market_terms(scan_market_terms(&text));
        }

        debug!(
            "Matched {}/{} fields in {:?}",
            result.entities_found,
            result.target_entities.len(),
            start.elapsed()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::models::termsheet::TargetField;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counterparties() {
        let result = TermsheetParser::new().extract("Party A: Acme Bank Party B: Beta Corp");

        assert_eq!(result.entities_found, 2);
        assert_eq!(result.get(TargetField::PartyA), Some("Acme Bank"));
        assert_eq!(result.get(TargetField::PartyB), Some("Beta Corp"));
    }

    #[test]
    fn test_notional_tbd() {
        let result = TermsheetParser::new().extract("Notional Amount (N): ***TBD*** Valuation Date: ...");
        assert_eq!(result.get(TargetField::NotionalAmount), Some("TBD"));
    }

    #[test]
    fn test_no_labels_keeps_vocabulary() {
        let result = TermsheetParser::new().extract("Lorem ipsum dolor sit amet.");

        assert!(result.is_empty());
        assert_eq!(result.entities_found, 0);
        assert_eq!(result.target_entities, TargetField::ALL.to_vec());
        assert_eq!(result.missing_fields().len(), 10);
        assert!(result.market_terms.is_none());
    }

    #[test]
    fn test_barrier() {
        let result = TermsheetParser::new().extract("Barrier (B): 70% Interest accrues...");
        assert_eq!(result.get(TargetField::Barrier), Some("70%"));
        assert_eq!(result.entities_found, 1);
    }

    #[test]
    fn test_multiline_table_cells() {
        let raw = "Party A\nAcme Bank\nParty B\nBeta Corp\nTrade Date\n1 May 2025\n";

        let result = TermsheetParser::new().extract(raw);

        assert_eq!(result.get(TargetField::PartyA), Some("Acme Bank"));
        assert_eq!(result.get(TargetField::PartyB), Some("Beta Corp"));
    }

    #[test]
    fn test_parse_rejects_blank_text() {
        let err = TermsheetParser::new().parse(" \n\t ").unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));

        let result = TermsheetParser::new().parse("nothing to see").unwrap();
        assert_eq!(result.entities_found, 0);
    }

    #[test]
    fn test_market_terms_enabled() {
        let config = ExtractionConfig {
            market_terms: true,
            ..ExtractionConfig::default()
        };

        let result = TermsheetParser::from_config(&config)
            .extract("Party A: Acme Bank. Sell 25 mio 5Y paid annual");

        assert_eq!(result.get(TargetField::PartyA), Some("Acme Bank. Sell 25 mio 5Y paid annual"));

        let terms = result.market_terms.as_ref().unwrap();
        assert_eq!(terms.notional_size.as_deref(), Some("25 mio"));
        assert_eq!(terms.maturity.as_deref(), Some("5Y"));
        assert_eq!(terms.payment_frequency.as_deref(), Some("Annual"));
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let parser = std::sync::Arc::new(TermsheetParser::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = parser.clone();
                std::thread::spawn(move || {
                    parser
                        .extract(&format!("Party A: Bank {i} Party B: Fund {i}"))
                        .get(TargetField::PartyA)
                        .map(str::to_string)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(format!("Bank {i}")));
        }
    }
}
