//! Applies a rule set to normalized text.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::models::config::CandidatePolicy;
use crate::models::termsheet::TargetField;

use super::rules::patterns::PERCENTAGE;
use super::rules::{ExtractionMatch, FieldExtractor, FieldRule, RuleSet};

/// Matches every rule of a rule set against one text.
#[derive(Debug, Clone, Default)]
pub struct FieldMatcher {
    rules: RuleSet,
}

impl FieldMatcher {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Extract every field that matches with an acceptable value.
    ///
    /// Fields without a match are absent from the map; this never fails.
    pub fn extract_fields(&self, text: &str) -> BTreeMap<TargetField, String> {
        let mut fields = BTreeMap::new();

        for rule in self.rules.rules() {
            match self.match_rule(rule, text) {
                Some(found) => {
                    debug!("Matched {} = {:?}", rule.field(), found.value);
                    fields.insert(rule.field(), found.value);
                }
                None => trace!("No match for {}", rule.field()),
            }
        }

        fields
    }

    /// Pick a value for one rule according to the rule set's policy.
    pub fn match_rule(&self, rule: &FieldRule, text: &str) -> Option<ExtractionMatch<String>> {
        match self.rules.policy() {
            CandidatePolicy::FirstAcceptable => rule.extract(text),
            CandidatePolicy::BestScore => rule
                .extract_all(text)
                .into_iter()
                .filter(|found| rule.accepts(&found.value))
                .max_by_key(score),
        }
    }
}

/// Percentage-bearing values first, then shorter values, then higher
/// priority candidates.
fn score(found: &ExtractionMatch<String>) -> (bool, Reverse<usize>, Reverse<usize>) {
    (
        PERCENTAGE.is_match(&found.value),
        Reverse(found.value.chars().count()),
        Reverse(found.priority),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize::normalize;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> BTreeMap<TargetField, String> {
        FieldMatcher::default().extract_fields(&normalize(text))
    }

    #[test]
    fn test_parties() {
        let fields = extract("Party A: Acme Bank Party B: Beta Corp");

        let mut expected = BTreeMap::new();
        expected.insert(TargetField::PartyA, "Acme Bank".to_string());
        expected.insert(TargetField::PartyB, "Beta Corp".to_string());
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_full_term_sheet() {
        let text = r#"
            Party A: Acme Bank plc
            Party B: Beta Capital Ltd
            Trade Date: 3 March 2025
            Initial Valuation Date: 10 March 2025
            Effective Date: 12 March 2025
            Notional Amount (N): EUR 5,000,000
            Upfront Payment: 1.25%
            Valuation Date: 10 March 2026
            Termination Date: 17 March 2026
            Underlying: EURO STOXX 50 (SX5E)
            Exchange: Eurex
            Coupon (C): 7.50% p.a.
            Barrier (B): 65% of the Initial Level
            Interest Payment Dates: quarterly
            Business Day: TARGET2, Modified Following
            Future Obligations: none
        "#;

        let fields = extract(text);

        assert_eq!(fields.len(), 10);
        assert_eq!(fields[&TargetField::PartyA], "Acme Bank plc");
        assert_eq!(fields[&TargetField::PartyB], "Beta Capital Ltd");
        assert_eq!(fields[&TargetField::InitialValuationDate], "10 March 2025");
        assert_eq!(fields[&TargetField::NotionalAmount], "EUR 5,000,000");
        assert_eq!(fields[&TargetField::ValuationDate], "10 March 2026");
        assert_eq!(fields[&TargetField::TerminationDate], "17 March 2026");
        assert_eq!(fields[&TargetField::Underlying], "EURO STOXX 50 (SX5E)");
        assert_eq!(fields[&TargetField::Coupon], "7.50% p.a.");
        assert_eq!(fields[&TargetField::Barrier], "65% of the Initial Level");
        assert_eq!(fields[&TargetField::BusinessDay], "TARGET2, Modified Following");
    }

    #[test]
    fn test_initial_valuation_date_does_not_fire_valuation_date() {
        let fields = extract("Initial Valuation Date: 10 March 2025 Effective Date: 12 March 2025");

        assert_eq!(fields[&TargetField::InitialValuationDate], "10 March 2025");
        assert!(!fields.contains_key(&TargetField::ValuationDate));
    }

    #[test]
    fn test_notional_tbd() {
        let fields = extract("Notional Amount (N): ***TBD*** Valuation Date: ...");
        assert_eq!(fields[&TargetField::NotionalAmount], "TBD");
    }

    #[test]
    fn test_barrier_first_candidate() {
        let fields = extract("Barrier (B): 70% Interest accrues daily");
        assert_eq!(fields[&TargetField::Barrier], "70%");
    }

    #[test]
    fn test_barrier_free_text_candidate() {
        let fields = extract("Barrier (B): see Annex Interest accrues daily");
        assert_eq!(fields[&TargetField::Barrier], "see Annex");
    }

    #[test]
    fn test_barrier_without_code() {
        let fields = extract("Barrier: 62.5% Interest accrues daily");
        assert_eq!(fields[&TargetField::Barrier], "62.5%");
    }

    #[test]
    fn test_barrier_falls_through_long_candidates() {
        let long_tail = "of the initial level observed on each scheduled trading day until maturity";
        let text = format!("Barrier (B): 70% {long_tail} and later Barrier: 60% Interest");

        let fields = extract(&text);

        assert_eq!(fields[&TargetField::Barrier], "60%");
    }

    #[test]
    fn test_barrier_absent_when_every_candidate_is_long() {
        let text = "Barrier (B): 70% of the initial level observed on each scheduled trading day";

        let fields = extract(text);

        assert!(!fields.contains_key(&TargetField::Barrier));
    }

    #[test]
    fn test_no_labels() {
        assert!(extract("This confirmation has no recognizable terms.").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_best_score_prefers_percentage() {
        let rules = RuleSet::standard().with_policy(CandidatePolicy::BestScore);
        let matcher = FieldMatcher::new(rules);
        let rule = matcher.rules().rule(TargetField::Barrier).unwrap().clone();

        // The free candidate matches first in the text, the percentage
        // candidate only later.
        let text = "Barrier (B): see Annex Interest. Barrier: 60% Interest";

        assert_eq!(rule.extract(text).unwrap().value, "see Annex");
        let best = matcher.match_rule(&rule, text).unwrap();
        assert_eq!(best.value, "60%");
        assert_eq!(best.priority, 2);
    }

    #[test]
    fn test_best_score_respects_length_limit() {
        let rules = RuleSet::standard().with_policy(CandidatePolicy::BestScore);
        let matcher = FieldMatcher::new(rules);

        let text = "Barrier (B): 70% of the initial level observed on each scheduled trading day";

        assert!(!matcher.extract_fields(text).contains_key(&TargetField::Barrier));
    }
}
