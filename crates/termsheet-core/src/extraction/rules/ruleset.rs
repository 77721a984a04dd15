//! Rule sets and the standard term sheet rule table.

use lazy_static::lazy_static;

use crate::error::ExtractionError;
use crate::extraction::Result;
use crate::models::config::{CandidatePolicy, ExtractionConfig};
use crate::models::termsheet::TargetField;

use super::field::{Capture, FieldRule};

/// Default barrier length limit, in characters.
pub const BARRIER_MAX_LEN: usize = 50;

lazy_static! {
    static ref STANDARD: RuleSet = standard_rules()
        .and_then(RuleSet::new)
        .expect("standard rule table compiles");
}

/// An ordered set of field rules and the policy used to pick among a
/// rule's candidates.
///
/// Rule sets are immutable once built and can be shared between threads.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
    policy: CandidatePolicy,
}

impl RuleSet {
    /// Build a rule set; each field may have at most one rule.
    pub fn new(rules: Vec<FieldRule>) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.field() == rule.field()) {
                return Err(ExtractionError::InvalidRule {
                    field: rule.field().label().to_string(),
                    reason: "duplicate rule".to_string(),
                });
            }
            if rule.candidates().is_empty() {
                return Err(ExtractionError::InvalidRule {
                    field: rule.field().label().to_string(),
                    reason: "rule has no candidate patterns".to_string(),
                });
            }
        }

        Ok(Self {
            rules,
            policy: CandidatePolicy::default(),
        })
    }

    /// The standard term sheet rule table.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// The standard table adjusted by extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::standard()
            .with_policy(config.candidate_policy)
            .with_max_len(TargetField::Barrier, Some(config.barrier_max_len))
    }

    /// Set the candidate selection policy.
    pub fn with_policy(mut self, policy: CandidatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Change the length limit of one field's rule.
    pub fn with_max_len(mut self, field: TargetField, max_len: Option<usize>) -> Self {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.field() == field) {
            rule.set_max_len(max_len);
        }
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn policy(&self) -> CandidatePolicy {
        self.policy
    }

    pub fn rule(&self, field: TargetField) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field() == field)
    }

    /// Fields covered by this rule set, in declaration order.
    pub fn fields(&self) -> Vec<TargetField> {
        self.rules.iter().map(FieldRule::field).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// The standard rule table.
///
/// Terminators name the labels that usually follow each field in a term
/// sheet laid out top to bottom.
fn standard_rules() -> Result<Vec<FieldRule>> {
    Ok(vec![
        FieldRule::new(TargetField::PartyA, &["Party B", "Trade Date"])?
            .candidate(r"Party A[:\s]+", Capture::Free)?,
        FieldRule::new(TargetField::PartyB, &["Trade Date", "Initial"])?
            .candidate(r"Party B[:\s]+", Capture::Free)?,
        FieldRule::new(TargetField::InitialValuationDate, &["Effective", "Notional"])?
            .candidate(r"Initial Valuation\s+Date[:\s]+", Capture::Free)?,
        FieldRule::new(TargetField::NotionalAmount, &["Upfront", "Valuation"])?
            .candidate(r"Notional Amount[:\s]*(?:\(N\))?[:\s]*", Capture::Free)?,
        FieldRule::new(TargetField::ValuationDate, &["Termination", "Underlying"])?
            .candidate_not_after(r"Valuation Date[:\s]+", Capture::Free, "Initial")?,
        FieldRule::new(TargetField::TerminationDate, &["Underlying", "Exchange"])?
            .candidate(r"Termination Date[:\s]+", Capture::Free)?,
        FieldRule::new(TargetField::Underlying, &["Exchange", "Coupon"])?
            .candidate(r"Underlying[:\s]+", Capture::Free)?,
        FieldRule::new(TargetField::Coupon, &["Barrier", "Interest"])?
            .candidate(r"Coupon[:\s]*(?:\(C\))?[:\s]*", Capture::Free)?,
        // The label's punctuation varies between documents, so the barrier
        // has a chain of shapes, most specific first.
        FieldRule::new(TargetField::Barrier, &["Interest", "##"])?
            .candidate(r"Barrier[:\s]*\(B\)[:\s]*", Capture::PercentLed)?
            .candidate(r"Barrier[:\s]*\(B\)[:\s]*", Capture::Free)?
            .candidate(r"Barrier[:\s]+", Capture::PercentLed)?
            .max_len(BARRIER_MAX_LEN),
        FieldRule::new(TargetField::BusinessDay, &["Future", "Calculation"])?
            .candidate(r"Business Day[:\s]+", Capture::Free)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_covers_vocabulary() {
        assert_eq!(RuleSet::standard().fields(), TargetField::ALL.to_vec());
    }

    #[test]
    fn test_standard_terminators() {
        let rules = RuleSet::standard();

        assert_eq!(
            rules.rule(TargetField::PartyA).unwrap().terminators(),
            ["Party B".to_string(), "Trade Date".to_string()]
        );
        assert_eq!(rules.rule(TargetField::Barrier).unwrap().candidates().len(), 3);
        assert_eq!(rules.rule(TargetField::Barrier).unwrap().max_value_len(), Some(50));
        assert_eq!(rules.rule(TargetField::Underlying).unwrap().max_value_len(), None);
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            barrier_max_len: 10,
            candidate_policy: CandidatePolicy::BestScore,
            market_terms: false,
        };

        let rules = RuleSet::from_config(&config);

        assert_eq!(rules.policy(), CandidatePolicy::BestScore);
        assert_eq!(rules.rule(TargetField::Barrier).unwrap().max_value_len(), Some(10));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let rule = || {
            FieldRule::new(TargetField::PartyA, &[])
                .unwrap()
                .candidate(r"Counterparty[:\s]+", Capture::Free)
                .unwrap()
        };

        assert!(RuleSet::new(vec![rule(), rule()]).is_err());
        assert!(RuleSet::new(vec![rule()]).is_ok());
    }

    #[test]
    fn test_rule_without_candidates_rejected() {
        let rule = FieldRule::new(TargetField::Underlying, &["Coupon"]).unwrap();
        assert!(RuleSet::new(vec![rule]).is_err());
    }
}
