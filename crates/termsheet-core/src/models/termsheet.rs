//! Term sheet data models: the field vocabulary and extraction results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A known term sheet field.
///
/// The set is closed: the engine never reports a field outside of it.
/// Variants are ordered by declaration, which is also the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetField {
    #[serde(rename = "Party A")]
    PartyA,

    #[serde(rename = "Party B")]
    PartyB,

    #[serde(rename = "Initial Valuation Date")]
    InitialValuationDate,

    #[serde(rename = "Notional Amount")]
    NotionalAmount,

    #[serde(rename = "Valuation Date")]
    ValuationDate,

    #[serde(rename = "Termination Date")]
    TerminationDate,

    #[serde(rename = "Underlying")]
    Underlying,

    #[serde(rename = "Coupon (C)")]
    Coupon,

    #[serde(rename = "Barrier (B)")]
    Barrier,

    #[serde(rename = "Business Day")]
    BusinessDay,
}

impl TargetField {
    /// Every field, in declaration order.
    pub const ALL: [TargetField; 10] = [
        TargetField::PartyA,
        TargetField::PartyB,
        TargetField::InitialValuationDate,
        TargetField::NotionalAmount,
        TargetField::ValuationDate,
        TargetField::TerminationDate,
        TargetField::Underlying,
        TargetField::Coupon,
        TargetField::Barrier,
        TargetField::BusinessDay,
    ];

    /// The verbatim field label used in results.
    pub fn label(&self) -> &'static str {
        match self {
            TargetField::PartyA => "Party A",
            TargetField::PartyB => "Party B",
            TargetField::InitialValuationDate => "Initial Valuation Date",
            TargetField::NotionalAmount => "Notional Amount",
            TargetField::ValuationDate => "Valuation Date",
            TargetField::TerminationDate => "Termination Date",
            TargetField::Underlying => "Underlying",
            TargetField::Coupon => "Coupon (C)",
            TargetField::Barrier => "Barrier (B)",
            TargetField::BusinessDay => "Business Day",
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sentinel for a term the document explicitly marks as undetermined.
pub const TBD: &str = "TBD";

/// Result of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Matched fields and their cleaned values.
    pub extracted_entities: BTreeMap<TargetField, String>,

    /// Number of matched fields.
    pub entities_found: usize,

    /// Every field the rule set looks for, matched or not.
    pub target_entities: Vec<TargetField>,

    /// Format-based market terms, when scanning is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_terms: Option<MarketTerms>,
}

impl ExtractionResult {
    /// Build a result from the matched fields and the rule set vocabulary.
    pub fn new(extracted_entities: BTreeMap<TargetField, String>, target_entities: Vec<TargetField>) -> Self {
        Self {
            entities_found: extracted_entities.len(),
            extracted_entities,
            target_entities,
            market_terms: None,
        }
    }

    /// Attach scanned market terms.
    pub fn with_market_terms(mut self, terms: MarketTerms) -> Self {
        self.market_terms = Some(terms);
        self
    }

    /// Value of a matched field.
    pub fn get(&self, field: TargetField) -> Option<&str> {
        self.extracted_entities.get(&field).map(String::as_str)
    }

    /// Target fields that were not matched, in vocabulary order.
    pub fn missing_fields(&self) -> Vec<TargetField> {
        self.target_entities
            .iter()
            .copied()
            .filter(|field| !self.extracted_entities.contains_key(field))
            .collect()
    }

    /// Whether nothing was matched.
    pub fn is_empty(&self) -> bool {
        self.extracted_entities.is_empty()
    }
}

/// Market terms recognised by their format rather than by a field label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTerms {
    /// Notional size such as "50 mio" or "1bn".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notional_size: Option<String>,

    /// ISIN code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,

    /// Tenor such as "5Y" or "18 M".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,

    /// Spread bid over ESTR, e.g. "estr+45bps".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<String>,

    /// Payment frequency, capitalised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_frequency: Option<String>,
}

impl MarketTerms {
    /// Whether no market term was found.
    pub fn is_empty(&self) -> bool {
        self.notional_size.is_none()
            && self.isin.is_none()
            && self.maturity.is_none()
            && self.bid.is_none()
            && self.payment_frequency.is_none()
    }
}
