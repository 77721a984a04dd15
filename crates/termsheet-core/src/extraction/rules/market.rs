//! Market terms recognised by their format alone.

use regex::Regex;

use crate::models::termsheet::MarketTerms;

use super::patterns::{ESTR_BID, ISIN, NOTIONAL_SIZE, PAYMENT_FREQUENCY, TENOR};

/// Scan text for notional size, ISIN, tenor, ESTR bid and payment frequency.
///
/// The first occurrence of each term wins.
pub fn scan_market_terms(text: &str) -> MarketTerms {
    MarketTerms {
        notional_size: first_match(&NOTIONAL_SIZE, text),
        isin: first_match(&ISIN, text),
        maturity: first_match(&TENOR, text),
        bid: first_match(&ESTR_BID, text),
        payment_frequency: first_match(&PAYMENT_FREQUENCY, text).map(|f| capitalize(&f)),
    }
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_quote() {
        let text = "Client buys 50 mio of DE000A1EWWW0, 5Y, bid estr+45bps, paid QUARTERLY";

        let terms = scan_market_terms(text);

        assert_eq!(
            terms,
            MarketTerms {
                notional_size: Some("50 mio".to_string()),
                isin: Some("DE000A1EWWW0".to_string()),
                maturity: Some("5Y".to_string()),
                bid: Some("estr+45bps".to_string()),
                payment_frequency: Some("Quarterly".to_string()),
            }
        );
    }

    #[test]
    fn test_semi_annual_frequency() {
        let terms = scan_market_terms("coupons paid semi-annual in arrears");
        assert_eq!(terms.payment_frequency.as_deref(), Some("Semi-annual"));
    }

    #[test]
    fn test_isin_is_case_sensitive() {
        assert!(scan_market_terms("de000a1ewww0").isin.is_none());
    }

    #[test]
    fn test_nothing_found() {
        assert!(scan_market_terms("Party A: Acme Bank").is_empty());
    }
}
