//! Common regex patterns for term sheet extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Text normalization
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    pub static ref MARKUP_RUN: Regex = Regex::new(r"\*+").unwrap();

    // Value cleaning
    pub static ref LEADING_PUNCTUATION: Regex = Regex::new(r"^[\-\*:\s]+").unwrap();

    pub static ref TRAILING_MARKUP: Regex = Regex::new(r"[\-\*]+$").unwrap();

    pub static ref TBD_SENTINEL: Regex = Regex::new(r"(?i)\*+TBD\*+").unwrap();

    pub static ref TBD_PLACEHOLDER: Regex = Regex::new(r"(?i)^\s*\**TBD\**\s*$").unwrap();

    // Percentage token, e.g. "70%" or "62.5%"
    pub static ref PERCENTAGE: Regex = Regex::new(r"[0-9]+\.?[0-9]*%").unwrap();

    // Market terms recognised by format
    pub static ref NOTIONAL_SIZE: Regex = Regex::new(
        r"(?i)\b\d+\s*(?:mio|million|bn|billion)\b"
    ).unwrap();

    pub static ref ISIN: Regex = Regex::new(
        r"\b[A-Z]{2}[A-Z0-9]{9}\d\b"
    ).unwrap();

    pub static ref TENOR: Regex = Regex::new(
        r"(?i)\b\d+\s*[YMQ]\b"
    ).unwrap();

    pub static ref ESTR_BID: Regex = Regex::new(
        r"(?i)\bestr\+\d+\s*bps\b"
    ).unwrap();

    pub static ref PAYMENT_FREQUENCY: Regex = Regex::new(
        r"(?i)\b(?:quarterly|monthly|annual|semi-annual)\b"
    ).unwrap();
}
