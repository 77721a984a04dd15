//! Cleanup of a single captured value.

use crate::models::termsheet::TBD;

use super::rules::patterns::{
    LEADING_PUNCTUATION, TBD_PLACEHOLDER, TBD_SENTINEL, TRAILING_MARKUP, WHITESPACE_RUN,
};

/// Clean a captured value.
///
/// Leading `-`, `*`, `:` and whitespace, and trailing `-` and `*`, are
/// stripped and internal whitespace is collapsed. If what remains still holds
/// an emphasized placeholder such as `**tbd**`, or the capture is nothing but
/// a placeholder, the result is the [`TBD`] sentinel. An empty string means
/// there is no value.
pub fn clean_value(raw: &str) -> String {
    let value = LEADING_PUNCTUATION.replace(raw, "");
    let value = TRAILING_MARKUP.replace(&value, "");
    let value = WHITESPACE_RUN.replace_all(&value, " ");

    if TBD_SENTINEL.is_match(&value) || TBD_PLACEHOLDER.is_match(raw) {
        return TBD.to_string();
    }

    value.trim().to_string()
}
