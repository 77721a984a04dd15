//! Text normalization applied before any rule runs.

use super::rules::patterns::{MARKUP_RUN, WHITESPACE_RUN};

/// Normalize raw document text.
///
/// Asterisk runs are removed first and whitespace is collapsed afterwards, so
/// the output never holds two consecutive spaces or a line break. Field/value
/// pairs that spanned lines end up on one logical line; rules bound their
/// values with terminator phrases instead of line breaks.
pub fn normalize(text: &str) -> String {
    let without_markup = MARKUP_RUN.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&without_markup, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "Party A:\n\tAcme Bank\r\n\r\nParty B:  Beta Corp",
        "**Notional Amount**: EUR 10,000,000",
        "a * b",
        " ***TBD*** \n",
        "Barrier (B)\u{00a0}: 70%",
    ];

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize("Party A:\n\tAcme Bank\r\n\r\nParty B:  Beta Corp"),
            "Party A: Acme Bank Party B: Beta Corp"
        );
    }

    #[test]
    fn test_strips_markup() {
        assert_eq!(normalize("**Notional Amount**: ***TBD***"), "Notional Amount: TBD");
        assert_eq!(normalize("a * b"), "a b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize("***"), "");
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {:?}", sample);
        }
    }

    #[test]
    fn test_no_double_spaces_or_newlines() {
        for sample in SAMPLES {
            let out = normalize(sample);
            assert!(!out.contains("  "), "double space in {:?}", out);
            assert!(!out.contains('\n') && !out.contains('\r'), "line break in {:?}", out);
        }
    }
}
