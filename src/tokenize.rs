//! Splitting a raw expression into six fields and substituting named
//! ordinals (`JAN`, `Fri`, ...) before any numeric parsing happens.

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use crate::error::ParseError;

pub(crate) const MAX_EXPR_LEN: usize = 256;

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Split on ASCII whitespace, failing unless exactly six fields result.
pub(crate) fn split_fields(expr: &str) -> Result<[String; 6], ParseError> {
    if expr.len() > MAX_EXPR_LEN {
        return Err(ParseError::InputTooLong);
    }
    let parts: Vec<&str> = expr.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(ParseError::MalformedFieldCount { found: parts.len() });
    }
    Ok([
        parts[0].to_string(),
        parts[1].to_string(),
        parts[2].to_string(),
        parts[3].to_string(),
        parts[4].to_string(),
        parts[5].to_string(),
    ])
}

/// A field counts as "non-specific" for the DOM/DOW cross-check iff its raw
/// text (before any substitution) is exactly `*` or `?`.
pub(crate) fn is_non_specific(raw_field: &str) -> bool {
    raw_field == "*" || raw_field == "?"
}

/// Replace month names with `1`..`12`, case-insensitively, as whole-word
/// tokens (so `"MONDAY"` inside a day field is untouched by the month
/// table and vice versa).
pub(crate) fn substitute_month_names(field: &str) -> String {
    substitute_names(field, &MONTH_NAMES, 1)
}

/// Replace day names with `0`..`6`, case-insensitively.
pub(crate) fn substitute_day_names(field: &str) -> String {
    substitute_names(field, &DAY_NAMES, 0)
}

/// Replace whole-word, case-insensitive occurrences of `names[i]` with
/// `base + i`, scanning left to right over ASCII-letter runs so a name
/// embedded in a longer token (there are none in practice, since cron
/// fields are digits/names/punctuation only) is never partially matched.
fn substitute_names(field: &str, names: &[&str], base: u32) -> String {
    let mut out = String::with_capacity(field.len());
    let bytes = field.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word = &field[start..i];
            match names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(word))
            {
                Some(idx) => out.push_str(&(base + idx as u32).to_string()),
                None => out.push_str(word),
            }
        } else {
            out.push(bytes[i] as char);
            i += 1;
        }
    }
    out
}

/// Replace `?` with `*` for DOM/DOW fields; the caller is expected to have
/// already captured specificity via [`is_non_specific`].
pub(crate) fn rewrite_question_mark(field: &str) -> String {
    if field == "?" {
        "*".to_string()
    } else {
        field.to_string()
    }
}

/// Parse a non-negative decimal integer strictly (no sign, no whitespace).
/// Malformed text is reported as `OutOfRange` with a sentinel `-1` value —
/// the grammar never admits non-numeric literals here, so "not a number"
/// and "out of bounds" collapse to the same caller-visible kind.
pub(crate) fn parse_u32(s: &str, field: &'static str) -> Result<u32, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::OutOfRange { field, value: -1 });
    }
    s.parse()
        .map_err(|_| ParseError::OutOfRange { field, value: -1 })
}

#[cfg(test)]
mod tests {
    use super::{is_non_specific, split_fields, substitute_day_names, substitute_month_names};

    #[test]
    fn splits_six_fields() {
        let fields = split_fields("0 0 12 1W,15W * ?").unwrap();
        assert_eq!(fields[3], "1W,15W");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(split_fields("* * * *").is_err());
    }

    #[test]
    fn month_name_substitution_is_case_insensitive() {
        assert_eq!(substitute_month_names("jan-mar"), "1-3");
        assert_eq!(substitute_month_names("JAN,DEC"), "1,12");
    }

    #[test]
    fn day_name_substitution() {
        assert_eq!(substitute_day_names("MON-FRI"), "1-5");
        assert_eq!(substitute_day_names("Sun"), "0");
    }

    #[test]
    fn non_specific_detection() {
        assert!(is_non_specific("*"));
        assert!(is_non_specific("?"));
        assert!(!is_non_specific("1"));
        assert!(!is_non_specific("1-5"));
    }
}
