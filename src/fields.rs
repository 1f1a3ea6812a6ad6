//! Per-field element parsing: folds a field's comma list into the bitmaps
//! of a [`crate::CompiledExpr`] under construction.
//!
//! Each field is tokenized into a small tagged-variant element list first,
//! then folded into bitmaps — no in-place string mutation, unlike the
//! `ccronexpr` original this is grounded on.

use crate::bitset::Bitset64;
use crate::error::ParseError;
use crate::tokenize::parse_u32;

/// Base of a `/n` step: either the whole range, a single value, or an
/// explicit sub-range.
#[derive(Debug, Clone, Copy)]
enum StepBase {
    Star,
    Value(u32),
    Range(u32, u32),
}

/// One comma-list element of a plain numeric field (seconds, minutes,
/// hours, or month values).
#[derive(Debug, Clone, Copy)]
enum SimpleElement {
    Star,
    Literal(u32),
    Range(u32, u32),
    Step(StepBase, u32),
}

fn parse_step_base(s: &str, min: u32, max: u32, field: &'static str) -> Result<StepBase, ParseError> {
    if s == "*" {
        return Ok(StepBase::Star);
    }
    if let Some(dash) = s.find('-') {
        let (a, b) = s.split_at(dash);
        let b = &b[1..];
        let a = parse_u32(a, field)?;
        let b = parse_u32(b, field)?;
        if a > b || a < min || b > max {
            return Err(ParseError::BadRange { field });
        }
        return Ok(StepBase::Range(a, b));
    }
    let v = parse_u32(s, field)?;
    if v < min || v > max {
        return Err(ParseError::OutOfRange {
            field,
            value: i64::from(v),
        });
    }
    Ok(StepBase::Value(v))
}

/// Parse one comma-list element of a plain numeric field.
fn parse_simple_element(
    elem: &str,
    min: u32,
    max: u32,
    field_count: u32,
    field: &'static str,
) -> Result<SimpleElement, ParseError> {
    if elem == "*" {
        return Ok(SimpleElement::Star);
    }
    if let Some(slash) = elem.find('/') {
        let (base_s, n_s) = elem.split_at(slash);
        let n_s = &n_s[1..];
        let n = parse_u32(n_s, field)?;
        if n == 0 || n >= field_count {
            return Err(ParseError::BadStep { field });
        }
        let base = parse_step_base(base_s, min, max, field)?;
        return Ok(SimpleElement::Step(base, n));
    }
    if let Some(dash) = elem.find('-') {
        let (a, b) = elem.split_at(dash);
        let b = &b[1..];
        let a = parse_u32(a, field)?;
        let b = parse_u32(b, field)?;
        if a > b || a < min || b > max {
            return Err(ParseError::BadRange { field });
        }
        return Ok(SimpleElement::Range(a, b));
    }
    let v = parse_u32(elem, field)?;
    if v < min || v > max {
        return Err(ParseError::OutOfRange {
            field,
            value: i64::from(v),
        });
    }
    Ok(SimpleElement::Literal(v))
}

fn apply_simple_element(elem: SimpleElement, min: u32, max: u32, bit_offset: u32, bits: &mut Bitset64) {
    match elem {
        SimpleElement::Star => {
            for v in min..=max {
                bits.set(v - bit_offset);
            }
        }
        SimpleElement::Literal(v) => bits.set(v - bit_offset),
        SimpleElement::Range(a, b) => {
            for v in a..=b {
                bits.set(v - bit_offset);
            }
        }
        SimpleElement::Step(base, n) => {
            let (a, b) = match base {
                StepBase::Star => (min, max),
                StepBase::Value(v) => (v, max),
                StepBase::Range(a, b) => (a, b),
            };
            let mut v = a;
            while v <= b {
                bits.set(v - bit_offset);
                v += n;
            }
        }
    }
}

/// Parse a plain numeric field (seconds, minutes, hours, or month values)
/// into a bitmap, with bit `i` standing for value `i + bit_offset`.
pub(crate) fn parse_numeric_field(
    text: &str,
    min: u32,
    max: u32,
    field_count: u32,
    bit_offset: u32,
    field: &'static str,
) -> Result<Bitset64, ParseError> {
    let mut bits = Bitset64::empty();
    for elem in text.split(',') {
        if elem.is_empty() {
            continue;
        }
        let parsed = parse_simple_element(elem, min, max, field_count, field)?;
        apply_simple_element(parsed, min, max, bit_offset, &mut bits);
    }
    Ok(bits)
}

/// Result of compiling the day-of-month field.
#[derive(Debug, Default)]
pub(crate) struct DomResult {
    pub(crate) days_of_month: Bitset64,
    pub(crate) w_days: Bitset64,
    pub(crate) l_dom_offsets: Bitset64,
    pub(crate) has_last: bool,
    pub(crate) has_weekday: bool,
}

#[derive(Debug, Clone, Copy)]
enum DomElement {
    Numeric(SimpleElement),
    Last { offset: u32 },
    Weekday(u32),
    LastWeekday,
}

fn parse_dom_element(elem: &str, field: &'static str) -> Result<DomElement, ParseError> {
    if elem == "L" {
        return Ok(DomElement::Last { offset: 0 });
    }
    if elem == "LW" {
        return Ok(DomElement::LastWeekday);
    }
    if let Some(rest) = elem.strip_prefix("L-") {
        let n = parse_u32(rest, field)?;
        if n == 0 || n > 30 {
            return Err(ParseError::BadL { field });
        }
        return Ok(DomElement::Last { offset: n });
    }
    if let Some(prefix) = elem.strip_suffix('W') {
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::BadW { field });
        }
        let d = parse_u32(prefix, field)?;
        if d < 1 || d > 31 {
            return Err(ParseError::OutOfRange {
                field,
                value: i64::from(d),
            });
        }
        return Ok(DomElement::Weekday(d));
    }
    if elem.contains('L') {
        return Err(ParseError::BadL { field });
    }
    Ok(DomElement::Numeric(parse_simple_element(elem, 1, 31, 31, field)?))
}

pub(crate) fn parse_dom_field(text: &str) -> Result<DomResult, ParseError> {
    const FIELD: &str = "day_of_month";
    let mut result = DomResult::default();
    for elem in text.split(',') {
        if elem.is_empty() {
            continue;
        }
        match parse_dom_element(elem, FIELD)? {
            DomElement::Numeric(e) => apply_simple_element(e, 1, 31, 0, &mut result.days_of_month),
            DomElement::Last { offset } => {
                result.l_dom_offsets.set(offset);
                result.has_last = true;
            }
            DomElement::Weekday(d) => {
                result.w_days.set(d);
                result.has_weekday = true;
            }
            DomElement::LastWeekday => {
                result.w_days.set(0);
                result.has_last = true;
                result.has_weekday = true;
            }
        }
    }
    Ok(result)
}

/// Result of compiling the day-of-week field.
#[derive(Debug, Default)]
pub(crate) struct DowResult {
    pub(crate) days_of_week: Bitset64,
    pub(crate) l_dow_days: Bitset64,
    pub(crate) has_last: bool,
}

#[derive(Debug, Clone, Copy)]
enum DowElement {
    Numeric(SimpleElement),
    LastWeekdayOfMonth(u32),
}

fn fold_sunday(v: u32) -> u32 {
    if v == 7 { 0 } else { v }
}

fn parse_dow_element(elem: &str, field: &'static str) -> Result<DowElement, ParseError> {
    if elem == "L" {
        return Ok(DowElement::Numeric(SimpleElement::Literal(0)));
    }
    if let Some(rest) = elem.strip_prefix("L-") {
        let n = parse_u32(rest, field)?;
        if n < 1 || n > 6 {
            return Err(ParseError::BadL { field });
        }
        return Ok(DowElement::Numeric(SimpleElement::Literal(7 - n)));
    }
    if let Some(prefix) = elem.strip_suffix('L') {
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::BadL { field });
        }
        let d = parse_u32(prefix, field)?;
        if d > 7 {
            return Err(ParseError::OutOfRange {
                field,
                value: i64::from(d),
            });
        }
        return Ok(DowElement::LastWeekdayOfMonth(fold_sunday(d)));
    }
    if elem.contains('L') {
        return Err(ParseError::BadL { field });
    }
    Ok(DowElement::Numeric(parse_simple_element(elem, 0, 7, 8, field)?))
}

pub(crate) fn parse_dow_field(text: &str) -> Result<DowResult, ParseError> {
    const FIELD: &str = "day_of_week";
    let mut result = DowResult::default();
    for elem in text.split(',') {
        if elem.is_empty() {
            continue;
        }
        match parse_dow_element(elem, FIELD)? {
            DowElement::Numeric(e) => {
                apply_simple_element(e, 0, 7, 0, &mut result.days_of_week);
            }
            DowElement::LastWeekdayOfMonth(d) => {
                result.l_dow_days.set(d);
                result.has_last = true;
            }
        }
    }
    // Day 7 is Sunday's alias; fold it onto bit 0, since bit 7 would
    // otherwise alias a second, nonexistent day.
    if result.days_of_week.test(7) {
        result.days_of_week.set(0);
        result.days_of_week.clear(7);
    }
    Ok(result)
}
