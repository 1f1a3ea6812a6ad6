//! The compiler driver: turns raw expression text into a [`crate::CompiledExpr`].
//!
//! Mirrors `ccronexpr.c::cron_parse_expr`'s concrete step order: split into
//! six fields, substitute names, resolve `H` textually (field order 0..6),
//! check the day-of-month/day-of-week specificity conflict on the raw text,
//! then sub-parse bitmaps in the order seconds, minutes, hours,
//! day-of-week, day-of-month, month (day-of-week before day-of-month so its
//! `L` flag is visible before the month flags are assembled).

use crate::error::ParseError;
use crate::expr::{CompiledExpr, MONTH_FLAG_DOM_L, MONTH_FLAG_DOM_W, MONTH_FLAG_DOW_L};
use crate::fields::{parse_dom_field, parse_dow_field, parse_numeric_field};
use crate::hash::{HashConfig, resolve_field_hash};
use crate::tokenize::{
    is_non_specific, rewrite_question_mark, split_fields, substitute_day_names, substitute_month_names,
};

const FIELD_SECOND: &str = "second";
const FIELD_MINUTE: &str = "minute";
const FIELD_HOUR: &str = "hour";
const FIELD_DOM: &str = "day_of_month";
const FIELD_MONTH: &str = "month";
const FIELD_DOW: &str = "day_of_week";

pub(crate) fn compile(expr: &str, cfg: &HashConfig) -> Result<CompiledExpr, ParseError> {
    let raw = split_fields(expr)?;

    let dom_is_non_specific = is_non_specific(&raw[3]);
    let dow_is_non_specific = is_non_specific(&raw[5]);
    if !dom_is_non_specific && !dow_is_non_specific {
        return Err(ParseError::ConflictingDaySpec);
    }

    let month_named = substitute_month_names(&raw[4]);
    let dow_named = substitute_day_names(&raw[5]);

    let dom_text = rewrite_question_mark(&raw[3]);
    let dow_text = rewrite_question_mark(&dow_named);

    let second_text = resolve_field_hash(0, &raw[0], FIELD_SECOND, cfg, 0, 60)?;
    let minute_text = resolve_field_hash(1, &raw[1], FIELD_MINUTE, cfg, 0, 60)?;
    let hour_text = resolve_field_hash(2, &raw[2], FIELD_HOUR, cfg, 0, 24)?;
    let dom_text = resolve_field_hash(3, &dom_text, FIELD_DOM, cfg, 1, 29)?;
    let month_text = resolve_field_hash(4, &month_named, FIELD_MONTH, cfg, 1, 13)?;
    let dow_text = resolve_field_hash(5, &dow_text, FIELD_DOW, cfg, 0, 7)?;

    let seconds = parse_numeric_field(&second_text, 0, 59, 60, 0, FIELD_SECOND)?;
    let minutes = parse_numeric_field(&minute_text, 0, 59, 60, 0, FIELD_MINUTE)?;
    let hours = parse_numeric_field(&hour_text, 0, 23, 24, 0, FIELD_HOUR)?;
    let dow = parse_dow_field(&dow_text)?;
    let dom = parse_dom_field(&dom_text)?;
    let months = parse_numeric_field(&month_text, 1, 12, 12, 1, FIELD_MONTH)?;

    let mut compiled = CompiledExpr {
        seconds,
        minutes,
        hours,
        days_of_week: dow.days_of_week,
        days_of_month: dom.days_of_month,
        months,
        w_days: dom.w_days,
        l_dom_offsets: dom.l_dom_offsets,
        l_dow_days: dow.l_dow_days,
    };
    if dow.has_last {
        compiled.months.set(MONTH_FLAG_DOW_L);
    }
    if dom.has_last {
        compiled.months.set(MONTH_FLAG_DOM_L);
    }
    if dom.has_weekday {
        compiled.months.set(MONTH_FLAG_DOM_W);
    }
    Ok(compiled)
}
