//! Finding the next fire time strictly after a given instant.
//!
//! Ported from `ccronexpr.c`'s `do_next`/`find_next`/`handle_lw_flags`, but
//! restructured as an iterative reset-mask loop instead of the original's
//! recursive restart-on-change calls: whenever any field changes, lower
//! fields are reset to their minimum and the whole check restarts from the
//! month. A four-year horizon bounds the search so an unsatisfiable
//! expression (e.g. `31 2 ?` style day/month mismatches) fails fast instead
//! of looping forever.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Timelike};

use crate::bitset::Bitset64;
use crate::error::ParseError;
use crate::expr::CompiledExpr;

const HORIZON_YEARS: i32 = 4;

pub(crate) fn next_after<Tz: TimeZone>(
    compiled: &CompiledExpr,
    after: &DateTime<Tz>,
) -> Result<DateTime<Tz>, ParseError> {
    let tz = after.timezone();
    let start = after.naive_local() + Duration::seconds(1);
    let horizon_year = start.year() + HORIZON_YEARS;

    let mut date = start.date();
    let mut hour = start.hour();
    let mut minute = start.minute();
    let mut second = start.second();

    loop {
        if date.year() > horizon_year {
            #[cfg(feature = "tracing")]
            tracing::debug!(horizon_year, "next_after exhausted the search horizon");
            return Err(ParseError::InternalError);
        }

        let month0 = date.month() - 1;
        match compiled.months.next_set_from(month0, 12) {
            Some(m0) if m0 == month0 => {}
            Some(m0) => {
                date = NaiveDate::from_ymd_opt(date.year(), m0 + 1, 1).ok_or(ParseError::InternalError)?;
                hour = 0;
                minute = 0;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, "advanced month");
                continue;
            }
            None => {
                let m0 = compiled.months.next_set_from(0, 12).unwrap_or(0);
                date =
                    NaiveDate::from_ymd_opt(date.year() + 1, m0 + 1, 1).ok_or(ParseError::InternalError)?;
                hour = 0;
                minute = 0;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, "wrapped to next year's matching month");
                continue;
            }
        }

        let day_bits = effective_day_bits(compiled, date.year(), date.month())?;
        match day_bits.next_set_from(date.day(), 32) {
            Some(d) if d == date.day() => {}
            Some(d) => {
                date = NaiveDate::from_ymd_opt(date.year(), date.month(), d).ok_or(ParseError::InternalError)?;
                hour = 0;
                minute = 0;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, "advanced day");
                continue;
            }
            None => {
                date = first_day_of_next_month(date)?;
                hour = 0;
                minute = 0;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, "no matching day this month, rolled to next month");
                continue;
            }
        }

        match compiled.hours.next_set_from(hour, 24) {
            Some(h) if h == hour => {}
            Some(h) => {
                hour = h;
                minute = 0;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(hour, "advanced hour");
                continue;
            }
            None => {
                date = date.succ_opt().ok_or(ParseError::InternalError)?;
                hour = 0;
                minute = 0;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, "no matching hour left today, advanced day");
                continue;
            }
        }

        match compiled.minutes.next_set_from(minute, 60) {
            Some(m) if m == minute => {}
            Some(m) => {
                minute = m;
                second = 0;
                #[cfg(feature = "tracing")]
                tracing::trace!(minute, "advanced minute");
                continue;
            }
            None => {
                hour += 1;
                minute = 0;
                second = 0;
                if hour == 24 {
                    date = date.succ_opt().ok_or(ParseError::InternalError)?;
                    hour = 0;
                }
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, hour, "no matching minute left this hour, advanced hour");
                continue;
            }
        }

        match compiled.seconds.next_set_from(second, 60) {
            Some(s) if s == second => {}
            Some(s) => {
                second = s;
                #[cfg(feature = "tracing")]
                tracing::trace!(second, "advanced second");
                continue;
            }
            None => {
                minute += 1;
                second = 0;
                if minute == 60 {
                    minute = 0;
                    hour += 1;
                    if hour == 24 {
                        date = date.succ_opt().ok_or(ParseError::InternalError)?;
                        hour = 0;
                    }
                }
                #[cfg(feature = "tracing")]
                tracing::trace!(?date, hour, minute, "no matching second left this minute, advanced minute");
                continue;
            }
        }

        let naive = date.and_hms_opt(hour, minute, second).ok_or(ParseError::InternalError)?;
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => return Ok(dt),
            LocalResult::Ambiguous(first, _second) => return Ok(first),
            LocalResult::None => {
                // Local time falls in a spring-forward gap; it can never be
                // observed, so skip it like any other unsatisfied second.
                second += 1;
                if second == 60 {
                    second = 0;
                    minute += 1;
                    if minute == 60 {
                        minute = 0;
                        hour += 1;
                        if hour == 24 {
                            date = date.succ_opt().ok_or(ParseError::InternalError)?;
                            hour = 0;
                        }
                    }
                }
            }
        }
    }
}

fn first_day_of_next_month(date: NaiveDate) -> Result<NaiveDate, ParseError> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).ok_or(ParseError::InternalError)
}

fn days_in_month(year: i32, month: u32) -> Result<u32, ParseError> {
    let first_this = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ParseError::InternalError)?;
    let first_next = first_day_of_next_month(first_this)?;
    u32::try_from((first_next - first_this).num_days()).map_err(|_| ParseError::InternalError)
}

fn weekday_num(year: i32, month: u32, day: u32) -> Result<u32, ParseError> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InternalError)?;
    Ok(date.weekday().num_days_from_sunday())
}

/// Shift `day` to the nearest weekday, per `ccronexpr`'s `W` boundary rule:
/// a Saturday on the 1st shifts forward to Monday, a Sunday on the last day
/// of the month shifts backward to Friday; every other Saturday/Sunday
/// shifts one day toward the middle of the month.
fn nearest_weekday(year: i32, month: u32, day: u32, days_in_month: u32) -> Result<u32, ParseError> {
    let wd = weekday_num(year, month, day)?;
    Ok(match wd {
        6 if day == 1 => day + 2,
        6 => day - 1,
        0 if day == days_in_month => day - 2,
        0 => day + 1,
        _ => day,
    })
}

fn last_weekday_of_month(year: i32, month: u32, days_in_month: u32) -> Result<u32, ParseError> {
    let wd = weekday_num(year, month, days_in_month)?;
    Ok(match wd {
        6 => days_in_month - 1,
        0 => days_in_month - 2,
        _ => days_in_month,
    })
}

fn last_weekday_occurrence(year: i32, month: u32, days_in_month: u32, target: u32) -> Result<u32, ParseError> {
    let wd_last = weekday_num(year, month, days_in_month)?;
    let diff = (wd_last + 7 - target) % 7;
    Ok(days_in_month - diff)
}

fn dom_is_wildcard(c: &CompiledExpr) -> bool {
    !c.has_dom_last() && !c.has_dom_weekday() && (1..=31).all(|d| c.bit_test_days_of_month(d))
}

fn dow_is_wildcard(c: &CompiledExpr) -> bool {
    !c.has_dow_last() && (0..=6).all(|d| c.bit_test_days_of_week(d))
}

/// Materialize the set of valid days-of-month for one `(year, month)`,
/// resolving `L`/`L-n`/`W`/`LW`/`dL` against that month's actual length.
fn effective_day_bits(c: &CompiledExpr, year: i32, month: u32) -> Result<Bitset64, ParseError> {
    let dim = days_in_month(year, month)?;
    let mut bits = Bitset64::empty();

    if !dom_is_wildcard(c) {
        for d in 1..=dim {
            if c.bit_test_days_of_month(d) {
                bits.set(d);
            }
        }
        for d in 1..=31u32 {
            if c.w_days.test(d) {
                let target = d.min(dim);
                bits.set(nearest_weekday(year, month, target, dim)?);
            }
        }
        if c.w_days.test(0) {
            bits.set(last_weekday_of_month(year, month, dim)?);
        }
        for k in 0..=30u32 {
            if c.l_dom_offsets.test(k) {
                if dim > k {
                    bits.set(dim - k);
                } else {
                    bits.set(1);
                }
            }
        }
    } else if !dow_is_wildcard(c) {
        for d in 1..=dim {
            let wd = weekday_num(year, month, d)?;
            if c.bit_test_days_of_week(wd) {
                bits.set(d);
            }
        }
        if c.has_dow_last() {
            for wd in 0..=6u32 {
                if c.l_dow_days.test(wd) {
                    bits.set(last_weekday_occurrence(year, month, dim, wd)?);
                }
            }
        }
    } else {
        for d in 1..=dim {
            bits.set(d);
        }
    }
    Ok(bits)
}
