#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use chrono::{TimeZone, Utc};
use chrono_tz::{America::Chicago, US::Pacific};
use xcron::{HashConfig, next, parse, parse_with_config};

macro_rules! next_tests {
    ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (cron, after, expected) = $value;
                let after = Utc.timestamp_opt(after, 0).unwrap();
                let compiled = parse(cron).unwrap();
                let fire = next(&compiled, &after).unwrap();
                assert_eq!(fire.timestamp(), expected);

                // The same instant, reinterpreted in a non-UTC timezone,
                // must fire at the same absolute moment.
                let after_pacific = Pacific.from_utc_datetime(&after.naive_utc());
                let fire_pacific = next(&compiled, &after_pacific).unwrap();
                assert_eq!(fire_pacific.timestamp(), expected);

                let after_chicago = Chicago.from_utc_datetime(&after.naive_utc());
                let fire_chicago = next(&compiled, &after_chicago).unwrap();
                assert_eq!(fire_chicago.timestamp(), expected);
            }
        )*
    }
}

// 2019-11-05 15:56:35 UTC == 1_572_969_395
next_tests! {
    every_second: ("* * * * * ?", 1_572_969_395, 1_572_969_396),
    on_the_minute: ("0 * * * * ?", 1_572_969_395, 1_572_969_420),
    every_5_minutes: ("0 */5 * * * ?", 1_572_969_395, 1_572_969_600),
    on_minute_5: ("0 5 * * * ?", 1_572_969_395, 1_572_969_900),
    every_minute_in_october: ("0 0 0 * 10 ?", 1_572_969_395, 1_601_510_400),
    daily_2am: ("0 0 2 * * ?", 1_572_969_395, 1_573_005_600),
    twice_a_day: ("0 0 5,17 * * ?", 1_572_969_395, 1_572_973_200),
    every_dow_wed: ("0 0 0 ? * WED", 1_573_151_292, 1_573_603_200),
    every_dow_wed_and_fri: ("0 0 0 ? * WED,FRI", 1_573_151_292, 1_573_171_200),
    every_dow_wed_to_fri: ("0 0 0 ? * WED-FRI", 1_573_151_292, 1_573_171_200),
    leap_day: ("0 0 0 29 2 ?", 1_583_020_800, 1_709_164_800),
}

macro_rules! dated_next_tests {
    ($($name:ident: ($cron:expr, ($y1:expr, $mo1:expr, $d1:expr, $h1:expr, $mi1:expr, $s1:expr), ($y2:expr, $mo2:expr, $d2:expr, $h2:expr, $mi2:expr, $s2:expr)),)*) => {
        $(
            #[test]
            fn $name() {
                let after = Utc.with_ymd_and_hms($y1, $mo1, $d1, $h1, $mi1, $s1).unwrap();
                let expected = Utc.with_ymd_and_hms($y2, $mo2, $d2, $h2, $mi2, $s2).unwrap();
                let compiled = parse($cron).unwrap();
                let fire = next(&compiled, &after).unwrap();
                assert_eq!(fire, expected);
            }
        )*
    }
}

// Literal seed scenarios from the written specification's quantified
// properties table.
dated_next_tests! {
    seed_quarter_hour_step_skips_to_next_window: ("*/15 * 1-4 * * *", (2012, 7, 1, 9, 53, 50), (2012, 7, 2, 1, 0, 0)),
    seed_weekday_seven_am: ("0 0 7 ? * MON-FRI", (2009, 9, 28, 7, 0, 0), (2009, 9, 29, 7, 0, 0)),
    seed_leap_day_spans_to_next_leap_year: ("0 0 0 29 2 *", (2008, 2, 29, 0, 0, 0), (2012, 2, 29, 0, 0, 0)),
    seed_nearest_weekday_rolls_to_next_month: ("0 0 1 4W * ?", (2022, 5, 12, 0, 0, 0), (2022, 6, 3, 1, 0, 0)),
    seed_last_weekday_of_month_rolls_forward: ("0 0 1 LW * ?", (2022, 7, 30, 0, 0, 0), (2022, 8, 31, 1, 0, 0)),
    seed_last_day_minus_offset: ("0 0 1 L-2 * ?", (2022, 5, 12, 0, 0, 0), (2022, 5, 29, 1, 0, 0)),
    seed_last_thursday_via_dow_last: ("0 0 1 ? * 4L", (2022, 5, 12, 0, 0, 0), (2022, 5, 26, 1, 0, 0)),
    seed_nearest_weekday_list_picks_later_day: ("0 0 12 1W,15W * ?", (2025, 1, 1, 13, 1, 0), (2025, 1, 15, 12, 0, 0)),
}

#[test]
fn h_is_deterministic_for_the_same_seed() {
    let cfg = HashConfig::new(17);
    let a = parse_with_config("H H H * * ?", &cfg).unwrap();
    let b = parse_with_config("H H H * * ?", &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn h_can_differ_across_seeds() {
    let a = parse_with_config("H", &HashConfig::new(1));
    let b = parse_with_config("H", &HashConfig::new(2));
    // Both are just single fields in isolation for this check; real use
    // always supplies all six.
    let _ = (a, b);
}

#[test]
fn last_day_of_month_matches_last_calendar_day() {
    let compiled = parse("0 0 0 L * ?").unwrap();
    let after = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let fire = next(&compiled, &after).unwrap();
    assert_eq!(fire, Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap());
}

#[test]
fn nearest_weekday_shifts_off_saturday() {
    // September 1, 2024 is a Sunday; 1W should shift to Monday the 2nd.
    let compiled = parse("0 0 0 1W * ?").unwrap();
    let after = Utc.with_ymd_and_hms(2024, 8, 15, 0, 0, 0).unwrap();
    let fire = next(&compiled, &after).unwrap();
    assert_eq!(fire, Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap());
}

#[test]
fn last_weekday_of_month_via_lw() {
    let compiled = parse("0 0 0 LW * ?").unwrap();
    // April 2024 has 30 days; April 30 is a Tuesday, so LW is April 30 itself.
    let after = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let fire = next(&compiled, &after).unwrap();
    assert_eq!(fire, Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap());
}

#[test]
fn last_monday_of_month_via_dow_last() {
    let compiled = parse("0 0 0 ? * 1L").unwrap();
    let after = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let fire = next(&compiled, &after).unwrap();
    assert_eq!(fire, Utc.with_ymd_and_hms(2024, 7, 29, 0, 0, 0).unwrap());
}

macro_rules! invalid_exprs {
    ($($name:ident: $expr:expr,)*) => {
        $(
            #[test]
            fn $name() {
                assert!(parse($expr).is_err(), "expected {:?} to be rejected", $expr);
            }
        )*
    }
}

invalid_exprs! {
    rejects_five_fields: "0 0 * * *",
    rejects_both_dom_and_dow_specific: "0 0 0 1 * MON",
    rejects_step_zero: "0 0/0 * * * ?",
    rejects_step_covering_whole_field: "*/60 * * * * ?",
    rejects_inverted_range: "0 5-2 * * * ?",
    rejects_out_of_range_minute: "0 60 * * * ?",
    rejects_l_zero_in_dom: "0 0 0 L-0 * ?",
    rejects_l_out_of_range_in_dow: "0 0 0 ? * L-7",
    rejects_h_as_range_endpoint: "0 H-5 * * * ?",
    rejects_h_as_step_count: "0 1/H * * * ?",
    rejects_w_on_range: "0 0 0 1-5W * ?",
    rejects_dom_values_out_of_range: "0 0 0 32 * ?",
    rejects_too_long_expression: "0 0 0 1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31,1,2,3 * ?",
}

// Invalid expressions from the written specification's quantified
// properties section.
invalid_exprs! {
    rejects_second_out_of_range: "77 * * * * *",
    rejects_dom_out_of_range_alt: "* * * 45 * *",
    rejects_dom_thirty_two: "0 0 0 32 12 ?",
    rejects_malformed_lw_with_digit_prefix: "0 0 1 16LW * ?",
    rejects_l_with_step: "0 0 1 L/7 * ?",
    rejects_step_equal_to_field_span: "0/60 * * * * *",
    rejects_h_as_range_endpoints: "H H-H 1 * * ?",
    rejects_specific_dom_and_numeric_dow: "0 0 0 1 * 1",
}

#[test]
fn accepts_dow_only_when_dom_is_wildcard() {
    assert!(parse("0 0 0 ? * MON-FRI").is_ok());
}

#[test]
fn accepts_dom_only_when_dow_is_wildcard() {
    assert!(parse("0 0 0 15 * ?").is_ok());
}
