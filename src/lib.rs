//! Extended Quartz-style cron expression compiler and next-fire-time engine.
//!
//! Six whitespace-separated fields (second, minute, hour, day-of-month,
//! month, day-of-week), with the usual `*`, `,`, `-`, `/` syntax plus the
//! extended `H` (deterministic hash), `L`/`L-n` (last/offset), `W`/`LW`
//! (nearest weekday), and `dL` (last weekday-of-month) tokens.
//!
//! Example:
//! ```
//! use chrono::{TimeZone, Utc};
//! use xcron::parse;
//!
//! let compiled = parse("0 0 12 * * ?").unwrap();
//! let after = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let fire = xcron::next(&compiled, &after).unwrap();
//! assert_eq!(fire, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
//! ```
//!
//! `H` resolves deterministically from a process-wide (thread-local under
//! `std`) seed:
//! ```
//! use xcron::{parse, set_hash_seed};
//!
//! set_hash_seed(42);
//! let a = parse("H H H * * ?").unwrap();
//! let b = parse("H H H * * ?").unwrap();
//! assert_eq!(a, b);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitset;
mod compile;
mod error;
mod expr;
mod fields;
mod hash;
mod schedule;
mod tokenize;
mod successor;

use chrono::{DateTime, TimeZone};

pub use error::ParseError;
pub use expr::CompiledExpr;
pub use hash::{HashConfig, HashFn, default_config, set_default_hash_fn as set_hash_fn, set_default_seed as set_hash_seed};
pub use schedule::Schedule;

/// Compile a cron expression using the process-wide default `H` hash
/// configuration (seed `0`, or whatever [`set_hash_seed`]/[`set_hash_fn`]
/// last set).
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(expr)))]
pub fn parse(expr: &str) -> Result<CompiledExpr, ParseError> {
    parse_with_config(expr, &default_config())
}

/// Compile a cron expression using an explicit [`HashConfig`], independent
/// of any process-wide default.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(expr, cfg)))]
pub fn parse_with_config(expr: &str, cfg: &HashConfig) -> Result<CompiledExpr, ParseError> {
    #[cfg(feature = "tracing")]
    tracing::trace!(expr, "compiling cron expression");
    let result = compile::compile(expr, cfg);
    #[cfg(feature = "tracing")]
    if let Err(ref e) = result {
        tracing::debug!(expr, error = %e, "cron expression rejected");
    }
    result
}

/// Find the next fire time strictly after `after`.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
pub fn next<Tz: TimeZone>(compiled: &CompiledExpr, after: &DateTime<Tz>) -> Result<DateTime<Tz>, ParseError> {
    successor::next_after(compiled, after)
}

/// Build a [`Schedule`] iterator yielding successive fire times strictly
/// after `after`.
pub fn schedule<Tz: TimeZone>(compiled: &CompiledExpr, after: DateTime<Tz>) -> Schedule<'_, Tz> {
    Schedule::new(compiled, after)
}
