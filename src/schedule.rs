//! A convenience iterator over successive fire times.
//!
//! Pure sugar over repeated [`crate::next`] calls — it does not precompute
//! or cache anything beyond the single next instant, so it does not predict
//! "all" future fires, only the next one, on demand, same as calling `next`
//! in a loop.

use chrono::{DateTime, TimeZone};

use crate::error::ParseError;
use crate::expr::CompiledExpr;
use crate::successor::next_after;

/// Iterator over the fire times of a [`CompiledExpr`], starting strictly
/// after a given instant.
#[derive(Debug, Clone)]
pub struct Schedule<'a, Tz: TimeZone> {
    compiled: &'a CompiledExpr,
    cursor: DateTime<Tz>,
    errored: bool,
}

impl<'a, Tz: TimeZone> Schedule<'a, Tz> {
    pub(crate) fn new(compiled: &'a CompiledExpr, after: DateTime<Tz>) -> Self {
        Self {
            compiled,
            cursor: after,
            errored: false,
        }
    }
}

impl<'a, Tz: TimeZone> Iterator for Schedule<'a, Tz> {
    type Item = Result<DateTime<Tz>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }
        match next_after(self.compiled, &self.cursor) {
            Ok(dt) => {
                self.cursor = dt.clone();
                Some(Ok(dt))
            }
            Err(e) => {
                self.errored = true;
                Some(Err(e))
            }
        }
    }
}
