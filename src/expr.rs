//! The compiled, fixed-size form of a cron expression.

use crate::bitset::Bitset64;

/// Bit in `months` marking "last occurrence of the requested weekday" (`dL`)
/// as live in `l_dow_days`.
pub(crate) const MONTH_FLAG_DOW_L: u32 = 13;
/// Bit in `months` marking a DOM `L`/`L-n` offset as live in `l_dom_offsets`.
pub(crate) const MONTH_FLAG_DOM_L: u32 = 14;
/// Bit in `months` marking a DOM `W`/`LW` entry as live in `w_days`.
pub(crate) const MONTH_FLAG_DOM_W: u32 = 15;

/// Bit in `w_days` standing for `LW` ("last weekday of the month") rather
/// than a concrete day-of-month.
pub(crate) const W_FLAG_LW: u32 = 0;
/// Bit in `l_dom_offsets` standing for plain `L` (offset 0) rather than
/// `L-n`.
pub(crate) const L_FLAG_PLAIN: u32 = 0;

/// A compiled, `Copy`, heap-free cron expression.
///
/// Produced by [`crate::parse`]/[`crate::parse_with_config`] and immutable
/// thereafter. Every bitmap is indexed from 0 using the semantics documented
/// on its field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompiledExpr {
    /// Valid seconds, bits 0..59.
    pub(crate) seconds: Bitset64,
    /// Valid minutes, bits 0..59.
    pub(crate) minutes: Bitset64,
    /// Valid hours, bits 0..23.
    pub(crate) hours: Bitset64,
    /// Valid weekdays, bits 0..6 (Sunday = 0).
    pub(crate) days_of_week: Bitset64,
    /// Valid days of month, bits 1..31 (bit 0 unused).
    pub(crate) days_of_month: Bitset64,
    /// Valid months, bits 0..11, plus flag bits 13 (DOW `L`), 14 (DOM `L`),
    /// 15 (DOM `W`). Bit 12 is never set.
    pub(crate) months: Bitset64,
    /// Days for which the `W` ("nearest weekday") modifier applies. Bit 0
    /// means `LW` ("last weekday of month").
    pub(crate) w_days: Bitset64,
    /// Offsets `k` for which `L-k` is requested in DOM (`L` itself is
    /// offset 0). Bits 0..30.
    pub(crate) l_dom_offsets: Bitset64,
    /// Weekdays for which "last X-day of month" (`dL`) is requested. Bits
    /// 0..6.
    pub(crate) l_dow_days: Bitset64,
}

impl CompiledExpr {
    /// Test a bit of `seconds`. Exposed for white-box testing.
    #[must_use]
    pub fn bit_test_seconds(&self, i: u32) -> bool {
        self.seconds.test(i)
    }

    /// Test a bit of `minutes`. Exposed for white-box testing.
    #[must_use]
    pub fn bit_test_minutes(&self, i: u32) -> bool {
        self.minutes.test(i)
    }

    /// Test a bit of `hours`. Exposed for white-box testing.
    #[must_use]
    pub fn bit_test_hours(&self, i: u32) -> bool {
        self.hours.test(i)
    }

    /// Test a bit of `days_of_week`. Exposed for white-box testing.
    #[must_use]
    pub fn bit_test_days_of_week(&self, i: u32) -> bool {
        self.days_of_week.test(i)
    }

    /// Test a bit of `days_of_month`. Exposed for white-box testing.
    #[must_use]
    pub fn bit_test_days_of_month(&self, i: u32) -> bool {
        self.days_of_month.test(i)
    }

    /// Test a month value bit (0..11). Exposed for white-box testing.
    #[must_use]
    pub fn bit_test_months(&self, i: u32) -> bool {
        self.months.test(i)
    }

    /// True if the DOM `L`/`L-n` flag (bit 14 of `months`) is set.
    #[must_use]
    pub fn has_dom_last(&self) -> bool {
        self.months.test(MONTH_FLAG_DOM_L)
    }

    /// True if the DOM `W`/`LW` flag (bit 15 of `months`) is set.
    #[must_use]
    pub fn has_dom_weekday(&self) -> bool {
        self.months.test(MONTH_FLAG_DOM_W)
    }

    /// True if the DOW `dL` flag (bit 13 of `months`) is set.
    #[must_use]
    pub fn has_dow_last(&self) -> bool {
        self.months.test(MONTH_FLAG_DOW_L)
    }
}
