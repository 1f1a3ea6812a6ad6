//! Deterministic resolution of the Jenkins-style `H` hash token.
//!
//! `H` is replaced at compile time by a concrete integer within the
//! field's effective range; it never survives into a [`crate::CompiledExpr`].

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::Cell;

use crate::error::ParseError;

/// Signature for a custom deterministic hash function: given the library's
/// seed and a field index (0..=5, in textual field order), return an
/// integer used to derive an `H` value. Same `(seed, idx)` must always
/// yield the same result.
pub type HashFn = fn(seed: i32, field_index: u8) -> i32;

/// Explicit configuration for `H` resolution, threaded through
/// [`crate::parse_with_config`]. `parse` uses a thread-local (or, without
/// `std`, an atomic) default built from [`set_hash_seed`]/[`set_hash_fn`].
#[derive(Clone, Copy, Debug)]
pub struct HashConfig {
    pub seed: i32,
    pub hash_fn: Option<HashFn>,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            hash_fn: None,
        }
    }
}

impl HashConfig {
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self {
            seed,
            hash_fn: None,
        }
    }

    #[must_use]
    pub const fn with_hash_fn(seed: i32, hash_fn: HashFn) -> Self {
        Self {
            seed,
            hash_fn: Some(hash_fn),
        }
    }

    fn raw_value(&self, field_index: u8) -> i64 {
        match self.hash_fn {
            Some(f) => i64::from(f(self.seed, field_index)),
            None => default_hash(self.seed, field_index),
        }
    }
}

/// A small, self-contained, stateful generator so "seed the PRNG, draw
/// `idx + 1` values, take the last" (spec's default-hash recipe) is
/// reproducible without depending on platform `rand()`/`srand()`.
struct SplitMix64(u64);

impl SplitMix64 {
    const fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// The library's own deterministic generator: seed, draw `idx + 1` values,
/// return the last one.
fn default_hash(seed: i32, idx: u8) -> i64 {
    let mut gen = SplitMix64::new(seed as i64 as u64);
    let mut v = 0u64;
    for _ in 0..=idx {
        v = gen.next_u64();
    }
    (v >> 1) as i64
}

#[cfg(feature = "std")]
std::thread_local! {
    static DEFAULT_SEED: Cell<i32> = const { Cell::new(0) };
    static DEFAULT_HASH_FN: Cell<Option<HashFn>> = const { Cell::new(None) };
}

#[cfg(not(feature = "std"))]
static DEFAULT_SEED: core::sync::atomic::AtomicI32 = core::sync::atomic::AtomicI32::new(0);
#[cfg(not(feature = "std"))]
static DEFAULT_HASH_FN_PTR: core::sync::atomic::AtomicUsize =
    core::sync::atomic::AtomicUsize::new(0);

/// Set the process-wide (or, under `std`, thread-local) default `H` seed
/// used by [`crate::parse`]. Set this once at startup, before any
/// concurrent `parse` calls; the library applies no locking.
pub fn set_default_seed(seed: i32) {
    #[cfg(feature = "std")]
    DEFAULT_SEED.with(|c| c.set(seed));
    #[cfg(not(feature = "std"))]
    DEFAULT_SEED.store(seed, core::sync::atomic::Ordering::Relaxed);
}

/// Set the process-wide (or, under `std`, thread-local) default custom hash
/// function used by [`crate::parse`].
pub fn set_default_hash_fn(f: HashFn) {
    #[cfg(feature = "std")]
    DEFAULT_HASH_FN.with(|c| c.set(Some(f)));
    #[cfg(not(feature = "std"))]
    DEFAULT_HASH_FN_PTR.store(f as usize, core::sync::atomic::Ordering::Relaxed);
}

/// Read back the current default `HashConfig`.
#[must_use]
pub fn default_config() -> HashConfig {
    #[cfg(feature = "std")]
    {
        HashConfig {
            seed: DEFAULT_SEED.with(Cell::get),
            hash_fn: DEFAULT_HASH_FN.with(Cell::get),
        }
    }
    #[cfg(not(feature = "std"))]
    {
        let ptr = DEFAULT_HASH_FN_PTR.load(core::sync::atomic::Ordering::Relaxed);
        // SAFETY: `ptr` is either 0 (no function set) or was produced by
        // `f as usize` from a live `HashFn` in `set_default_hash_fn`, and
        // function pointers are never deallocated.
        let hash_fn = if ptr == 0 {
            None
        } else {
            Some(unsafe { core::mem::transmute::<usize, HashFn>(ptr) })
        };
        HashConfig {
            seed: DEFAULT_SEED.load(core::sync::atomic::Ordering::Relaxed),
            hash_fn,
        }
    }
}

/// One parsed `H` occurrence within a comma-list element.
#[derive(Debug, Clone, Copy)]
enum HashForm {
    /// Bare `H`.
    Plain,
    /// `H(a-b)`.
    Range(u32, u32),
    /// `H/n`.
    Step(u32),
    /// `H(a-b)/n`.
    RangeStep(u32, u32, u32),
}

fn parse_u32_strict(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Classify a single comma-list element that contains the character `H`.
/// Returns `Ok(None)` if the element does not use `H` at all.
fn classify(elem: &str, field: &'static str) -> Result<Option<HashForm>, ParseError> {
    if !elem.contains('H') {
        return Ok(None);
    }
    if elem == "H" {
        return Ok(Some(HashForm::Plain));
    }
    if let Some(rest) = elem.strip_prefix("H/") {
        if rest == "H" {
            return Err(ParseError::BadStep { field });
        }
        let n = parse_u32_strict(rest).ok_or(ParseError::BadStep { field })?;
        if n == 0 {
            return Err(ParseError::BadStep { field });
        }
        return Ok(Some(HashForm::Step(n)));
    }
    if let Some(rest) = elem.strip_prefix("H(") {
        let close = rest.find(')').ok_or(ParseError::BadHash { field })?;
        let (inner, after) = rest.split_at(close);
        let after = &after[1..]; // drop ')'
        let dash = inner.find('-').ok_or(ParseError::BadHash { field })?;
        let (a_s, b_s) = inner.split_at(dash);
        let b_s = &b_s[1..];
        let a = parse_u32_strict(a_s).ok_or(ParseError::BadHash { field })?;
        let b = parse_u32_strict(b_s).ok_or(ParseError::BadHash { field })?;
        if a > b {
            return Err(ParseError::BadHash { field });
        }
        if after.is_empty() {
            return Ok(Some(HashForm::Range(a, b)));
        }
        let step_s = after.strip_prefix('/').ok_or(ParseError::BadHash { field })?;
        if step_s == "H" {
            return Err(ParseError::BadStep { field });
        }
        let n = parse_u32_strict(step_s).ok_or(ParseError::BadStep { field })?;
        if n == 0 {
            return Err(ParseError::BadStep { field });
        }
        if b >= n {
            return Err(ParseError::BadHash { field });
        }
        return Ok(Some(HashForm::RangeStep(a, b, n)));
    }
    // `H` shows up somewhere else: as a range endpoint (`H-5`, `5-H`), glued
    // to other text, or as a literal iterator count (`5/H`, handled above
    // only when the whole element starts with `H/`).
    if elem.contains('/') && elem.ends_with('H') {
        return Err(ParseError::BadStep { field });
    }
    Err(ParseError::BadHash { field })
}

/// Resolve every `H` occurrence in a field's (already name-substituted)
/// comma-joined text, returning new text with each occurrence replaced by
/// its concrete decimal value. Every occurrence in the same field shares the
/// same underlying draw from `cfg`; only the occurrence's own window can
/// make two `H`s in one field differ.
pub(crate) fn resolve_field_hash(
    field_index: u8,
    text: &str,
    field_name: &'static str,
    cfg: &HashConfig,
    default_min: u32,
    default_max_exclusive: u32,
) -> Result<String, ParseError> {
    if !text.contains('H') {
        return Ok(text.to_string());
    }
    let raw = cfg.raw_value(field_index);
    let mut out: Vec<String> = Vec::new();
    for elem in text.split(',') {
        match classify(elem, field_name)? {
            None => out.push(elem.to_string()),
            Some(form) => {
                let (min, max_excl) = match form {
                    HashForm::Plain => (default_min, default_max_exclusive),
                    HashForm::Range(a, b) => (a, b + 1),
                    HashForm::Step(n) => (default_min, n),
                    HashForm::RangeStep(a, b, _n) => (a, b + 1),
                };
                if max_excl <= min {
                    return Err(ParseError::BadHash { field: field_name });
                }
                let span = i64::from(max_excl - min);
                let value = min as i64 + raw.rem_euclid(span);
                out.push(value.to_string());
            }
        }
    }
    Ok(out.join(","))
}

#[cfg(test)]
mod tests {
    use super::{HashConfig, resolve_field_hash};

    #[test]
    fn same_seed_same_field_same_value() {
        let cfg = HashConfig::new(42);
        let a = resolve_field_hash(0, "H", "seconds", &cfg, 0, 60).unwrap();
        let b = resolve_field_hash(0, "H", "seconds", &cfg, 0, 60).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn multiple_h_in_one_field_collapse_to_same_draw() {
        let cfg = HashConfig::new(7);
        let resolved = resolve_field_hash(3, "H,H", "dom", &cfg, 1, 28).unwrap();
        let parts: alloc::vec::Vec<&str> = resolved.split(',').collect();
        assert_eq!(parts[0], parts[1]);
    }

    #[test]
    fn custom_range_narrows_window() {
        let cfg = HashConfig::new(1);
        let resolved = resolve_field_hash(1, "H(10-12)", "minutes", &cfg, 0, 60).unwrap();
        let v: u32 = resolved.parse().unwrap();
        assert!((10..=12).contains(&v));
    }

    #[test]
    fn h_in_range_position_fails() {
        let cfg = HashConfig::new(1);
        assert!(resolve_field_hash(0, "H-5", "seconds", &cfg, 0, 60).is_err());
        assert!(resolve_field_hash(0, "5-H", "seconds", &cfg, 0, 60).is_err());
    }

    #[test]
    fn h_as_iterator_fails() {
        let cfg = HashConfig::new(1);
        assert!(resolve_field_hash(0, "1/H", "seconds", &cfg, 0, 60).is_err());
    }

    #[test]
    fn range_and_step_conflict_fails() {
        let cfg = HashConfig::new(1);
        assert!(resolve_field_hash(0, "H(0-29)/10", "seconds", &cfg, 0, 60).is_err());
    }
}
