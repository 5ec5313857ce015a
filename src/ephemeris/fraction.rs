//! Position of "now" inside the current cycle of a table.
//!
//! A bracket `[t0, t1]` is split into `resolution` bins. The query is
//! normalized into `[0, 1]`, scaled to `pos = normalized * resolution` and
//! mapped to a bin with a **ceiling**:
//!
//! ```text
//! bin_ceiled = clamp(ceil(pos), 1, resolution)
//! bin        = bin_ceiled - 1
//! ```
//!
//! so a query sitting exactly on a bin edge still belongs to the bin that ends
//! there (`pos = 1.0` is bin 0 at full progress, `pos = 1.0 + ε` is bin 1).
//! `progress` is the advance inside that bin, in `[0, 1]`.
use serde::Serialize;

use crate::constants::{EntryIndex, UnixSeconds};

use super::{
    digits::decimal_digit_repack,
    window::{resolve_window, Window, WindowLookup},
    TimestampSource,
};

/// Dial state of one table at one instant.
///
/// `valid == false` means no interpolation took place; every numeric field is
/// then zero except the indices, which carry whatever the search found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FractionResult {
    /// Zero-based bin, in `[0, resolution - 1]`.
    pub bin: u32,
    /// `bin` passed through [`decimal_digit_repack`], for dial labels.
    pub bin_octal: u64,
    /// Position inside the bracket, in `[0, 1]`.
    pub normalized: f64,
    /// Advance inside the current bin, in `[0, 1]`.
    pub progress: f64,
    pub valid: bool,
    pub past_index: EntryIndex,
    pub future_index: EntryIndex,
}

/// Interpolate `timestamp` inside `window` at the given resolution.
///
/// The timestamp is clamped into the window first, so out-of-window queries
/// pin to the first or last bin.
///
/// Arguments
/// -----------------
/// * `window`: the bracket to interpolate in.
/// * `timestamp`: query, in unix seconds.
/// * `resolution`: number of bins in the bracket.
///
/// Return
/// ----------
/// * A [`FractionResult`] carrying the window's indices. It is invalid when
///   `window.end <= window.start` or `resolution == 0`.
pub fn interpolate(window: &Window, timestamp: UnixSeconds, resolution: u32) -> FractionResult {
    if window.end <= window.start || resolution == 0 {
        return FractionResult {
            past_index: window.past_index,
            future_index: window.future_index,
            ..FractionResult::default()
        };
    }

    let clamped = timestamp.clamp(window.start, window.end);
    let period = window.period() as f64;
    let elapsed = clamped.abs_diff(window.start) as f64;

    let normalized = (elapsed / period).clamp(0.0, 1.0);
    let pos = normalized * f64::from(resolution);

    let bin_ceiled = (pos.ceil() as u32).clamp(1, resolution);
    let bin = bin_ceiled - 1;

    let lower = f64::from(bin);
    let progress = if pos <= lower {
        0.0
    } else if pos >= f64::from(bin_ceiled) {
        1.0
    } else {
        pos - lower
    };

    FractionResult {
        bin,
        bin_octal: decimal_digit_repack(bin),
        normalized,
        progress,
        valid: true,
        past_index: window.past_index,
        future_index: window.future_index,
    }
}

/// Compute the dial state of `source` at `timestamp`.
///
/// The window cache is passed by value and handed back: feed the returned
/// window into the next call on the same table. It is replaced after a fresh
/// search and left untouched when no bracket is found.
///
/// Arguments
/// -----------------
/// * `source`: sorted table of at least two entries.
/// * `timestamp`: query, in unix seconds.
/// * `resolution`: number of bins per cycle, non-zero.
/// * `window`: cache returned by the previous call, or `None`.
///
/// Return
/// ----------
/// * `(result, window)`. `result.valid` is false when the table holds fewer
///   than two entries, `resolution == 0`, or `timestamp` has no past and
///   future neighbour.
///
/// See also
/// ------------
/// * [`resolve_window`] – Bracket resolution and cache reuse.
/// * [`interpolate`] – The bin mapping itself.
pub fn fraction_at<S>(
    source: &S,
    timestamp: UnixSeconds,
    resolution: u32,
    window: Option<Window>,
) -> (FractionResult, Option<Window>)
where
    S: TimestampSource + ?Sized,
{
    if source.entry_count() < 2 || resolution == 0 {
        return (FractionResult::default(), window);
    }

    match resolve_window(source, timestamp, window) {
        WindowLookup::Cached(bracket) | WindowLookup::Searched(bracket) => {
            (interpolate(&bracket, timestamp, resolution), Some(bracket))
        }
        WindowLookup::Unresolved(search) => (
            FractionResult {
                past_index: search.past_index,
                future_index: search.future_index,
                ..Default::default()
            },
            window,
        ),
    }
}
