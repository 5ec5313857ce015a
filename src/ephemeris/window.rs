//! The bracket cache threaded through successive queries.
//!
//! A [`Window`] remembers the last interpolation bracket `[start, end]` of one
//! table, together with the indices it came from. The caller owns it and
//! passes it back on the next query: while "now" stays inside the window the
//! table is not searched again.
//!
//! # Exact matches
//!
//! [`find_closest`] reports an exact hit as a zero-width bracket
//! (`past == future`). To interpolate, the bracket is widened to the cycle
//! that starts at the hit, `[T[i], T[i + 1]]`. A hit on the last entry has no
//! following cycle and uses the one that ends there, `[T[i - 1], T[i]]`.
use tracing::trace;

use crate::constants::{EntryIndex, UnixSeconds};

use super::{search::find_closest, SearchResult, TimestampSource};

/// A non-degenerate bracket of two table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub start: UnixSeconds,
    pub end: UnixSeconds,
    pub past_index: EntryIndex,
    pub future_index: EntryIndex,
}

impl Window {
    /// Build a window, or `None` when `end <= start`.
    pub fn new(
        start: UnixSeconds,
        end: UnixSeconds,
        past_index: EntryIndex,
        future_index: EntryIndex,
    ) -> Option<Self> {
        (end > start).then_some(Window {
            start,
            end,
            past_index,
            future_index,
        })
    }

    /// Inclusive containment test. A degenerate window (built by hand with
    /// `end <= start`) contains nothing.
    pub fn contains(&self, timestamp: UnixSeconds) -> bool {
        self.end > self.start && self.start <= timestamp && timestamp <= self.end
    }

    /// Length of the bracket in seconds.
    pub fn period(&self) -> u64 {
        self.end.abs_diff(self.start)
    }
}

/// Outcome of [`resolve_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLookup {
    /// The cached window contained the query, no search was done.
    Cached(Window),
    /// A search produced a fresh window, to be stored by the caller.
    Searched(Window),
    /// No usable bracket: the query lies outside the table, the table is too
    /// short, a read failed or the bracket is degenerate.
    Unresolved(SearchResult),
}

impl WindowLookup {
    pub fn window(&self) -> Option<Window> {
        match self {
            WindowLookup::Cached(window) | WindowLookup::Searched(window) => Some(*window),
            WindowLookup::Unresolved(_) => None,
        }
    }
}

/// Turn a search result into an interpolation window.
///
/// Arguments
/// -----------------
/// * `source`: the table `search` was computed on.
/// * `search`: output of [`find_closest`].
///
/// Return
/// ----------
/// * The bracket, widened on exact matches, or `None` if one side is missing,
///   a read fails or the bracket has zero width (duplicate timestamps).
pub fn bracket_from_search<S>(source: &S, search: &SearchResult) -> Option<Window>
where
    S: TimestampSource + ?Sized,
{
    if !search.is_bracketed() {
        return None;
    }

    let (past, future) = if search.is_exact() {
        let hit = search.past_index;
        if hit.checked_add(1).is_some_and(|next| next < source.entry_count()) {
            (hit, hit + 1)
        } else {
            (hit.checked_sub(1)?, hit)
        }
    } else {
        (search.past_index, search.future_index)
    };

    Window::new(
        source.timestamp(past)?,
        source.timestamp(future)?,
        past,
        future,
    )
}

/// Find the interpolation window for `timestamp`, reusing `cache` when it
/// still applies.
///
/// Arguments
/// -----------------
/// * `source`: the table.
/// * `timestamp`: query, in unix seconds.
/// * `cache`: the window returned by the previous lookup on the same table.
///
/// Return
/// ----------
/// * [`WindowLookup::Cached`] on a cache hit, [`WindowLookup::Searched`] after
///   a successful search, [`WindowLookup::Unresolved`] with the raw search
///   result otherwise.
pub fn resolve_window<S>(source: &S, timestamp: UnixSeconds, cache: Option<Window>) -> WindowLookup
where
    S: TimestampSource + ?Sized,
{
    if let Some(window) = cache.filter(|window| window.contains(timestamp)) {
        trace!(
            timestamp,
            start = window.start,
            end = window.end,
            "window cache hit"
        );
        return WindowLookup::Cached(window);
    }

    let search = find_closest(source, timestamp);
    match bracket_from_search(source, &search) {
        Some(window) => {
            trace!(
                timestamp,
                start = window.start,
                end = window.end,
                "window cache miss"
            );
            WindowLookup::Searched(window)
        }
        None => {
            trace!(timestamp, ?search, "no bracket around timestamp");
            WindowLookup::Unresolved(search)
        }
    }
}
