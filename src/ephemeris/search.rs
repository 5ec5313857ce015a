use crate::constants::{EntryIndex, UnixSeconds};

use super::TimestampSource;

/// Indices of the nearest entries around a query timestamp.
///
/// `found_past == false` means the query precedes the first entry,
/// `found_future == false` that it follows the last one. On an exact match
/// both flags are set and `past_index == future_index`. When a flag is false
/// the matching index is meaningless and left at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub past_index: EntryIndex,
    pub future_index: EntryIndex,
    pub found_past: bool,
    pub found_future: bool,
}

impl SearchResult {
    fn future_only(index: EntryIndex) -> Self {
        SearchResult {
            future_index: index,
            found_future: true,
            ..Default::default()
        }
    }

    fn past_only(index: EntryIndex) -> Self {
        SearchResult {
            past_index: index,
            found_past: true,
            ..Default::default()
        }
    }

    fn exact(index: EntryIndex) -> Self {
        SearchResult {
            past_index: index,
            future_index: index,
            found_past: true,
            found_future: true,
        }
    }

    pub fn past(&self) -> Option<EntryIndex> {
        self.found_past.then_some(self.past_index)
    }

    pub fn future(&self) -> Option<EntryIndex> {
        self.found_future.then_some(self.future_index)
    }

    /// Both sides were found.
    pub fn is_bracketed(&self) -> bool {
        self.found_past && self.found_future
    }

    /// The query hit a stored timestamp exactly.
    pub fn is_exact(&self) -> bool {
        self.is_bracketed() && self.past_index == self.future_index
    }
}

/// Locate the nearest past and future entries around `timestamp`.
///
/// Iterative binary search over `[0, entry_count - 1]`, O(log n) reads and no
/// allocation. The source must be sorted ascending; this is not checked.
///
/// Arguments
/// -----------------
/// * `source`: the table to search.
/// * `timestamp`: query, in unix seconds.
///
/// Return
/// ----------
/// * A [`SearchResult`]:
///   - empty table: nothing found,
///   - `timestamp < first`: future only, index 0,
///   - `timestamp > last`: past only, index `entry_count - 1`,
///   - exact match: `past_index == future_index`,
///   - otherwise the tightest bracket `T[past] < timestamp < T[future]`.
///
///   If the source fails to return an entry during the search, the result is
///   the empty [`SearchResult::default`].
///
/// See also
/// ------------
/// * [`crate::ephemeris::window::resolve_window`] – Cached variant used by the fraction path.
pub fn find_closest<S>(source: &S, timestamp: UnixSeconds) -> SearchResult
where
    S: TimestampSource + ?Sized,
{
    try_find_closest(source, timestamp).unwrap_or_default()
}

fn try_find_closest<S>(source: &S, timestamp: UnixSeconds) -> Option<SearchResult>
where
    S: TimestampSource + ?Sized,
{
    let count = source.entry_count();
    if count == 0 {
        return Some(SearchResult::default());
    }

    let last_index = count - 1;
    if timestamp < source.timestamp(0)? {
        return Some(SearchResult::future_only(0));
    }
    if timestamp > source.timestamp(last_index)? {
        return Some(SearchResult::past_only(last_index));
    }

    // T[0] <= timestamp <= T[last]
    let mut left: EntryIndex = 0;
    let mut right: EntryIndex = last_index;
    while left <= right {
        let mid = left + (right - left) / 2;
        let value = source.timestamp(mid)?;

        if value == timestamp {
            return Some(SearchResult::exact(mid));
        }
        if value < timestamp {
            left = mid + 1;
        } else {
            match mid.checked_sub(1) {
                Some(next) => right = next,
                None => break,
            }
        }
    }

    // `left` is now the first entry greater than `timestamp`.
    Some(SearchResult {
        past_index: left.saturating_sub(1),
        future_index: left,
        found_past: left > 0,
        found_future: left < count,
    })
}
