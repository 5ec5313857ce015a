//! Compact timestamp ephemerides and their query engine.
//!
//! An ephemeris table is a sorted list of event epochs (every new moon, every
//! lunar apogee, ...). This module reads those tables and answers the only
//! question a phase clock asks: *how far are we into the current cycle?*
//!
//! The architecture is split into several submodules:
//!
//! - [`header`]: The fixed 16-byte `FRAC` header, decoded with `nom`.
//! - [`memory_source`]: Tables held in memory, either as `i64` slices
//!   ([`MemorySource`]) or as raw little-endian bytes ([`LeBytesSource`]).
//! - [`file_source`]: Tables read lazily from disk, one seek per entry
//!   ([`FileSource`]).
//! - [`writer`]: Encoding of tables to the binary format and CSV import.
//! - [`search`]: Binary search for the past/future bracket of a timestamp.
//! - [`window`]: The cached bracket reused across successive queries.
//! - [`fraction`]: Interpolation inside a bracket and mapping to dial bins.
//! - [`digits`]: The octal digit repacking used by dial labels.
//! - [`period_stats`]: Start epoch and mean period of a table.
//!
//! # File layout
//!
//! ```text
//! +--------+-------------+----------------------------------------------+
//! | offset | type        | content                                      |
//! +--------+-------------+----------------------------------------------+
//! | 0      | u32 (le)    | magic = 0x43415246 ("FRAC")                  |
//! | 4      | u32 (le)    | entry_count                                  |
//! | 8      | u64 (le)    | reserved                                     |
//! | 16     | i64[] (le)  | entry_count sorted epoch-second timestamps   |
//! +--------+-------------+----------------------------------------------+
//! ```
//!
//! # Typical workflow
//! 1. Open a table with [`FileSource::open`] or wrap static data with
//!    [`MemorySource::new`].
//! 2. Call [`fraction::fraction_at`] with the current unix time and a dial
//!    resolution, threading the returned [`Window`] into the next call.
//! 3. Hand the resulting [`FractionResult`] to a renderer.
//!
//! # Thread safety
//! Sources are immutable once built. [`FileSource`] keeps its file cursor in a
//! `RefCell`, so it is not `Sync`: callers sharing one file between threads
//! must open one source per thread or serialize access themselves.

pub mod digits;
pub mod file_source;
pub mod fraction;
pub mod header;
pub mod memory_source;
pub mod period_stats;
pub mod search;
pub mod window;
pub mod writer;

pub use digits::decimal_digit_repack;
pub use file_source::FileSource;
pub use fraction::{fraction_at, FractionResult};
pub use header::EphemHeader;
pub use memory_source::{LeBytesSource, MemorySource};
pub use period_stats::PeriodStats;
pub use search::{find_closest, SearchResult};
pub use window::Window;

use crate::constants::{EntryIndex, UnixSeconds, INVALID_TIMESTAMP};

/// Read-only random access to a sorted sequence of epoch timestamps.
///
/// Implementations must return timestamps in non-decreasing order for binary
/// search to be meaningful; this ordering is a precondition and is not checked
/// on the query path.
pub trait TimestampSource {
    /// Number of entries in the table.
    fn entry_count(&self) -> EntryIndex;

    /// Timestamp stored at `index`, or `None` if the index is out of range or
    /// the backing store could not be read.
    fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds>;

    /// Sentinel flavoured accessor: the timestamp at `index`, or
    /// [`INVALID_TIMESTAMP`] when [`Self::timestamp`] returns `None`.
    fn get_timestamp(&self, index: EntryIndex) -> UnixSeconds {
        self.timestamp(index).unwrap_or(INVALID_TIMESTAMP)
    }

    fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

impl<S: TimestampSource + ?Sized> TimestampSource for Box<S> {
    fn entry_count(&self) -> EntryIndex {
        (**self).entry_count()
    }

    fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds> {
        (**self).timestamp(index)
    }
}

impl<S: TimestampSource + ?Sized> TimestampSource for &S {
    fn entry_count(&self) -> EntryIndex {
        (**self).entry_count()
    }

    fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds> {
        (**self).timestamp(index)
    }
}
