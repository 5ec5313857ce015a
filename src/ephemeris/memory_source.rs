//! In-memory timestamp tables.
//!
//! Two flavours are provided:
//!
//! * [`MemorySource`] wraps native `i64` values, borrowed from a static table
//!   or owned in a `Vec`.
//! * [`LeBytesSource`] reads a raw little-endian byte table (for instance a
//!   complete `.bin` image pulled in with `include_bytes!`). Every entry is
//!   rebuilt byte by byte, so the table needs no particular alignment.
use std::borrow::Cow;

use tracing::debug;

use crate::{
    constants::{EntryIndex, UnixSeconds, ENTRY_SIZE},
    fractonica_errors::FractonicaError,
};

use super::{header::EphemHeader, TimestampSource};

pub(crate) fn checked_entry_count(len: usize) -> Result<EntryIndex, FractonicaError> {
    EntryIndex::try_from(len).map_err(|_| FractonicaError::TooManyEntries(len))
}

/// Timestamp table backed by a slice of `i64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySource<'a> {
    timestamps: Cow<'a, [UnixSeconds]>,
}

impl<'a> MemorySource<'a> {
    /// Borrow an existing table, typically a `static` array.
    ///
    /// Arguments
    /// -----------------
    /// * `timestamps`: sorted epoch seconds; the ordering is not checked.
    ///
    /// Return
    /// ----------
    /// * The source, or [`FractonicaError::TooManyEntries`] when the slice
    ///   holds more than `u32::MAX` entries.
    pub fn new(timestamps: &'a [UnixSeconds]) -> Result<Self, FractonicaError> {
        checked_entry_count(timestamps.len())?;
        Ok(MemorySource {
            timestamps: Cow::Borrowed(timestamps),
        })
    }

    /// Take ownership of a table built at runtime.
    pub fn from_vec(
        timestamps: Vec<UnixSeconds>,
    ) -> Result<MemorySource<'static>, FractonicaError> {
        checked_entry_count(timestamps.len())?;
        debug!(entries = timestamps.len(), "loaded owned timestamp table");
        Ok(MemorySource {
            timestamps: Cow::Owned(timestamps),
        })
    }

    pub fn as_slice(&self) -> &[UnixSeconds] {
        &self.timestamps
    }
}

impl TimestampSource for MemorySource<'_> {
    fn entry_count(&self) -> EntryIndex {
        // Bounded by the constructors.
        self.timestamps.len() as EntryIndex
    }

    fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds> {
        self.timestamps.get(index as usize).copied()
    }
}

/// Timestamp table backed by little-endian bytes, 8 bytes per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeBytesSource<'a> {
    payload: &'a [u8],
    entry_count: EntryIndex,
}

impl<'a> LeBytesSource<'a> {
    /// Wrap a headerless payload. Trailing bytes that do not form a whole
    /// entry are ignored.
    pub fn new(payload: &'a [u8]) -> Result<Self, FractonicaError> {
        let entry_count = checked_entry_count(payload.len() / ENTRY_SIZE)?;
        Ok(LeBytesSource {
            payload,
            entry_count,
        })
    }

    /// Wrap a complete table image (header followed by the payload).
    ///
    /// The entry count announced by the header is clamped to the number of
    /// complete entries actually present in `image`. The magic word is not
    /// checked here, see [`EphemHeader::has_valid_magic`].
    ///
    /// Arguments
    /// -----------------
    /// * `image`: the bytes of a `.bin` table, at least [`crate::constants::HEADER_SIZE`] bytes long.
    ///
    /// Return
    /// ----------
    /// * The source together with the decoded header, or
    ///   [`FractonicaError::InvalidHeader`] if the image is too short.
    pub fn from_file_image(image: &'a [u8]) -> Result<(Self, EphemHeader), FractonicaError> {
        let (payload, header) = EphemHeader::parse(image)
            .map_err(|err| FractonicaError::InvalidHeader(err.to_string()))?;

        let available = checked_entry_count(payload.len() / ENTRY_SIZE)?;
        let entry_count = header.entry_count.min(available);
        if entry_count < header.entry_count {
            debug!(
                announced = header.entry_count,
                available, "table image is truncated, clamping entry count"
            );
        }

        Ok((
            LeBytesSource {
                payload,
                entry_count,
            },
            header,
        ))
    }
}

impl TimestampSource for LeBytesSource<'_> {
    fn entry_count(&self) -> EntryIndex {
        self.entry_count
    }

    fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds> {
        if index >= self.entry_count {
            return None;
        }
        let start = index as usize * ENTRY_SIZE;
        let bytes: [u8; ENTRY_SIZE] = self
            .payload
            .get(start..start + ENTRY_SIZE)?
            .try_into()
            .ok()?;
        Some(UnixSeconds::from_le_bytes(bytes))
    }
}
