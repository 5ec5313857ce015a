//! # Constants and type definitions for Fractonica
//!
//! This module centralizes the **binary table format constants**, the
//! **invalid timestamp sentinel**, the **time unit conversions** and the
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Layout of the `FRAC` ephemeris table (magic, header size, entry width)
//! - Sentinel returned when a timestamp cannot be read
//! - Unit conversions (seconds per minute, hour, day and 365-day year)
//! - Default clock resolution (`8^4` bins per cycle)

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Signed count of seconds since 1970-01-01T00:00:00 UTC.
pub type UnixSeconds = i64;

/// Index of an entry inside a timestamp table.
pub type EntryIndex = u32;

// -------------------------------------------------------------------------------------------------
// Binary table format
// -------------------------------------------------------------------------------------------------

/// Magic number at offset 0 of every table, the ASCII bytes `"FRAC"` read little-endian.
pub const FRACTONICA_MAGIC: u32 = 0x4341_5246;

/// Size in bytes of the fixed header (`magic`, `entry_count`, `reserved`).
pub const HEADER_SIZE: usize = 16;

/// Size in bytes of one timestamp entry.
pub const ENTRY_SIZE: usize = 8;

/// Value returned by [`crate::ephemeris::TimestampSource::get_timestamp`] when
/// the index is out of range or the backing store fails (`u64::MAX` reinterpreted).
pub const INVALID_TIMESTAMP: UnixSeconds = u64::MAX as i64;

// -------------------------------------------------------------------------------------------------
// Time units
// -------------------------------------------------------------------------------------------------

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Seconds in one civil day
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Seconds in a 365-day "year" as used by duration rendering
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Clock defaults
// -------------------------------------------------------------------------------------------------

/// Default digit base of the lunar clock dials
pub const DEFAULT_BASE: u8 = 8;

/// Default number of dial digits (rings)
pub const DEFAULT_DIGITS: u8 = 4;
