//! Producing `FRAC` tables.
//!
//! Tables are generated offline from an external event list. The writer is
//! the single place where ordering is checked: the query path trusts it.
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
};

use camino::Utf8Path;
use itertools::Itertools;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{UnixSeconds, ENTRY_SIZE, HEADER_SIZE},
    fractonica_errors::FractonicaError,
};

use super::{header::EphemHeader, memory_source::checked_entry_count};

/// One row of a timestamp CSV file.
#[derive(Debug, Deserialize)]
struct TimestampRecord {
    timestamp: UnixSeconds,
}

/// Ensure `timestamps` is non-decreasing.
///
/// Return
/// ----------
/// * [`FractonicaError::UnsortedTimestamps`] with the index of the first entry
///   smaller than its predecessor.
pub fn check_sorted(timestamps: &[UnixSeconds]) -> Result<(), FractonicaError> {
    match timestamps
        .iter()
        .tuple_windows()
        .position(|(previous, next)| next < previous)
    {
        Some(position) => Err(FractonicaError::UnsortedTimestamps(position + 1)),
        None => Ok(()),
    }
}

/// Encode a complete table (header and payload) in memory.
///
/// Arguments
/// -----------------
/// * `timestamps`: sorted epoch seconds.
///
/// Return
/// ----------
/// * The table bytes, or an error if the input is unsorted or too long.
pub fn encode_table(timestamps: &[UnixSeconds]) -> Result<Vec<u8>, FractonicaError> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + timestamps.len() * ENTRY_SIZE);
    write_table(&mut bytes, timestamps)?;
    Ok(bytes)
}

/// Stream a table into any writer.
pub fn write_table<W: Write>(
    mut writer: W,
    timestamps: &[UnixSeconds],
) -> Result<(), FractonicaError> {
    check_sorted(timestamps)?;
    let header = EphemHeader::new(checked_entry_count(timestamps.len())?);

    writer.write_all(&header.to_bytes())?;
    for timestamp in timestamps {
        writer.write_all(&timestamp.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write a table into it.
///
/// See also
/// ------------
/// * [`crate::ephemeris::FileSource::open`] – Reads the file back.
pub fn write_ephemeris_file(
    path: impl AsRef<Utf8Path>,
    timestamps: &[UnixSeconds],
) -> Result<(), FractonicaError> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    write_table(writer, timestamps)?;
    debug!(%path, entries = timestamps.len(), "wrote ephemeris table");
    Ok(())
}

/// Read epoch seconds from a CSV document with a `timestamp` column.
///
/// Other columns are ignored. The values are returned in file order, unsorted
/// input is only rejected later by [`write_ephemeris_file`].
///
/// Arguments
/// -----------------
/// * `reader`: any CSV source with a header row.
///
/// Return
/// ----------
/// * The timestamps, or [`FractonicaError::CsvError`] on malformed input.
pub fn read_csv_timestamps<R: Read>(reader: R) -> Result<Vec<UnixSeconds>, FractonicaError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let timestamps = csv_reader
        .deserialize::<TimestampRecord>()
        .map_ok(|record| record.timestamp)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(entries = timestamps.len(), "read timestamps from csv");
    Ok(timestamps)
}
