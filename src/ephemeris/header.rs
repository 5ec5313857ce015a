//! `FRAC` table header parsing utilities.
//!
//! This module provides a parser, an encoder and a pretty-printer for the
//! fixed 16-byte header that starts every Fractonica ephemeris table.
//!
//! # What the header contains
//!
//! * **`magic`**: Format identifier, `0x43415246` (the ASCII bytes `"FRAC"`).
//! * **`entry_count`**: Number of 8-byte timestamps following the header.
//! * **`reserved`**: Unused, written as zero.
//!
//! All fields are little-endian. The magic is exposed but **not** validated
//! by [`EphemHeader::parse`]; callers decide whether to reject unknown files
//! (see [`EphemHeader::has_valid_magic`]).
//!
//! # Example
//!
//! ```rust
//! use fractonica::ephemeris::EphemHeader;
//!
//! let bytes = EphemHeader::new(512).to_bytes();
//! let (_rest, header) = EphemHeader::parse(&bytes).expect("valid header");
//! assert!(header.has_valid_magic());
//! assert_eq!(header.entry_count, 512);
//! ```
use std::fmt;

use nom::{
    number::complete::{le_u32, le_u64},
    IResult,
};

use crate::constants::{ENTRY_SIZE, FRACTONICA_MAGIC, HEADER_SIZE};

/// In-memory representation of the 16-byte table header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct EphemHeader {
    /// Format identifier, `FRACTONICA_MAGIC` for well-formed files.
    pub magic: u32,
    /// Number of timestamps stored after the header.
    pub entry_count: u32,
    /// Reserved word.
    pub reserved: u64,
}

impl EphemHeader {
    /// Build the header of a table holding `entry_count` timestamps.
    pub fn new(entry_count: u32) -> Self {
        EphemHeader {
            magic: FRACTONICA_MAGIC,
            entry_count,
            reserved: 0,
        }
    }

    /// Parse the first 16 bytes of a table into an [`EphemHeader`].
    ///
    /// Arguments
    /// -----------------
    /// * `input`: A byte slice starting at the beginning of the file, at least 16 bytes long.
    ///
    /// Return
    /// ----------
    /// * An [`IResult`] whose value is a tuple `(remaining, header)`. On success,
    ///   `remaining` points to the timestamp payload.
    ///
    /// See also
    /// ------------
    /// * [`EphemHeader::to_bytes`] – Inverse operation.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, magic) = le_u32(input)?;
        let (input, entry_count) = le_u32(input)?;
        let (input, reserved) = le_u64(input)?;
        Ok((
            input,
            EphemHeader {
                magic,
                entry_count,
                reserved,
            },
        ))
    }

    /// Encode the header in its little-endian on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.entry_count.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.reserved.to_le_bytes());
        bytes
    }

    /// Whether the magic word identifies a Fractonica table.
    pub fn has_valid_magic(&self) -> bool {
        self.magic == FRACTONICA_MAGIC
    }

    /// Size in bytes of the timestamp payload announced by the header.
    pub fn payload_len(&self) -> u64 {
        u64::from(self.entry_count) * ENTRY_SIZE as u64
    }
}

impl fmt::Display for EphemHeader {
    /// Render a fixed-width table summarizing the header fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 14;
        const VALUE_WIDTH: usize = 40;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let magic = if self.has_valid_magic() {
            format!("{:#010x} (FRAC)", self.magic)
        } else {
            format!("{:#010x} (unknown)", self.magic)
        };

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "FRAC Header",
            "",
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "Magic",
            magic,
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "Entries",
            format!("{} timestamps", self.entry_count),
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "Reserved",
            self.reserved,
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")
    }
}
