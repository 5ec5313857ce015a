use thiserror::Error;

use crate::lunar_time::LunarEvent;

#[derive(Error, Debug)]
pub enum FractonicaError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid ephemeris header: {0}")]
    InvalidHeader(String),

    #[error("Unknown ephemeris file magic: {0:#010x}")]
    UnknownMagic(u32),

    #[error("Resolution {base}^{digits} does not fit in 32 bits")]
    ResolutionOverflow { base: u8, digits: u8 },

    #[error("Invalid digit base: {0} (must be at least 2)")]
    InvalidBase(u8),

    #[error("Invalid clock configuration: {0}")]
    InvalidClockConfig(String),

    #[error("Unknown lunar event: {0}")]
    UnknownLunarEvent(String),

    #[error("No ephemeris table available for {0}")]
    MissingEventTable(LunarEvent),

    #[error("Timestamps are not sorted ascending at index {0}")]
    UnsortedTimestamps(usize),

    #[error("Too many entries for a 32-bit table: {0}")]
    TooManyEntries(usize),

    #[error("Error while reading CSV timestamps: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for FractonicaError {
    fn eq(&self, other: &Self) -> bool {
        use FractonicaError::*;
        match (self, other) {
            // Not comparable: equal when the variant matches
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (InvalidHeader(a), InvalidHeader(b)) => a == b,
            (UnknownMagic(a), UnknownMagic(b)) => a == b,
            (
                ResolutionOverflow {
                    base: a_base,
                    digits: a_digits,
                },
                ResolutionOverflow {
                    base: b_base,
                    digits: b_digits,
                },
            ) => a_base == b_base && a_digits == b_digits,
            (InvalidBase(a), InvalidBase(b)) => a == b,
            (InvalidClockConfig(a), InvalidClockConfig(b)) => a == b,
            (UnknownLunarEvent(a), UnknownLunarEvent(b)) => a == b,
            (MissingEventTable(a), MissingEventTable(b)) => a == b,
            (UnsortedTimestamps(a), UnsortedTimestamps(b)) => a == b,
            (TooManyEntries(a), TooManyEntries(b)) => a == b,

            _ => false,
        }
    }
}
