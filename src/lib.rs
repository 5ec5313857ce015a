//! # Fractonica
//!
//! Phase clock engine for astronomical cycles. Pre-computed event epochs
//! (new moons, apogees, nodal crossings, ...) are stored in compact sorted
//! tables; given "now", the engine finds the surrounding pair of events and
//! reports how far the current cycle has progressed, both as a normalized
//! fraction and as a discrete dial bin.
//!
//! ```rust
//! use fractonica::ephemeris::{fraction_at, MemorySource};
//!
//! let table = MemorySource::new(&[1_000, 2_000]).unwrap();
//! let (result, window) = fraction_at(&table, 1_500, 4, None);
//! assert!(result.valid);
//! assert_eq!(result.bin, 1);
//! assert!(window.is_some());
//! ```
pub mod clock;
pub mod constants;
pub mod ephemeris;
pub mod fractonica_errors;
pub mod lunar_time;
pub mod time;
