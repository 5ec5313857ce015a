#![allow(dead_code)]

use std::cell::Cell;

use approx::assert_relative_eq;
use camino::{Utf8Path, Utf8PathBuf};
use fractonica::ephemeris::{writer::write_ephemeris_file, FractionResult, TimestampSource};
use rand::{rngs::StdRng, Rng};

/// New moons of 2024 (UTC, minute precision).
pub const NEW_MOONS_2024: [i64; 13] = [
    1_704_974_220, // 2024-01-11 11:57
    1_707_519_540, // 2024-02-09 22:59
    1_710_061_200, // 2024-03-10 09:00
    1_712_600_460, // 2024-04-08 18:21
    1_715_138_520, // 2024-05-08 03:22
    1_717_677_480, // 2024-06-06 12:38
    1_720_220_220, // 2024-07-05 22:57
    1_722_769_980, // 2024-08-04 11:13
    1_725_328_500, // 2024-09-03 01:55
    1_727_894_940, // 2024-10-02 18:49
    1_730_465_220, // 2024-11-01 12:47
    1_733_034_060, // 2024-12-01 06:21
    1_735_597_620, // 2024-12-30 22:27
];

/// Route library logs to the test output, honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is not UTF-8")
}

/// Write `timestamps` as `<dir>/<name>` and return the full path.
pub fn write_table(dir: &Utf8Path, name: &str, timestamps: &[i64]) -> Utf8PathBuf {
    let path = dir.join(name);
    write_ephemeris_file(&path, timestamps).expect("failed to write ephemeris table");
    path
}

/// A sorted table of `len` timestamps with random gaps in `0..=max_gap`.
/// Zero gaps produce duplicates.
pub fn random_sorted_table(rng: &mut StdRng, len: usize, max_gap: i64) -> Vec<i64> {
    let mut current = rng.random_range(-1_000_000_000..1_000_000_000);
    (0..len)
        .map(|_| {
            current += rng.random_range(0..=max_gap);
            current
        })
        .collect()
}

pub fn assert_fraction_eq(actual: &FractionResult, expected: &FractionResult) {
    assert_eq!(actual.valid, expected.valid);
    assert_eq!(actual.bin, expected.bin);
    assert_eq!(actual.bin_octal, expected.bin_octal);
    assert_eq!(actual.past_index, expected.past_index);
    assert_eq!(actual.future_index, expected.future_index);
    assert_relative_eq!(actual.normalized, expected.normalized, epsilon = 1e-15);
    assert_relative_eq!(actual.progress, expected.progress, epsilon = 1e-15);
}

/// Wraps a source and counts the entries read through it.
pub struct CountingSource<S> {
    pub inner: S,
    reads: Cell<usize>,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        CountingSource {
            inner,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl<S: TimestampSource> TimestampSource for CountingSource<S> {
    fn entry_count(&self) -> u32 {
        self.inner.entry_count()
    }

    fn timestamp(&self, index: u32) -> Option<i64> {
        self.reads.set(self.reads.get() + 1);
        self.inner.timestamp(index)
    }
}
