use std::fmt;

use crate::{
    constants::{EntryIndex, UnixSeconds},
    time::{duration_to_text, format_utc},
};

use super::TimestampSource;

/// Summary of a timestamp table: where it starts and how long a cycle lasts
/// on average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodStats {
    pub start: UnixSeconds,
    /// Mean gap between consecutive entries, rounded to the second
    /// (half to even). Zero for a single-entry table.
    pub average_period: i64,
    pub entry_count: EntryIndex,
}

impl PeriodStats {
    /// Summarize a table from its first and last entries.
    ///
    /// The gaps between consecutive entries telescope, so their mean is
    /// `(last - first) / (entry_count - 1)` and only two reads are needed.
    ///
    /// Arguments
    /// -----------------
    /// * `source`: any timestamp table.
    ///
    /// Return
    /// ----------
    /// * `None` if the table is empty or an entry cannot be read.
    pub fn from_source<S>(source: &S) -> Option<Self>
    where
        S: TimestampSource + ?Sized,
    {
        let entry_count = source.entry_count();
        if entry_count == 0 {
            return None;
        }

        let start = source.timestamp(0)?;
        let average_period = if entry_count < 2 {
            0
        } else {
            let last = source.timestamp(entry_count - 1)?;
            let total = i128::from(last) - i128::from(start);
            (total as f64 / f64::from(entry_count - 1)).round_ties_even() as i64
        };

        Some(PeriodStats {
            start,
            average_period,
            entry_count,
        })
    }
}

impl fmt::Display for PeriodStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start:          {}", format_utc(self.start))?;
        writeln!(f, "Entries:        {}", self.entry_count)?;
        write!(
            f,
            "Average period: {}",
            duration_to_text(self.average_period)
        )
    }
}

#[cfg(test)]
mod period_stats_test {
    use std::cell::Cell;

    use super::*;
    use crate::ephemeris::MemorySource;

    struct ReadCounter<'a> {
        inner: MemorySource<'a>,
        reads: Cell<u32>,
    }

    impl TimestampSource for ReadCounter<'_> {
        fn entry_count(&self) -> EntryIndex {
            self.inner.entry_count()
        }

        fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds> {
            self.reads.set(self.reads.get() + 1);
            self.inner.timestamp(index)
        }
    }

    #[test]
    fn test_regular_table() {
        let source = MemorySource::new(&[0, 100, 200, 300]).unwrap();
        assert_eq!(
            PeriodStats::from_source(&source),
            Some(PeriodStats {
                start: 0,
                average_period: 100,
                entry_count: 4,
            })
        );
    }

    #[test]
    fn test_rounding_half_to_even() {
        // gaps 1 and 2: mean 1.5 -> 2
        let source = MemorySource::new(&[0, 1, 3]).unwrap();
        assert_eq!(PeriodStats::from_source(&source).unwrap().average_period, 2);
        // gaps 2 and 3: mean 2.5 -> 2
        let source = MemorySource::new(&[0, 2, 5]).unwrap();
        assert_eq!(PeriodStats::from_source(&source).unwrap().average_period, 2);
    }

    #[test]
    fn test_degenerate_tables() {
        let empty = MemorySource::new(&[]).unwrap();
        assert_eq!(PeriodStats::from_source(&empty), None);

        let single = MemorySource::new(&[42]).unwrap();
        let stats = PeriodStats::from_source(&single).unwrap();
        assert_eq!(stats.start, 42);
        assert_eq!(stats.average_period, 0);
    }

    #[test]
    fn test_display() {
        // Three new moons of early 2024
        let source = MemorySource::new(&[1_704_974_220, 1_707_519_540, 1_710_061_200]).unwrap();
        let stats = PeriodStats::from_source(&source).unwrap();
        assert_eq!(stats.average_period, 2_543_490);

        let expected = "\
Start:          2024-01-11T11:57:00 UTC
Entries:        3
Average period: 29 days 10 hours 31 mins 30 secs";
        assert_eq!(format!("{stats}"), expected);
    }

    #[test]
    fn test_reads_only_first_and_last() {
        let table: Vec<i64> = (0..10_000).map(|i| i * 2_551_443).collect();
        let source = ReadCounter {
            inner: MemorySource::new(&table).unwrap(),
            reads: Cell::new(0),
        };
        let stats = PeriodStats::from_source(&source).unwrap();
        assert_eq!(stats.average_period, 2_551_443);
        assert_eq!(stats.entry_count, 10_000);
        assert_eq!(source.reads.get(), 2);
    }
}
