mod common;

use common::{init_tracing, random_sorted_table, utf8_dir, write_table, NEW_MOONS_2024};
use fractonica::constants::INVALID_TIMESTAMP;
use fractonica::ephemeris::{
    find_closest, fraction_at,
    writer::{encode_table, read_csv_timestamps},
    FileSource, LeBytesSource, MemorySource, PeriodStats, TimestampSource,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_file_matches_memory_source() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&utf8_dir(&dir), "new_moon.bin", &NEW_MOONS_2024);

    let file = FileSource::open_checked(&path).unwrap();
    let memory = MemorySource::new(&NEW_MOONS_2024).unwrap();

    assert_eq!(file.entry_count(), memory.entry_count());
    assert_eq!(file.header().entry_count, 13);
    for index in 0..file.entry_count() + 3 {
        assert_eq!(file.get_timestamp(index), memory.get_timestamp(index));
    }
    assert_eq!(file.get_timestamp(13), INVALID_TIMESTAMP);
}

#[test]
fn test_random_tables_agree_across_sources() {
    let mut rng = StdRng::seed_from_u64(0x46524143);
    let dir = tempfile::tempdir().unwrap();
    let dir_path = utf8_dir(&dir);

    for round in 0..8 {
        let table = random_sorted_table(&mut rng, 1 + round * 37, 5_000);
        let path = write_table(&dir_path, &format!("table_{round}.bin"), &table);

        let file = FileSource::open(&path).unwrap();
        let memory = MemorySource::new(&table).unwrap();
        let image = encode_table(&table).unwrap();
        let (bytes, header) = LeBytesSource::from_file_image(&image).unwrap();
        assert_eq!(&header, file.header());

        let (first, last) = (table[0], table[table.len() - 1]);
        let mut file_window = None;
        let mut memory_window = None;
        for query in (first - 10..=last + 10).step_by(997) {
            assert_eq!(find_closest(&file, query), find_closest(&memory, query));
            assert_eq!(find_closest(&bytes, query), find_closest(&memory, query));

            let (from_file, window) = fraction_at(&file, query, 512, file_window);
            file_window = window;
            let (from_memory, window) = fraction_at(&memory, query, 512, memory_window);
            memory_window = window;
            assert_eq!(from_file, from_memory, "round {round}, query {query}");
            assert_eq!(file_window, memory_window);
        }

        assert_eq!(
            PeriodStats::from_source(&file),
            PeriodStats::from_source(&memory)
        );
        file.close();
    }
}

#[test]
fn test_csv_to_table() {
    let csv = NEW_MOONS_2024
        .iter()
        .fold(String::from("timestamp\n"), |mut acc, ts| {
            acc.push_str(&format!("{ts}\n"));
            acc
        });
    let timestamps = read_csv_timestamps(csv.as_bytes()).unwrap();
    assert_eq!(timestamps, NEW_MOONS_2024);

    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&utf8_dir(&dir), "new_moon.bin", &timestamps);
    let file = FileSource::open_checked(&path).unwrap();

    let stats = PeriodStats::from_source(&file).unwrap();
    assert_eq!(stats.start, NEW_MOONS_2024[0]);
    assert_eq!(stats.entry_count, 13);
    // 2024-12-30 22:27 minus 2024-01-11 11:57, over 12 lunations
    assert_eq!(stats.average_period, 2_551_950);
}

#[test]
fn test_empty_file_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&utf8_dir(&dir), "empty.bin", &[]);

    let file = FileSource::open_checked(&path).unwrap();
    assert!(file.is_empty());
    let result = find_closest(&file, 0);
    assert!(!result.found_past && !result.found_future);
    let (fraction, window) = fraction_at(&file, 0, 8, None);
    assert!(!fraction.valid);
    assert_eq!(window, None);
}
