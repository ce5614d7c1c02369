// Range query builder tests
// Inclusive time intervals turned into half-open [start, stop) scan bounds.

use std::ops::Bound;

use rowkey::{CodecOptions, Error, Framing, KeyCodec, ScanBounds};

const PHONE: &[u8] = b"18725819633";

/// Encoded keys that an ascending `[start, stop)` scan would return, in scan
/// order, out of `timestamps`.
fn scan(codec: &KeyCodec, bounds: &ScanBounds, partition: &[u8], timestamps: &[u64]) -> Vec<u64> {
    let mut keys: Vec<Vec<u8>> = timestamps
        .iter()
        .map(|&ts| codec.encode(partition, ts).unwrap())
        .collect();
    keys.sort();
    keys.dedup();
    keys.into_iter()
        .filter(|k| bounds.contains(k))
        .map(|k| codec.decode(&k).unwrap().timestamp)
        .collect()
}

// =============================================================================
// Test 1: Endpoint inversion
// =============================================================================
// start encodes the later bound, stop encodes one unit before the earlier one.
#[test]
fn start_encodes_to_and_stop_encodes_before_from() {
    let codec = KeyCodec::default();
    let bounds = codec.build_range(PHONE, 20170601000000, 20170630235959).unwrap();

    assert_eq!(bounds.start, codec.encode(PHONE, 20170630235959).unwrap());
    assert_eq!(bounds.stop, codec.encode(PHONE, 20170601000000 - 1).unwrap());
    assert!(bounds.start < bounds.stop);
}

// =============================================================================
// Test 2: June bill, newest first
// =============================================================================
#[test]
fn month_scan_returns_rows_in_month_newest_first() {
    let codec = KeyCodec::default();
    let bounds = codec.build_range(PHONE, 20170601000000, 20170630235959).unwrap();

    let rows = scan(
        &codec,
        &bounds,
        PHONE,
        &[20170601000000, 20170615120000, 20170630235959, 20170701000000],
    );
    assert_eq!(rows, vec![20170630235959, 20170615120000, 20170601000000]);
}

// =============================================================================
// Test 3: Boundary-adjacent instants are excluded
// =============================================================================
#[test]
fn neighbours_of_the_interval_are_excluded() {
    let codec = KeyCodec::default();
    for (from, to) in [(1u64, 1u64), (100, 200), (5, 6), (1_000_000, 1_000_000)] {
        let bounds = codec.build_range(PHONE, from, to).unwrap();
        let rows = scan(&codec, &bounds, PHONE, &[from - 1, from, to, to + 1]);
        let mut expected = vec![to, from];
        expected.dedup();
        assert_eq!(rows, expected, "range [{from}, {to}]");
    }
}

// =============================================================================
// Test 4: from = 0 has no earlier instant
// =============================================================================
// stop falls back to the immediate successor of the timestamp-0 key.
#[test]
fn range_starting_at_zero_includes_zero() {
    let codec = KeyCodec::default();
    let bounds = codec.build_range(PHONE, 0, 3).unwrap();

    let mut expected_stop = codec.encode(PHONE, 0).unwrap();
    expected_stop.push(0x00);
    assert_eq!(bounds.stop, expected_stop);

    let rows = scan(&codec, &bounds, PHONE, &[0, 1, 3, 4]);
    assert_eq!(rows, vec![3, 1, 0]);
}

// =============================================================================
// Test 5: to = max_timestamp
// =============================================================================
#[test]
fn range_ending_at_ceiling() {
    let codec = KeyCodec::new(CodecOptions::default().with_max_timestamp(999)).unwrap();
    let bounds = codec.build_range(b"p", 998, 999).unwrap();
    let rows = scan(&codec, &bounds, b"p", &[997, 998, 999]);
    assert_eq!(rows, vec![999, 998]);
}

// =============================================================================
// Test 6: Other partitions stay out
// =============================================================================
// Length framing keeps "186" from reaching into "18612341234".
#[test]
fn bounds_do_not_cross_partitions() {
    let codec = KeyCodec::default();
    let bounds = codec.partition_bounds(b"186").unwrap();

    let mine = codec.encode(b"186", 5).unwrap();
    let longer = codec.encode(b"18612341234", 5).unwrap();
    let sibling = codec.encode(b"187", 5).unwrap();
    let smaller = codec.encode(b"185", 5).unwrap();

    assert!(bounds.contains(&mine));
    assert!(!bounds.contains(&longer));
    assert!(!bounds.contains(&sibling));
    assert!(!bounds.contains(&smaller));
}

#[test]
fn fixed_width_partitions_stay_apart() {
    let codec = KeyCodec::new(CodecOptions::default().with_framing(Framing::Fixed(11))).unwrap();
    let bounds = codec.partition_bounds(b"18612341234").unwrap();
    assert!(bounds.contains(&codec.encode(b"18612341234", 0).unwrap()));
    assert!(bounds.contains(&codec.encode(b"18612341234", codec.max_timestamp()).unwrap()));
    assert!(!bounds.contains(&codec.encode(b"18612341235", 7).unwrap()));
}

// =============================================================================
// Test 7: Error cases
// =============================================================================
#[test]
fn inverted_range_is_rejected() {
    let codec = KeyCodec::default();
    assert_eq!(
        codec.build_range(PHONE, 100, 50),
        Err(Error::InvalidRange { from: 100, to: 50 })
    );
}

#[test]
fn unencodable_bounds_are_invalid_input() {
    let codec = KeyCodec::new(CodecOptions::default().with_max_timestamp(999)).unwrap();
    assert!(matches!(codec.build_range(PHONE, 0, 1_000), Err(Error::InvalidInput(_))));
    assert!(matches!(codec.build_range(b"", 0, 1), Err(Error::InvalidInput(_))));
}

// =============================================================================
// Test 8: Rust range syntax
// =============================================================================
#[test]
fn scan_range_accepts_rust_ranges() {
    let codec = KeyCodec::default();
    assert_eq!(
        codec.scan_range(PHONE, 100..=200).unwrap(),
        codec.build_range(PHONE, 100, 200).unwrap()
    );
    assert_eq!(
        codec.scan_range(PHONE, 100..200).unwrap(),
        codec.build_range(PHONE, 100, 199).unwrap()
    );
    assert_eq!(
        codec.scan_range(PHONE, ..).unwrap(),
        codec.partition_bounds(PHONE).unwrap()
    );
    assert_eq!(
        codec
            .scan_range(PHONE, (Bound::Excluded(100), Bound::Included(200)))
            .unwrap(),
        codec.build_range(PHONE, 101, 200).unwrap()
    );
}

#[test]
fn empty_rust_range_is_invalid() {
    let codec = KeyCodec::default();
    assert!(matches!(
        codec.scan_range(PHONE, 5..5),
        Err(Error::InvalidRange { from: 5, to: 4 })
    ));
    assert!(matches!(
        codec.scan_range(PHONE, ..0),
        Err(Error::InvalidRange { .. })
    ));
}
