mod common;

use proptest::prelude::*;

use common::record;
use varkit::variant::{ProximityFilter, VariantRecord};

fn ids(records: &[VariantRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn kept_records_respect_the_distance_on_each_chromosome() {
    let records = vec![
        record(0, "chr1", 100, "a", &[b"ACGTA", b"A"]),
        record(0, "chr1", 106, "b", &[b"ACGT", b"A"]),
        record(0, "chr1", 400, "c", &[b"A", b"T"]),
        record(1, "chr2", 401, "d", &[b"A", b"T"]),
    ];
    let kept = ProximityFilter::filter(records, 5, false).unwrap();
    assert_eq!(ids(&kept), ["c", "d"]);

    // Consecutive kept records on one chromosome always clear the gap.
    let mut last_end: Option<(u32, i64)> = None;
    for rec in &kept {
        if let Some((rid, end)) = last_end {
            if rid == rec.rid {
                assert!(end + 5 <= rec.pos);
            }
        }
        last_end = Some((rec.rid, rec.end()));
    }
}

#[test]
fn streaming_push_matches_batch_filtering() {
    let records: Vec<_> = [0i64, 3, 40, 44, 90, 200, 203, 500]
        .iter()
        .enumerate()
        .map(|(i, &pos)| record(0, "chr1", pos, &format!("r{i}"), &[b"AC", b"A"]))
        .collect();

    let batch = ProximityFilter::filter(records.clone(), 10, false).unwrap();

    let mut filter = ProximityFilter::new(10, false);
    let mut streamed = Vec::new();
    for rec in records {
        filter.push(rec, &mut streamed).unwrap();
    }
    filter.finish(&mut streamed).unwrap();

    assert_eq!(batch, streamed);
}

proptest! {
    // Only relative gaps matter: shifting a whole chromosome's coordinates
    // by a constant must not change which records survive.
    #[test]
    fn filtering_is_shift_invariant(
        gaps in proptest::collection::vec((0i64..40, 1usize..6), 1..30),
        shift in 0i64..100_000,
        distance in 0i64..25,
    ) {
        let mut pos = 10;
        let mut records = Vec::new();
        for (i, &(gap, rlen)) in gaps.iter().enumerate() {
            pos += gap;
            records.push(VariantRecord::new(
                0,
                "chr1",
                pos,
                format!("r{i}"),
                vec![vec![b'A'; rlen], b"A".to_vec()],
            ));
        }

        let shifted: Vec<_> = records
            .iter()
            .cloned()
            .map(|mut r| {
                r.pos += shift;
                r
            })
            .collect();

        let kept = ProximityFilter::filter(records, distance, false).unwrap();
        let kept_shifted = ProximityFilter::filter(shifted, distance, false).unwrap();
        prop_assert_eq!(ids(&kept), ids(&kept_shifted));
    }

    // Every pair of consecutive kept records on the same chromosome
    // clears the configured distance.
    #[test]
    fn kept_neighbors_always_clear_the_gap(
        gaps in proptest::collection::vec((0i64..40, 1usize..6), 1..40),
        distance in 0i64..25,
    ) {
        let mut pos = 0;
        let mut records = Vec::new();
        for (i, &(gap, rlen)) in gaps.iter().enumerate() {
            pos += gap;
            records.push(VariantRecord::new(
                0,
                "chr1",
                pos,
                format!("r{i}"),
                vec![vec![b'A'; rlen], b"A".to_vec()],
            ));
        }

        let kept = ProximityFilter::filter(records, distance, false).unwrap();
        for pair in kept.windows(2) {
            prop_assert!(pair[0].end() + distance <= pair[1].pos);
        }
    }
}
