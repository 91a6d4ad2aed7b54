mod common;

use common::{record, MockReference};
use varkit::variant::HomopolymerAnnotator;

#[test]
fn deletion_inside_a_homopolymer_reports_remaining_run() {
    //                                        0123456789
    let reference = MockReference::new(&[("chr1", b"TTCAAAAGTT")]);
    // "CAA" -> "C": deletes two bases of the AAAA run, leaving two.
    let rec = record(0, "chr1", 2, "del", &[b"CAA", b"C"]);
    let annotator = HomopolymerAnnotator::default();
    assert_eq!(annotator.annotate(&rec, &reference).unwrap(), Some(2));
}

#[test]
fn insertion_between_run_copies_counts_both_sides() {
    //                                        0123456789
    let reference = MockReference::new(&[("chr1", b"GACACACGGT")]);
    // Insert "AC" in the middle of an (AC)3 run: copies on both sides of
    // the insertion point extend the unit cyclically.
    let rec = record(0, "chr1", 4, "ins", &[b"C", b"CAC"]);
    let annotator = HomopolymerAnnotator::default();
    assert_eq!(annotator.annotate(&rec, &reference).unwrap(), Some(6));
}

#[test]
fn run_never_exceeds_the_fetched_context() {
    let seq = vec![b'A'; 400];
    let reference = MockReference::new(&[("chr1", &seq)]);
    let rec = record(0, "chr1", 200, "ins", &[b"A", b"AA"]);
    let annotator = HomopolymerAnnotator::new(50);
    let run = annotator.annotate(&rec, &reference).unwrap().unwrap();
    // 50 bases upstream plus the inclusive 51-base downstream fetch.
    assert_eq!(run, 101);
}

#[test]
fn substitutions_and_multiallelics_are_left_alone() {
    let reference = MockReference::new(&[("chr1", b"AAAAAAAA")]);
    let annotator = HomopolymerAnnotator::default();

    let substitution = record(0, "chr1", 3, "sub", &[b"A", b"T"]);
    assert_eq!(annotator.annotate(&substitution, &reference).unwrap(), None);

    let multi = record(0, "chr1", 3, "multi", &[b"A", b"AT", b"AG"]);
    assert_eq!(annotator.annotate(&multi, &reference).unwrap(), None);
}
