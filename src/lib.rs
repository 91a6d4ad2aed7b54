//! # varkit
//!
//! Streaming filters over genomic variant records paired with a reference
//! genome: allele canonicalization, proximity filtering, homopolymer-run
//! annotation and flanking-contig extraction.
//!
//! Records are consumed one at a time from a position-sorted stream and
//! results are produced in the same order; memory stays bounded by one
//! cached chromosome sequence plus a three-slot record buffer.
//!
//! ## Usage example
//!
//! ```
//! use varkit::variant::{ProximityFilter, VariantRecord};
//!
//! let records = vec![
//!     VariantRecord::new(0, "chr1", 100, "a", vec![b"ACGT".to_vec(), b"A".to_vec()]),
//!     VariantRecord::new(0, "chr1", 103, "b", vec![b"C".to_vec(), b"T".to_vec()]),
//! ];
//! let kept = ProximityFilter::filter(records, 10, false)?;
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].id, "a");
//! # Ok::<(), varkit::variant::RecordError>(())
//! ```

#![warn(missing_docs)]

pub mod reference;
pub mod variant;
pub mod vcf;

// Re-exports for convenience
pub use reference::{ChromosomeCache, FaidxSource, ReferenceError, ReferenceSource};
pub use variant::{
    trim_alleles, ContigExtractor, HomopolymerAnnotator, ProximityFilter, TrimResult,
    VariantRecord,
};
