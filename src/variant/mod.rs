//! Variant-record model and the streaming filters built over it.
//!
//! This module exposes the shared algorithmic core: allele
//! canonicalization, the proximity filter, homopolymer-run annotation and
//! flanking-contig extraction. Each filter operates independently as a
//! pipeline stage over a position-sorted record stream.

mod contig;
mod homopolymer;
mod proximity;
mod record;
mod trim;

pub use contig::{ContigConfig, ContigExtractor, ContigRecord, ExtractError, SkipStats};
pub use homopolymer::{
    repeat_run_length, AnnotateError, HomopolymerAnnotator, DEFAULT_WINDOW,
};
pub use proximity::{ProximityFilter, VariantView};
pub use record::{RecordError, VariantRecord};
pub use trim::{trim_alleles, TrimResult};
