//! Reference genome access: a provider trait, the htslib-backed
//! implementation and a current-chromosome cache for sorted streams.

mod faidx;

pub use faidx::FaidxSource;

use thiserror::Error;

/// Errors raised by reference providers and their callers.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The chromosome (or its index entry) is absent from the reference.
    #[error("cannot find chromosome '{0}' in the reference")]
    NotFound(String),
    /// A fetched region disagrees with the requested span; indicates a
    /// provider bug or a corrupted index.
    #[error("region {chrom}:{start}-{end} returned {actual} bases, expected {expected}")]
    SizeMismatch {
        /// Chromosome name requested.
        chrom: String,
        /// Inclusive region start.
        start: usize,
        /// Inclusive region end.
        end: usize,
        /// `end - start + 1`.
        expected: usize,
        /// Bases actually returned.
        actual: usize,
    },
    /// Failure in the underlying htslib reader.
    #[error("reference backend error: {0}")]
    Backend(#[from] rust_htslib::errors::Error),
}

/// Provider of reference bases by chromosome name.
///
/// Regions use inclusive coordinates on both ends; a successful `region`
/// call is expected to return exactly `end - start + 1` bases, and callers
/// verify this.
pub trait ReferenceSource {
    /// Full sequence of the named chromosome.
    fn chromosome(&self, name: &str) -> Result<Vec<u8>, ReferenceError>;

    /// Bases in the inclusive range `start..=end` of the named chromosome.
    fn region(&self, name: &str, start: usize, end: usize) -> Result<Vec<u8>, ReferenceError>;

    /// Length of the named chromosome.
    fn chromosome_length(&self, name: &str) -> Result<usize, ReferenceError>;
}

struct CachedChromosome {
    rid: u32,
    sequence: Vec<u8>,
}

/// Caches the current chromosome's sequence across consecutive records.
///
/// Sorted streams touch chromosomes in runs, so the cache holds exactly
/// one sequence and replaces it wholesale when the record's chromosome
/// identifier changes.
pub struct ChromosomeCache<S> {
    source: S,
    current: Option<CachedChromosome>,
}

impl<S: ReferenceSource> ChromosomeCache<S> {
    /// Wrap a reference source with a single-chromosome cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
        }
    }

    /// The sequence for `name`, fetched only when `rid` differs from the
    /// cached chromosome's identifier.
    pub fn get(&mut self, rid: u32, name: &str) -> Result<&[u8], ReferenceError> {
        if !self.current.as_ref().is_some_and(|c| c.rid == rid) {
            let sequence = self.source.chromosome(name)?;
            self.current = Some(CachedChromosome { rid, sequence });
        }
        Ok(self
            .current
            .as_ref()
            .map(|c| c.sequence.as_slice())
            .unwrap_or_default())
    }
}
