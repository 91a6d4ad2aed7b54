//! Flanking-sequence extraction around variants.
//!
//! For each record, emits one named sequence window per requested allele:
//! `flank` bases upstream of the (optionally canonicalized) variant, the
//! allele itself, and `flank` bases downstream, clipped to the chromosome.

use thiserror::Error;

use crate::variant::record::{RecordError, VariantRecord};
use crate::variant::trim::{trim_alleles, TrimResult};

/// Extraction options.
#[derive(Debug, Clone)]
pub struct ContigConfig {
    /// Bases of context extracted on each side of the variant.
    pub flank: usize,
    /// Canonicalize alleles before computing the window.
    pub trim: bool,
    /// Emit a contig for the reference allele.
    pub include_reference: bool,
    /// Emit contigs for alternate alleles.
    pub include_alternates: bool,
    /// Skip alleles longer than this after trimming.
    pub max_allele_len: Option<usize>,
}

impl Default for ContigConfig {
    fn default() -> Self {
        Self {
            flank: 50,
            trim: false,
            include_reference: true,
            include_alternates: true,
            max_allele_len: None,
        }
    }
}

/// Tally of records and alleles excluded by the length threshold.
///
/// Skips are summary statistics, never errors; the accumulator is passed
/// through the extraction call rather than kept as ambient state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipStats {
    /// Whole records excluded (over-long reference, or no surviving alternate).
    pub records_skipped: u64,
    /// Individual alternate alleles excluded while siblings were emitted.
    pub alleles_skipped: u64,
}

/// One extracted sequence window with its provenance-encoding name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContigRecord {
    /// Encodes id, chromosome, 1-based position, allele index, trimmed
    /// ref/allele strings, the variant's offset within the window and the
    /// trims applied.
    pub name: String,
    /// Extracted bases: upstream flank, allele, downstream flank.
    pub sequence: Vec<u8>,
}

/// Errors raised during contig extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Nonsensical option combination, rejected before any record is read.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The record itself is malformed.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Extracts flanking-sequence windows for a stream of records.
#[derive(Debug, Clone)]
pub struct ContigExtractor {
    config: ContigConfig,
}

impl ContigExtractor {
    /// Validate the configuration and build an extractor.
    pub fn new(config: ContigConfig) -> Result<Self, ExtractError> {
        if !config.include_reference && !config.include_alternates {
            return Err(ExtractError::InvalidConfig(
                "at least one of the reference and alternate alleles must be emitted".into(),
            ));
        }
        Ok(Self { config })
    }

    /// Extract the contigs for one record against its chromosome sequence.
    ///
    /// Returns an empty list when the record is excluded by the length
    /// threshold; the exclusion is tallied in `stats`.
    pub fn extract(
        &self,
        record: &VariantRecord,
        chrom: &[u8],
        stats: &mut SkipStats,
    ) -> Result<Vec<ContigRecord>, ExtractError> {
        record.check_bounds(chrom.len())?;

        let trim = if self.config.trim {
            trim_alleles(record)?
        } else {
            TrimResult::default()
        };

        let rlen = record.rlen();
        if let Some(max) = self.config.max_allele_len {
            if rlen - trim.ltrim - trim.rtrim > max {
                stats.records_skipped += 1;
                return Ok(Vec::new());
            }
        }

        // Trimmed variant span and the clipped window around it.
        let vstart = record.pos as usize + trim.ltrim;
        let vend = record.pos as usize + rlen - trim.rtrim;
        let start = vstart.saturating_sub(self.config.flank);
        let end = (vend + self.config.flank).min(chrom.len());
        let offset = vstart - start;

        let mut out = Vec::new();
        let mut alternates_seen = 0usize;
        let mut alternates_skipped = 0usize;

        for (index, allele) in record.alleles.iter().enumerate() {
            if index == 0 && !self.config.include_reference {
                continue;
            }
            if index > 0 && !self.config.include_alternates {
                continue;
            }

            let trimmed = &allele[trim.ltrim..allele.len() - trim.rtrim];
            if index > 0 {
                alternates_seen += 1;
                if let Some(max) = self.config.max_allele_len {
                    if trimmed.len() > max {
                        alternates_skipped += 1;
                        stats.alleles_skipped += 1;
                        continue;
                    }
                }
            }

            let mut sequence =
                Vec::with_capacity((vstart - start) + trimmed.len() + (end - vend));
            sequence.extend_from_slice(&chrom[start..vstart]);
            sequence.extend_from_slice(trimmed);
            sequence.extend_from_slice(&chrom[vend..end]);

            out.push(ContigRecord {
                name: contig_name(record, index, trimmed, offset, trim),
                sequence,
            });
        }

        // A record none of whose alternates fit is dropped entirely, even
        // if its reference contig was eligible.
        if alternates_seen > 0 && alternates_skipped == alternates_seen {
            stats.records_skipped += 1;
            return Ok(Vec::new());
        }

        Ok(out)
    }
}

/// Deterministic per-allele name; `-` stands in for an empty trimmed allele.
fn contig_name(
    record: &VariantRecord,
    index: usize,
    allele: &[u8],
    offset: usize,
    trim: TrimResult,
) -> String {
    let render = |bytes: &[u8]| {
        if bytes.is_empty() {
            "-".to_string()
        } else {
            String::from_utf8_lossy(bytes).into_owned()
        }
    };
    let reference = &record.ref_allele()[trim.ltrim..record.rlen() - trim.rtrim];
    format!(
        "{id}_{chrom}_{pos}_{index}_{reference}_{allele}_o{offset}_t{ltrim}.{rtrim}",
        id = record.id,
        chrom = record.chrom,
        pos = record.pos + 1,
        index = index,
        reference = render(reference),
        allele = render(allele),
        offset = offset,
        ltrim = trim.ltrim,
        rtrim = trim.rtrim,
    )
}
