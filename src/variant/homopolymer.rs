//! Repeat-run annotation for indels.
//!
//! For a biallelic insertion or deletion, counts how many reference bases
//! adjacent to the indel continue the repeating unit the indel introduces
//! or removes. The unit is the non-empty side of the canonicalized
//! ref/alt pair and may be longer than one base; a plain homopolymer is
//! the single-base special case.

use thiserror::Error;

use crate::reference::{ReferenceError, ReferenceSource};
use crate::variant::record::{RecordError, VariantRecord};
use crate::variant::trim::trim_alleles;

/// Default reference context radius scanned around each indel.
pub const DEFAULT_WINDOW: usize = 100;

/// Errors raised during homopolymer annotation.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The reference provider failed or disagreed with the request.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    /// The record itself is malformed.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Length of the repeat run adjacent to an indel.
///
/// `reference` and `alternate` are the canonicalized (trimmed) allele
/// pair; `offset` is the indel's position within `window`. The unit is
/// whichever side is non-empty. Scans backward from just before the indel
/// matching the unit cyclically from its end, then forward from just after
/// the deleted reference bases matching from the unit's start; the run is
/// the sum of both counts.
pub fn repeat_run_length(
    reference: &[u8],
    alternate: &[u8],
    offset: usize,
    window: &[u8],
) -> usize {
    let unit = if reference.is_empty() {
        alternate
    } else {
        reference
    };
    if unit.is_empty() {
        return 0;
    }

    let len = unit.len();
    let mut run = 0;

    let mut k = len - 1;
    for &base in window[..offset.min(window.len())].iter().rev() {
        if base != unit[k] {
            break;
        }
        run += 1;
        k = if k == 0 { len - 1 } else { k - 1 };
    }

    let mut k = 0;
    let after = (offset + reference.len()).min(window.len());
    for &base in &window[after..] {
        if base != unit[k] {
            break;
        }
        run += 1;
        k = (k + 1) % len;
    }

    run
}

/// Per-record driver computing repeat-run annotations against a reference.
#[derive(Debug, Clone, Copy)]
pub struct HomopolymerAnnotator {
    window: usize,
}

impl HomopolymerAnnotator {
    /// Create an annotator scanning `window` bases either side of an indel.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Annotate one record, or return `None` when it does not qualify.
    ///
    /// Only biallelic records whose canonicalized alleles differ in length
    /// are considered; pure substitutions and multiallelic records receive
    /// no annotation. Runs of length 0 or 1 are not reported, matching the
    /// `HRun` convention of only flagging extendable repeats.
    pub fn annotate<S: ReferenceSource>(
        &self,
        record: &VariantRecord,
        source: &S,
    ) -> Result<Option<u32>, AnnotateError> {
        if record.alternates().len() != 1 {
            return Ok(None);
        }

        let trim = trim_alleles(record)?;
        let reference = record.ref_allele();
        let alternate = &record.alternates()[0];
        let ref_trimmed = &reference[trim.ltrim..reference.len() - trim.rtrim];
        let alt_trimmed = &alternate[trim.ltrim..alternate.len() - trim.rtrim];

        // Insertions and deletions only.
        if ref_trimmed.len() == alt_trimmed.len() {
            return Ok(None);
        }

        let chrom_len = source.chromosome_length(&record.chrom)?;
        record.check_bounds(chrom_len)?;

        let pos = record.pos as usize + trim.ltrim;
        let start = pos.saturating_sub(self.window);
        // Inclusive end coordinate, clipped to the chromosome.
        let end = (pos + ref_trimmed.len() + self.window).min(chrom_len.saturating_sub(1));
        let region = source.region(&record.chrom, start, end)?;
        if region.len() != end - start + 1 {
            return Err(ReferenceError::SizeMismatch {
                chrom: record.chrom.to_string(),
                start,
                end,
                expected: end - start + 1,
                actual: region.len(),
            }
            .into());
        }

        let run = repeat_run_length(ref_trimmed, alt_trimmed, pos - start, &region);
        Ok(if run > 1 { Some(run as u32) } else { None })
    }
}

impl Default for HomopolymerAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
