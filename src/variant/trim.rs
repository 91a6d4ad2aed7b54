//! Allele canonicalization by trimming bases shared between the reference
//! and every alternate allele.

use crate::variant::record::{RecordError, VariantRecord};

/// Left/right trim amounts shared by all alternate alleles of a record.
///
/// Trimming `ltrim` bases from the left and `rtrim` from the right of the
/// reference allele, and the same amounts from every alternate, removes
/// only bases common to the reference and every alternate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrimResult {
    /// Bases to drop from the left of every allele.
    pub ltrim: usize,
    /// Bases to drop from the right of every allele.
    pub rtrim: usize,
}

/// Common prefix/suffix trim for a single ref/alt pair.
///
/// The right trim is bounded by this pair's own remaining lengths after its
/// own left trim, not by any record-level amount.
pub(crate) fn pair_trim(reference: &[u8], alternate: &[u8]) -> TrimResult {
    let mut ltrim = 0;
    let mut rlen = reference.len();
    let mut alen = alternate.len();

    while rlen > 0 && alen > 0 && reference[ltrim] == alternate[ltrim] {
        ltrim += 1;
        rlen -= 1;
        alen -= 1;
    }

    let mut rtrim = 0;
    while rlen > 0 && alen > 0 && reference[ltrim + rlen - 1] == alternate[ltrim + alen - 1] {
        rtrim += 1;
        rlen -= 1;
        alen -= 1;
    }

    TrimResult { ltrim, rtrim }
}

/// Compute the minimal trim applicable uniformly across all alternates.
///
/// Each side is the minimum of the per-allele trims, computed independently
/// per allele: the binding constraint is the allele offering the least trim
/// potential on that side. A record without alternates cannot be
/// canonicalized and is rejected.
pub fn trim_alleles(record: &VariantRecord) -> Result<TrimResult, RecordError> {
    let reference = record.ref_allele();
    let mut alternates = record.alternates().iter();

    let first = alternates.next().ok_or_else(|| RecordError::NoAlternates {
        chrom: record.chrom.clone(),
        pos: record.pos + 1,
    })?;

    let mut trim = pair_trim(reference, first);
    for alternate in alternates {
        let t = pair_trim(reference, alternate);
        trim.ltrim = trim.ltrim.min(t.ltrim);
        trim.rtrim = trim.rtrim.min(t.rtrim);
    }

    Ok(trim)
}
