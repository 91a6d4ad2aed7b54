use std::sync::Arc;

use thiserror::Error;

/// Errors raised while validating or canonicalizing a variant record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The reference allele extends past the end of its chromosome.
    #[error("ref allele out of bounds: {chrom}:{pos} {id} {reference} [chrom len: {chrom_len}]")]
    OutOfBounds {
        /// Chromosome the record claims to sit on.
        chrom: Arc<str>,
        /// 1-based position, as a user would see it in the VCF.
        pos: i64,
        /// Record identifier.
        id: String,
        /// Reference allele string.
        reference: String,
        /// Known length of the chromosome.
        chrom_len: usize,
    },
    /// Canonicalization needs at least one alternate allele to trim against.
    #[error("record {chrom}:{pos} has no alternate alleles")]
    NoAlternates {
        /// Chromosome the record sits on.
        chrom: Arc<str>,
        /// 1-based position.
        pos: i64,
    },
}

/// A single parsed variant record: one reference allele and zero or more
/// alternates at a genomic position.
///
/// Positions are 0-based. `alleles[0]` is always the reference allele; the
/// record's reference span is `[pos, pos + rlen)` where `rlen` is the
/// reference allele's length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    /// Chromosome identifier, stable within one input stream.
    pub rid: u32,
    /// Chromosome name.
    pub chrom: Arc<str>,
    /// 0-based start position on the chromosome.
    pub pos: i64,
    /// Record identifier (`.` when absent).
    pub id: String,
    /// Allele strings; index 0 is the reference, indices >= 1 are alternates.
    pub alleles: Vec<Vec<u8>>,
}

impl VariantRecord {
    /// Construct a new record. The allele list must carry the reference
    /// allele at index 0.
    pub fn new(
        rid: u32,
        chrom: impl Into<Arc<str>>,
        pos: i64,
        id: impl Into<String>,
        alleles: Vec<Vec<u8>>,
    ) -> Self {
        assert!(!alleles.is_empty(), "record must carry a reference allele");
        Self {
            rid,
            chrom: chrom.into(),
            pos,
            id: id.into(),
            alleles,
        }
    }

    /// The reference allele bytes.
    pub fn ref_allele(&self) -> &[u8] {
        self.alleles.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Alternate alleles (may be empty).
    pub fn alternates(&self) -> &[Vec<u8>] {
        self.alleles.get(1..).unwrap_or_default()
    }

    /// Length of the reference allele.
    pub fn rlen(&self) -> usize {
        self.ref_allele().len()
    }

    /// Exclusive end of the record's reference span.
    pub fn end(&self) -> i64 {
        self.pos + self.rlen() as i64
    }

    /// Verify the reference span lies within the chromosome.
    pub fn check_bounds(&self, chrom_len: usize) -> Result<(), RecordError> {
        if self.pos < 0 || self.end() > chrom_len as i64 {
            return Err(RecordError::OutOfBounds {
                chrom: Arc::clone(&self.chrom),
                pos: self.pos + 1,
                id: self.id.clone(),
                reference: String::from_utf8_lossy(self.ref_allele()).into_owned(),
                chrom_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pos: i64, alleles: &[&[u8]]) -> VariantRecord {
        VariantRecord::new(
            0,
            "chr1",
            pos,
            "rs1",
            alleles.iter().map(|a| a.to_vec()).collect(),
        )
    }

    #[test]
    fn span_uses_reference_allele_length() {
        let rec = record(10, &[b"ACGT", b"A"]);
        assert_eq!(rec.rlen(), 4);
        assert_eq!(rec.end(), 14);
    }

    #[test]
    fn bounds_check_rejects_overhanging_ref() {
        let rec = record(8, &[b"ACGT", b"A"]);
        assert!(rec.check_bounds(12).is_ok());
        assert!(matches!(
            rec.check_bounds(11),
            Err(RecordError::OutOfBounds { chrom_len: 11, .. })
        ));
    }

    #[test]
    fn alternates_of_ref_only_record_are_empty() {
        let rec = record(0, &[b"A"]);
        assert!(rec.alternates().is_empty());
    }
}
