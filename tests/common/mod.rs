#![allow(dead_code)]

use std::collections::HashMap;

use varkit::reference::{ReferenceError, ReferenceSource};
use varkit::variant::VariantRecord;

/// In-memory reference genome for pipeline tests.
pub struct MockReference {
    chroms: HashMap<String, Vec<u8>>,
}

impl MockReference {
    pub fn new(entries: &[(&str, &[u8])]) -> Self {
        Self {
            chroms: entries
                .iter()
                .map(|(name, seq)| (name.to_string(), seq.to_vec()))
                .collect(),
        }
    }
}

impl ReferenceSource for MockReference {
    fn chromosome(&self, name: &str) -> Result<Vec<u8>, ReferenceError> {
        self.chroms
            .get(name)
            .cloned()
            .ok_or_else(|| ReferenceError::NotFound(name.to_string()))
    }

    fn region(&self, name: &str, start: usize, end: usize) -> Result<Vec<u8>, ReferenceError> {
        let seq = self.chromosome(name)?;
        Ok(seq[start..=end.min(seq.len().saturating_sub(1))].to_vec())
    }

    fn chromosome_length(&self, name: &str) -> Result<usize, ReferenceError> {
        Ok(self.chromosome(name)?.len())
    }
}

pub fn record(rid: u32, chrom: &str, pos: i64, id: &str, alleles: &[&[u8]]) -> VariantRecord {
    VariantRecord::new(
        rid,
        chrom,
        pos,
        id,
        alleles.iter().map(|a| a.to_vec()).collect(),
    )
}
