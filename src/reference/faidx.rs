use std::path::Path;

use rust_htslib::faidx;

use super::{ReferenceError, ReferenceSource};

/// Indexed-FASTA reference backed by htslib's faidx.
pub struct FaidxSource {
    reader: faidx::Reader,
}

impl FaidxSource {
    /// Open `ref.fa`, requiring its `.fai` index alongside it
    /// (`samtools faidx ref.fa`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        Ok(Self {
            reader: faidx::Reader::from_path(path)?,
        })
    }
}

impl ReferenceSource for FaidxSource {
    fn chromosome(&self, name: &str) -> Result<Vec<u8>, ReferenceError> {
        let len = self.chromosome_length(name)?;
        if len == 0 {
            return Ok(Vec::new());
        }
        self.region(name, 0, len - 1)
    }

    fn region(&self, name: &str, start: usize, end: usize) -> Result<Vec<u8>, ReferenceError> {
        let bases = self
            .reader
            .fetch_seq(name, start, end)
            .map_err(|_| ReferenceError::NotFound(name.to_string()))?;
        Ok(bases.to_vec())
    }

    fn chromosome_length(&self, name: &str) -> Result<usize, ReferenceError> {
        // faidx reports a missing name as -1, which surfaces as u64::MAX.
        let len = self.reader.fetch_seq_len(name);
        if len == 0 || len == u64::MAX {
            return Err(ReferenceError::NotFound(name.to_string()));
        }
        Ok(len as usize)
    }
}
