//! Thin adapters between htslib VCF/BCF streams and [`VariantRecord`].
//!
//! All parsing and serialization stays inside rust-htslib; this module
//! only converts records into the crate's model and builds writers that
//! carry the input header through (optionally extended with the `HRun`
//! INFO line).

use std::path::Path;

use anyhow::{Context, Result};
use rust_htslib::bcf::{self, header::Header, Read};

use crate::variant::VariantRecord;

const HRUN_INFO_LINE: &[u8] = br#"##INFO=<ID=HRun,Number=1,Type=Integer,Description="Homopolymer run in ref in bp (not including variant)">"#;

/// Open a VCF/BCF file for reading.
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<bcf::Reader> {
    bcf::Reader::from_path(path.as_ref())
        .with_context(|| format!("cannot read {}", path.as_ref().display()))
}

/// VCF writer on stdout carrying over the reader's header unchanged.
pub fn passthrough_writer(reader: &bcf::Reader) -> Result<bcf::Writer> {
    let header = Header::from_template(reader.header());
    bcf::Writer::from_stdout(&header, true, bcf::Format::Vcf)
        .context("cannot open stdout for VCF output")
}

/// Like [`passthrough_writer`], with the `HRun` INFO line appended.
pub fn hrun_writer(reader: &bcf::Reader) -> Result<bcf::Writer> {
    let mut header = Header::from_template(reader.header());
    header.push_record(HRUN_INFO_LINE);
    bcf::Writer::from_stdout(&header, true, bcf::Format::Vcf)
        .context("cannot open stdout for VCF output")
}

/// Convert a parsed htslib record into the crate's record model.
pub fn variant_from_bcf(record: &bcf::Record) -> Result<VariantRecord> {
    let rid = record.rid().context("record is missing a chromosome id")?;
    let chrom = std::str::from_utf8(record.header().rid2name(rid)?)
        .context("chromosome name is not valid UTF-8")?
        .to_string();
    let id = String::from_utf8_lossy(&record.id()).into_owned();
    let alleles: Vec<Vec<u8>> = record.alleles().iter().map(|a| a.to_vec()).collect();
    Ok(VariantRecord::new(rid, chrom, record.pos(), id, alleles))
}
