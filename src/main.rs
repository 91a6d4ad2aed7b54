use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_htslib::bcf::{self, Read};
use tracing::info;

use varkit::reference::{ChromosomeCache, FaidxSource};
use varkit::variant::{
    ContigConfig, ContigExtractor, HomopolymerAnnotator, ProximityFilter, SkipStats,
    VariantRecord, VariantView, DEFAULT_WINDOW,
};
use varkit::vcf;

#[derive(Parser, Debug)]
#[command(
    name = "varkit",
    about = "Streaming filters over VCF records and a reference genome"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter out entries within a minimum distance of each other.
    ///
    /// The input must be sorted by chromosome, then position. Prints the
    /// kept records as VCF to stdout.
    Dist {
        /// Input VCF/BCF.
        vcf: PathBuf,
        /// Minimum gap in bp required between kept records.
        #[arg(long, default_value_t = 0)]
        distance: u32,
        /// Canonicalize alleles before computing spans.
        #[arg(long)]
        trim: bool,
    },
    /// Annotate homopolymer run lengths (HRun INFO tag). Prints to stdout.
    Hprun {
        /// Reference FASTA, indexed with `samtools faidx`.
        reference: PathBuf,
        /// Input VCF/BCF.
        vcf: PathBuf,
        /// Reference context radius scanned around each indel.
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
    },
    /// Print flanking sequence windows around each variant as FASTA.
    Contigs {
        /// Reference FASTA, indexed with `samtools faidx`.
        reference: PathBuf,
        /// Input VCF/BCF.
        vcf: PathBuf,
        /// Bases of context on each side of the variant.
        #[arg(long, default_value_t = 50)]
        flank: usize,
        /// Canonicalize alleles before extracting.
        #[arg(long)]
        trim: bool,
        /// Do not emit the reference allele contig.
        #[arg(long)]
        no_reference: bool,
        /// Do not emit alternate allele contigs.
        #[arg(long)]
        no_alternates: bool,
        /// Skip alleles longer than this after trimming.
        #[arg(long)]
        max_allele_length: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Dist {
            vcf,
            distance,
            trim,
        } => run_dist(vcf, distance, trim),
        Commands::Hprun {
            reference,
            vcf,
            window,
        } => run_hprun(reference, vcf, window),
        Commands::Contigs {
            reference,
            vcf,
            flank,
            trim,
            no_reference,
            no_alternates,
            max_allele_length,
        } => run_contigs(
            reference,
            vcf,
            ContigConfig {
                flank,
                trim,
                include_reference: !no_reference,
                include_alternates: !no_alternates,
                max_allele_len: max_allele_length,
            },
        ),
    }
}

/// Parsed record alongside its raw htslib carrier, so kept records are
/// re-emitted byte-for-byte.
struct SourcedRecord {
    variant: VariantRecord,
    raw: bcf::Record,
}

impl VariantView for SourcedRecord {
    fn variant(&self) -> &VariantRecord {
        &self.variant
    }
}

fn run_dist(vcf_path: PathBuf, distance: u32, trim: bool) -> Result<()> {
    let mut reader = vcf::open_reader(&vcf_path)?;
    let mut writer = vcf::passthrough_writer(&reader)?;

    let mut filter: ProximityFilter<SourcedRecord> = ProximityFilter::new(distance as i64, trim);
    let mut kept = Vec::new();
    let (mut total, mut written) = (0u64, 0u64);

    for record in reader.records() {
        let raw = record.context("failed to read VCF record")?;
        total += 1;
        let variant = vcf::variant_from_bcf(&raw)?;
        filter.push(SourcedRecord { variant, raw }, &mut kept)?;
        written += drain_kept(&mut writer, &mut kept)?;
    }
    filter.finish(&mut kept)?;
    written += drain_kept(&mut writer, &mut kept)?;

    info!(total, written, distance, trim, "proximity filter complete");
    Ok(())
}

fn drain_kept(writer: &mut bcf::Writer, kept: &mut Vec<SourcedRecord>) -> Result<u64> {
    let mut written = 0;
    for record in kept.drain(..) {
        let mut raw = record.raw;
        writer.translate(&mut raw);
        writer.write(&raw).context("cannot write record")?;
        written += 1;
    }
    Ok(written)
}

fn run_hprun(reference_path: PathBuf, vcf_path: PathBuf, window: usize) -> Result<()> {
    let reference = FaidxSource::from_path(&reference_path).with_context(|| {
        format!(
            "cannot open reference {} (build the index with: samtools faidx)",
            reference_path.display()
        )
    })?;
    let mut reader = vcf::open_reader(&vcf_path)?;
    let mut writer = vcf::hrun_writer(&reader)?;
    let annotator = HomopolymerAnnotator::new(window);

    let (mut total, mut annotated) = (0u64, 0u64);
    for record in reader.records() {
        let mut raw = record.context("failed to read VCF record")?;
        total += 1;
        let variant = vcf::variant_from_bcf(&raw)?;
        writer.translate(&mut raw);
        if let Some(run) = annotator.annotate(&variant, &reference)? {
            raw.push_info_integer(b"HRun", &[run as i32])
                .context("cannot set HRun annotation")?;
            annotated += 1;
        }
        writer.write(&raw).context("cannot write record")?;
    }

    info!(total, annotated, window, "homopolymer annotation complete");
    Ok(())
}

fn run_contigs(reference_path: PathBuf, vcf_path: PathBuf, config: ContigConfig) -> Result<()> {
    let extractor = ContigExtractor::new(config)?;
    let reference = FaidxSource::from_path(&reference_path).with_context(|| {
        format!(
            "cannot open reference {} (build the index with: samtools faidx)",
            reference_path.display()
        )
    })?;
    let mut cache = ChromosomeCache::new(reference);
    let mut reader = vcf::open_reader(&vcf_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut stats = SkipStats::default();
    let (mut total, mut contigs) = (0u64, 0u64);

    for record in reader.records() {
        let raw = record.context("failed to read VCF record")?;
        total += 1;
        let variant = vcf::variant_from_bcf(&raw)?;
        let chrom = cache.get(variant.rid, &variant.chrom)?;
        for contig in extractor.extract(&variant, chrom, &mut stats)? {
            writeln!(out, ">{}", contig.name)?;
            out.write_all(&contig.sequence)?;
            writeln!(out)?;
            contigs += 1;
        }
    }
    out.flush()?;

    info!(
        total,
        contigs,
        records_skipped = stats.records_skipped,
        alleles_skipped = stats.alleles_skipped,
        "contig extraction complete"
    );
    Ok(())
}
