pub mod error;
pub mod params;

pub mod align;
pub mod io;
pub mod junction;
pub mod stats;

use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::align::record::{self, AlignmentRecord};
use crate::align::Cigar;
use crate::error::Error;
use crate::junction::{GeneRecord, JunctionReport, JunctionTable};
use crate::params::Parameters;
use crate::stats::RunStats;

/// Top-level dispatcher. Called from `main()` after CLI parsing.
///
/// Pass 1 fills the junction table from the SAM file; pass 2 reports it per
/// gene. A missing input skips its pass; the report is written either way.
pub fn run(params: &Parameters) -> anyhow::Result<RunStats> {
    params.validate()?;

    info!("sjcount v{}", env!("CARGO_PKG_VERSION"));
    info!("SAM file: {}", params.sam_file.display());
    info!("Genes file: {}", params.genes_file.display());

    let decompress = params.read_files_command.as_deref();
    let mut stats = RunStats::new();
    let mut table = JunctionTable::new();

    match io::open_input(&params.sam_file, decompress) {
        Ok(reader) => count_junctions(reader, &params.sam_file, &mut table, &mut stats)?,
        Err(Error::NotFound(path)) => report_missing(&path),
        Err(e) => return Err(e.into()),
    }

    let mut report = JunctionReport::create(&params.out_file)?;

    match io::open_input(&params.genes_file, decompress) {
        Ok(reader) => report_genes(reader, &params.genes_file, &table, &mut report, &mut stats)?,
        Err(Error::NotFound(path)) => report_missing(&path),
        Err(e) => return Err(e.into()),
    }

    report.finish()?;
    stats.print_summary();
    Ok(stats)
}

/// Alignment pass: record junctions of every unique, spliced alignment
pub fn count_junctions<R: BufRead>(
    reader: R,
    path: &Path,
    table: &mut JunctionTable,
    stats: &mut RunStats,
) -> Result<(), Error> {
    info!("Counting junctions from {}", path.display());

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| Error::io(e, path))?;

        if record::is_header(&line) {
            stats.header_lines += 1;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let rec = AlignmentRecord::from_line(&line, line_num)?;
        let (is_unique, has_skip) = (rec.is_unique(), rec.has_skip());
        stats.record_alignment(is_unique, has_skip);
        if !(is_unique && has_skip) {
            continue;
        }

        let cigar: Cigar = rec.cigar.parse()?;
        junction::extract_junctions(&cigar, rec.pos, table)?;
        let added = cigar.skip_count();
        stats.junction_reads += added as u64;
        debug!(
            "line {}: {}:{} {} -> {} junction(s)",
            line_num, rec.rname, rec.pos, cigar, added
        );
    }

    stats.distinct_junctions = table.len() as u64;
    info!(
        "Recorded {} junction reads across {} distinct junctions",
        stats.junction_reads, stats.distinct_junctions
    );
    Ok(())
}

/// Gene pass: write the junctions contained in each gene, in file order
///
/// The first line of the gene file is a header and is skipped.
pub fn report_genes<R: BufRead, W: Write>(
    reader: R,
    path: &Path,
    table: &JunctionTable,
    report: &mut JunctionReport<W>,
    stats: &mut RunStats,
) -> Result<(), Error> {
    info!("Matching junctions to genes from {}", path.display());

    for line in reader.lines().skip(1) {
        let line = line.map_err(|e| Error::io(e, path))?;
        if line.trim().is_empty() {
            continue;
        }

        let gene = GeneRecord::from_line(&line)?;
        let hits = table.within(gene.range);
        let written = report.write_gene(&gene.gene_id, &hits)?;
        stats.record_gene(written);
        debug!(
            "{} ({}) {}:{}..{} -> {} junction(s)",
            gene.gene_id, gene.gene_name, gene.seqname, gene.range.start, gene.range.end, written
        );
    }

    Ok(())
}

/// A missing input is reported on stdout and its pass is skipped.
fn report_missing(path: &Path) {
    let err = Error::NotFound(path.to_path_buf());
    warn!("{}; skipping", err);
    println!("Error: {}", err);
}
