/// Run statistics tracking and reporting
use log::info;

/// Counters for both passes of a junction counting run
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Non-header alignment lines read
    pub alignments: u64,
    /// SAM header lines skipped
    pub header_lines: u64,
    /// Alignments that passed the unique + spliced filter
    pub accepted: u64,
    /// Alignments dropped because the read is not uniquely mapped
    pub not_unique: u64,
    /// Uniquely mapped alignments without a reference skip
    pub unspliced: u64,
    /// Junction observations recorded (one per skip)
    pub junction_reads: u64,
    /// Distinct junctions in the table after the alignment pass
    pub distinct_junctions: u64,
    /// Gene records processed
    pub genes: u64,
    /// Genes with at least one contained junction
    pub genes_with_junctions: u64,
    /// Junction rows written to the report
    pub rows_written: u64,
}

impl RunStats {
    /// Create new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the filter outcome for one alignment line
    pub fn record_alignment(&mut self, is_unique: bool, has_skip: bool) {
        self.alignments += 1;
        match (is_unique, has_skip) {
            (false, _) => self.not_unique += 1,
            (true, false) => self.unspliced += 1,
            (true, true) => self.accepted += 1,
        }
    }

    /// Record one gene block and how many junction rows it produced
    pub fn record_gene(&mut self, n_junctions: usize) {
        self.genes += 1;
        if n_junctions > 0 {
            self.genes_with_junctions += 1;
        }
        self.rows_written += n_junctions as u64;
    }

    /// Percentage of alignment lines accepted for junction extraction
    pub fn accepted_percent(&self) -> f64 {
        if self.alignments == 0 {
            0.0
        } else {
            100.0 * self.accepted as f64 / self.alignments as f64
        }
    }

    /// Print summary statistics to log
    pub fn print_summary(&self) {
        info!("=== Junction Summary ===");
        if self.alignments == 0 {
            info!("No alignments processed");
        } else {
            info!("Alignment lines: {} ({} header lines skipped)", self.alignments, self.header_lines);
            info!(
                "Unique spliced alignments: {} ({:.2}%)",
                self.accepted,
                self.accepted_percent()
            );
            info!("Not uniquely mapped: {}", self.not_unique);
            info!("Unique but unspliced: {}", self.unspliced);
            info!(
                "Junction reads: {} across {} distinct junctions",
                self.junction_reads, self.distinct_junctions
            );
        }
        info!(
            "Genes: {} ({} with junctions), {} junction rows written",
            self.genes, self.genes_with_junctions, self.rows_written
        );
    }
}
