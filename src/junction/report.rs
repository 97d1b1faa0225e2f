/// Per-gene junction report
///
/// Format (4 tab-separated columns, one header row):
/// 1. gene identifier
/// 2. junction start
/// 3. junction end
/// 4. supporting read count
///
/// Every gene block, empty or not, is closed by a blank line.
use super::JunctionTable;
use crate::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const REPORT_HEADER: &str = "Gene_ID\tJunction_Start\tJunction_End\tRead_Counts";

/// Report writer; the header is written on creation
pub struct JunctionReport<W: Write = BufWriter<File>> {
    writer: W,
    path: PathBuf,
    genes: usize,
    rows: usize,
}

impl JunctionReport {
    /// Create the output file and write the header row
    pub fn create(output_path: &Path) -> Result<Self, Error> {
        let file = File::create(output_path).map_err(|e| Error::io(e, output_path))?;
        Self::new(BufWriter::new(file), output_path)
    }
}

impl<W: Write> JunctionReport<W> {
    /// Wrap any writer; `path` is only used in error messages
    pub fn new(mut writer: W, path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        writeln!(writer, "{REPORT_HEADER}").map_err(|e| Error::io(e, &path))?;
        Ok(Self {
            writer,
            path,
            genes: 0,
            rows: 0,
        })
    }

    /// Write one gene block: a row per junction, then a blank line
    ///
    /// # Returns
    /// Number of junction rows written for this gene
    pub fn write_gene(&mut self, gene_id: &str, junctions: &JunctionTable) -> Result<usize, Error> {
        for (junction, count) in junctions.iter() {
            writeln!(self.writer, "{}\t{}\t{}", gene_id, junction, count)
                .map_err(|e| Error::io(e, &self.path))?;
        }
        writeln!(self.writer).map_err(|e| Error::io(e, &self.path))?;

        self.genes += 1;
        self.rows += junctions.len();
        Ok(junctions.len())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W, Error> {
        self.writer.flush().map_err(|e| Error::io(e, &self.path))?;
        log::info!(
            "Wrote {} junction rows for {} genes to {}",
            self.rows,
            self.genes,
            self.path.display()
        );
        Ok(self.writer)
    }
}
