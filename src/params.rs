use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// sjcount command-line parameters.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sjcount",
    about = "Count splice junctions from uniquely mapped SAM reads, per annotated gene",
    version
)]
pub struct Parameters {
    // ── Inputs ──────────────────────────────────────────────────────────
    /// SAM alignment file (plain or .gz)
    #[arg(value_name = "SAM_FILE")]
    pub sam_file: PathBuf,

    /// Gene summary file: gene_id, gene_name, refname:start..end (plain or .gz)
    #[arg(value_name = "GENES_FILE")]
    pub genes_file: PathBuf,

    /// Command to decompress input files (e.g. "zcat" for .gz)
    #[arg(long = "read-files-command")]
    pub read_files_command: Option<String>,

    // ── Output ──────────────────────────────────────────────────────────
    /// Output report path
    #[arg(long = "out-file", short = 'o', default_value = "junctions.tsv")]
    pub out_file: PathBuf,
}

impl Parameters {
    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        if self.out_file.as_os_str().is_empty() {
            return Err(Error::Parameter("--out-file must not be empty".into()));
        }

        // Overwriting an input before it is read would lose it
        if self.out_file == self.sam_file || self.out_file == self.genes_file {
            return Err(Error::Parameter(format!(
                "--out-file {} is also an input file",
                self.out_file.display()
            )));
        }

        if let Some(cmd) = &self.read_files_command {
            if cmd.trim().is_empty() {
                return Err(Error::Parameter(
                    "--read-files-command must not be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
