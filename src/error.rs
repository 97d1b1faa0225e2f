use std::path::PathBuf;

/// Errors that can occur in sjcount.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    Parameter(String),

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("File not found - {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid CIGAR '{cigar}': {reason}")]
    InvalidCigar { cigar: String, reason: String },

    #[error("malformed alignment line {line_num}: {reason}")]
    MalformedAlignment { line_num: usize, reason: String },

    #[error("malformed gene line '{line}': {reason}")]
    MalformedGene { line: String, reason: String },
}

impl Error {
    /// Convenience for wrapping an `io::Error` with a path context.
    ///
    /// A missing file becomes [`Error::NotFound`] so callers can skip the stream.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path);
        }
        Self::Io { source, path }
    }

    pub(crate) fn cigar(cigar: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCigar {
            cigar: cigar.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn gene(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedGene {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: PathBuf::from("<unknown>"),
        }
    }
}
