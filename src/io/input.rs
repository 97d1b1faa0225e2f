/// Line-oriented input with decompression support
use crate::error::Error;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Open a text input (plain or gzip compressed)
///
/// # Arguments
/// * `path` - Path to the input file
/// * `decompress_cmd` - Optional decompression command (e.g., "zcat" for .gz files)
///
/// A missing file is reported as [`Error::NotFound`].
pub fn open_input(path: &Path, decompress_cmd: Option<&str>) -> Result<Box<dyn BufRead>, Error> {
    if let Some(cmd) = decompress_cmd {
        // The command would report a missing file on its own stderr; check first
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        return open_with_command(path, cmd);
    }

    let path_str = path.to_string_lossy();
    let is_gzipped = path_str.ends_with(".gz") || path_str.ends_with(".gzip");

    let file = File::open(path).map_err(|e| Error::io(e, path))?;

    if is_gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open input using external decompression command
fn open_with_command(path: &Path, cmd: &str) -> Result<Box<dyn BufRead>, Error> {
    let mut child = Command::new(cmd)
        .arg(path)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Io {
            source: e,
            path: path.to_path_buf(),
        })?;

    let stdout = child.stdout.take().ok_or_else(|| {
        Error::from(io::Error::other(
            "failed to capture stdout from decompression command",
        ))
    })?;

    Ok(Box::new(CommandReader {
        cmd: cmd.to_string(),
        child,
        stdout: BufReader::new(stdout),
        reaped: false,
    }))
}

/// Stdout of a decompression command
///
/// The child is waited on once its output is exhausted; a non-zero exit
/// status surfaces as a read error instead of a short stream.
struct CommandReader {
    cmd: String,
    child: Child,
    stdout: BufReader<ChildStdout>,
    reaped: bool,
}

impl CommandReader {
    fn check_exit(&mut self) -> io::Result<()> {
        if self.reaped {
            return Ok(());
        }
        self.reaped = true;
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "decompression command '{}' failed ({})",
                self.cmd, status
            )))
        }
    }
}

impl Read for CommandReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.stdout.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.check_exit()?;
        }
        Ok(n)
    }
}

impl BufRead for CommandReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.stdout.fill_buf()?.is_empty() {
            self.check_exit()?;
        }
        self.stdout.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.stdout.consume(amt);
    }
}

impl Drop for CommandReader {
    fn drop(&mut self) {
        // Stopped reading early (e.g. a malformed line); don't leave the child behind
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
