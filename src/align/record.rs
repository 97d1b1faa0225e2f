/// SAM alignment lines, reduced to the fields junction counting needs
///
/// Columns used (tab-separated, 1-based):
/// 3. RNAME (reference name)
/// 4. POS (1-based leftmost position)
/// 6. CIGAR
/// last. an optional field carrying the NH (number of hits) tag
use crate::error::Error;

/// Prefix of SAM header lines
pub const HEADER_PREFIX: char = '@';

/// Minimum number of columns a data line must carry
pub const MIN_FIELDS: usize = 6;

/// Tag whose integer value is the number of reported alignments for the read
const NH_TAG: &str = "NH";

/// Check whether a line belongs to the SAM header
pub fn is_header(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX)
}

/// Borrowed view of one SAM data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord<'a> {
    pub rname: &'a str,
    pub pos: u64,
    pub cigar: &'a str,
    /// Last column of the line
    pub annotation: &'a str,
}

impl<'a> AlignmentRecord<'a> {
    /// Parse a non-header SAM line
    ///
    /// # Arguments
    /// * `line` - Line text without its newline
    /// * `line_num` - 1-based line number, used in error messages
    pub fn from_line(line: &'a str, line_num: usize) -> Result<Self, Error> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();

        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedAlignment {
                line_num,
                reason: format!(
                    "SAM line has {} fields, expected at least {}",
                    fields.len(),
                    MIN_FIELDS
                ),
            });
        }

        let pos = fields[3]
            .parse::<u64>()
            .map_err(|e| Error::MalformedAlignment {
                line_num,
                reason: format!("invalid POS '{}': {}", fields[3], e),
            })?;

        Ok(Self {
            rname: fields[2],
            pos,
            cigar: fields[5],
            annotation: fields[fields.len() - 1],
        })
    }

    /// True if the read has exactly one reported alignment (`NH:i:1`)
    pub fn is_unique(&self) -> bool {
        nh_value(self.annotation) == Some(1)
    }

    /// True if the CIGAR contains a reference skip
    pub fn has_skip(&self) -> bool {
        self.cigar.contains('N')
    }
}

/// Extract the NH value from an optional field (`NH:i:<n>`)
fn nh_value(field: &str) -> Option<u32> {
    let mut parts = field.splitn(3, ':');
    let tag = parts.next()?;
    let ty = parts.next()?;
    let value = parts.next()?;
    if tag != NH_TAG || ty != "i" {
        return None;
    }
    value.parse().ok()
}
