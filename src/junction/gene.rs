/// Gene summary parsing
///
/// Supports the tab-separated gene summary format (3 columns):
/// 1. gene identifier
/// 2. gene name
/// 3. location: `refname:start..end`, optionally followed by `(+)` or `(-)`
///
/// Coordinates may carry thousands separators, e.g. `chr1:1,000..2,000(+)`.
use crate::error::Error;
use std::str::FromStr;

const FIELD_COUNT: usize = 3;
const THOUSANDS_SEPARATOR: char = ',';
const STRAND_SUFFIXES: [&str; 2] = ["(+)", "(-)"];

/// Inclusive gene coordinate range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneRange {
    pub start: u64,
    pub end: u64,
}

impl GeneRange {
    /// Returns `None` if `start > end`
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }
}

/// One gene summary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub gene_id: String,
    pub gene_name: String,
    pub seqname: String,
    pub range: GeneRange,
}

impl GeneRecord {
    /// Parse a single gene summary line
    pub fn from_line(line: &str) -> Result<Self, Error> {
        let trimmed = line.trim_end();
        let fields: Vec<&str> = trimmed.split('\t').collect();

        if fields.len() != FIELD_COUNT {
            return Err(Error::gene(
                trimmed,
                format!("gene line has {} fields, expected {}", fields.len(), FIELD_COUNT),
            ));
        }

        let (seqname, range) = parse_location(fields[2]).map_err(|reason| Error::gene(trimmed, reason))?;

        Ok(Self {
            gene_id: fields[0].to_string(),
            gene_name: fields[1].to_string(),
            seqname: seqname.to_string(),
            range,
        })
    }
}

impl FromStr for GeneRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s)
    }
}

/// Split `refname:start..end[(strand)]` into the reference name and range
fn parse_location(loc: &str) -> Result<(&str, GeneRange), String> {
    let parts: Vec<&str> = loc.split(':').collect();
    if parts.len() != 2 {
        return Err(format!(
            "location '{loc}' has {} ':'-separated parts, expected 2",
            parts.len()
        ));
    }

    let bounds: Vec<&str> = parts[1].split("..").collect();
    if bounds.len() != 2 {
        return Err(format!(
            "range '{}' has {} '..'-separated parts, expected 2",
            parts[1],
            bounds.len()
        ));
    }

    let start = parse_coordinate(bounds[0])?;
    let end = parse_coordinate(strip_strand(bounds[1]))?;

    let range = GeneRange::new(start, end)
        .ok_or_else(|| format!("gene start {start} is after gene end {end}"))?;

    Ok((parts[0], range))
}

fn strip_strand(token: &str) -> &str {
    STRAND_SUFFIXES
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token)
}

fn parse_coordinate(token: &str) -> Result<u64, String> {
    let digits: String = token.chars().filter(|&c| c != THOUSANDS_SEPARATOR).collect();
    digits
        .parse::<u64>()
        .map_err(|e| format!("invalid coordinate '{token}': {e}"))
}
