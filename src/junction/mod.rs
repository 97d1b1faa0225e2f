/// Splice junction extraction and counting
///
/// This module handles:
/// - Decoding CIGAR reference skips into junction intervals
/// - Aggregating identical junctions into read counts
/// - Selecting the junctions that lie inside a gene range
/// - Gene annotation parsing and per-gene report output
pub mod gene;
mod report;

pub use gene::{GeneRange, GeneRecord};
pub use report::{JunctionReport, REPORT_HEADER};

use crate::align::{Cigar, CigarOp};
use crate::error::Error;
use indexmap::IndexMap;
use std::fmt;

/// A skipped reference interval: `start` is the cursor position where the
/// skip begins, `end` is `start + length`.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Junction {
    pub start: u64,
    pub end: u64,
}

impl Junction {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.start, self.end)
    }
}

/// Junction read counts, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunctionTable {
    junctions: IndexMap<Junction, u64>,
}

impl JunctionTable {
    /// Create new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one observation of `junction`
    pub fn record(&mut self, junction: Junction) {
        let count = self.junctions.entry(junction).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Read count for a junction, if it was ever observed
    pub fn get(&self, junction: &Junction) -> Option<u64> {
        self.junctions.get(junction).copied()
    }

    /// Get the number of distinct junctions tracked
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    /// Check if any junctions have been recorded
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Junction, &u64)> {
        self.junctions.iter()
    }

    /// Junctions whose start and end both fall in `range` (inclusive)
    ///
    /// Partially overlapping junctions are dropped. Order follows `self`.
    pub fn within(&self, range: GeneRange) -> JunctionTable {
        let junctions = self
            .junctions
            .iter()
            .filter(|(j, _)| range.contains(j.start) && range.contains(j.end))
            .map(|(&j, &count)| (j, count))
            .collect();
        JunctionTable { junctions }
    }
}

/// Record every reference skip of `cigar` into `table`
///
/// The cursor starts at `start` and moves over `M`, `D` and `N` operations.
/// Other operations leave it where it is. Zero-length skips are not recorded.
///
/// # Returns
/// The cursor position after the last operation
pub fn extract_junctions(
    cigar: &Cigar,
    start: u64,
    table: &mut JunctionTable,
) -> Result<u64, Error> {
    let mut cursor = start;

    for op in cigar.ops() {
        let len = match *op {
            CigarOp::Match(n) | CigarOp::Del(n) | CigarOp::RefSkip(n) => u64::from(n),
            _ => continue,
        };
        let next = cursor
            .checked_add(len)
            .ok_or_else(|| Error::cigar(&cigar.to_string(), "reference position overflows"))?;

        if matches!(op, CigarOp::RefSkip(_)) && !op.is_empty() {
            table.record(Junction::new(cursor, next));
        }
        cursor = next;
    }

    Ok(cursor)
}

/// Parse `cigar` and record its junctions (see [`extract_junctions`])
pub fn extract_junctions_str(
    cigar: &str,
    start: u64,
    table: &mut JunctionTable,
) -> Result<u64, Error> {
    let cigar: Cigar = cigar.parse()?;
    extract_junctions(&cigar, start, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u64, end: u64) -> GeneRange {
        GeneRange::new(start, end).unwrap()
    }

    #[test]
    fn test_table_new() {
        let table = JunctionTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_record_increments() {
        let mut table = JunctionTable::new();
        let j = Junction::new(100, 200);
        table.record(j);
        assert_eq!(table.get(&j), Some(1));
        table.record(j);
        table.record(j);
        assert_eq!(table.get(&j), Some(3));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Junction::new(100, 201)), None);
    }

    #[test]
    fn test_extract_single_junction() {
        let mut table = JunctionTable::new();
        extract_junctions_str("5M10N15M", 0, &mut table).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Junction::new(5, 15)), Some(1));

        // Same read again
        extract_junctions_str("5M10N15M", 0, &mut table).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Junction::new(5, 15)), Some(2));
    }

    #[test]
    fn test_extract_multiple_junctions() {
        let mut table = JunctionTable::new();
        let end = extract_junctions_str("10M20N10M2D5M30N10M", 5, &mut table).unwrap();
        assert_eq!(table.get(&Junction::new(15, 35)), Some(1));
        assert_eq!(table.get(&Junction::new(52, 82)), Some(1));
        assert_eq!(end, 92);

        let order: Vec<Junction> = table.iter().map(|(j, _)| *j).collect();
        assert_eq!(order, vec![Junction::new(15, 35), Junction::new(52, 82)]);
    }

    #[test]
    fn test_cursor_spans_consumed_lengths() {
        let cases = [("5M10N15M", 30), ("3D4M5N", 12), ("100M", 100), ("*", 0)];
        for (cigar, consumed) in cases {
            let mut table = JunctionTable::new();
            let end = extract_junctions_str(cigar, 1000, &mut table).unwrap();
            assert_eq!(end - 1000, consumed, "cigar {cigar}");
        }
    }

    #[test]
    fn test_no_skip_leaves_table_untouched() {
        let mut table = JunctionTable::new();
        extract_junctions_str("50M2D48M", 10, &mut table).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_other_ops_do_not_move_cursor() {
        let mut table = JunctionTable::new();
        let end = extract_junctions_str("5S10M3I10N10M7H", 0, &mut table).unwrap();
        assert_eq!(table.get(&Junction::new(10, 20)), Some(1));
        assert_eq!(end, 30);

        // = and X are left alone as well
        let mut table = JunctionTable::new();
        extract_junctions_str("5=10N5X", 0, &mut table).unwrap();
        assert_eq!(table.get(&Junction::new(0, 10)), Some(1));
    }

    #[test]
    fn test_unknown_ops_are_skipped() {
        let mut table = JunctionTable::new();
        let end = extract_junctions_str("10M5B20N10M", 5, &mut table).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Junction::new(15, 35)), Some(1));
        assert_eq!(end, 45);
    }

    #[test]
    fn test_record_saturates() {
        let j = Junction::new(1, 2);
        let mut table = JunctionTable {
            junctions: IndexMap::from([(j, u64::MAX - 1)]),
        };
        table.record(j);
        table.record(j);
        assert_eq!(table.get(&j), Some(u64::MAX));
    }

    #[test]
    fn test_zero_length_skip_records_nothing() {
        let mut table = JunctionTable::new();
        let end = extract_junctions_str("10M0N0M10M", 0, &mut table).unwrap();
        assert!(table.is_empty());
        assert_eq!(end, 20);
    }

    #[test]
    fn test_invalid_cigar_leaves_table_untouched() {
        let mut table = JunctionTable::new();
        assert!(extract_junctions_str("10M5N?", 0, &mut table).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut table = JunctionTable::new();
        let err = extract_junctions_str("10M", u64::MAX - 5, &mut table).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_within_containment() {
        let mut table = JunctionTable::new();
        table.record(Junction::new(150, 180));
        table.record(Junction::new(90, 180));
        table.record(Junction::new(100, 200));
        table.record(Junction::new(150, 201));

        let hits = table.within(range(100, 200));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.get(&Junction::new(150, 180)), Some(1));
        assert_eq!(hits.get(&Junction::new(100, 200)), Some(1));
        assert_eq!(hits.get(&Junction::new(90, 180)), None);
        assert_eq!(hits.get(&Junction::new(150, 201)), None);
    }

    #[test]
    fn test_within_is_repeatable_and_preserves_order() {
        let mut table = JunctionTable::new();
        for j in [(300, 400), (120, 130), (110, 190), (120, 130)] {
            table.record(Junction::new(j.0, j.1));
        }
        let before = table.clone();

        let first = table.within(range(100, 400));
        let second = table.within(range(100, 400));
        assert_eq!(first, second);
        assert_eq!(table, before);

        let order: Vec<(u64, u64)> = first.iter().map(|(j, &c)| (j.start, c)).collect();
        assert_eq!(order, vec![(300, 1), (120, 2), (110, 1)]);
    }

    #[test]
    fn test_within_empty_table() {
        let table = JunctionTable::new();
        assert!(table.within(range(0, u64::MAX)).is_empty());
    }
}
