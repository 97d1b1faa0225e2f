/// CIGAR descriptors parsed from SAM text
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// CIGAR operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    /// M: match/mismatch
    Match(u32),
    /// =: exact match
    Equal(u32),
    /// X: mismatch
    Diff(u32),
    /// I: insertion to reference
    Ins(u32),
    /// D: deletion from reference
    Del(u32),
    /// N: splice junction (skipped reference region)
    RefSkip(u32),
    /// S: soft clip (clipped sequence present in read)
    SoftClip(u32),
    /// H: hard clip (clipped sequence not present)
    HardClip(u32),
    /// P: padding (silent deletion from padded reference)
    Pad(u32),
}

impl CigarOp {
    /// Build an operation from its SAM symbol and length
    pub fn from_symbol(symbol: char, len: u32) -> Option<Self> {
        let op = match symbol {
            'M' => CigarOp::Match(len),
            '=' => CigarOp::Equal(len),
            'X' => CigarOp::Diff(len),
            'I' => CigarOp::Ins(len),
            'D' => CigarOp::Del(len),
            'N' => CigarOp::RefSkip(len),
            'S' => CigarOp::SoftClip(len),
            'H' => CigarOp::HardClip(len),
            'P' => CigarOp::Pad(len),
            _ => return None,
        };
        Some(op)
    }

    /// Get the operation character
    pub fn op_char(&self) -> char {
        match self {
            CigarOp::Match(_) => 'M',
            CigarOp::Equal(_) => '=',
            CigarOp::Diff(_) => 'X',
            CigarOp::Ins(_) => 'I',
            CigarOp::Del(_) => 'D',
            CigarOp::RefSkip(_) => 'N',
            CigarOp::SoftClip(_) => 'S',
            CigarOp::HardClip(_) => 'H',
            CigarOp::Pad(_) => 'P',
        }
    }

    /// Get the operation length
    pub fn len(&self) -> u32 {
        match self {
            CigarOp::Match(n)
            | CigarOp::Equal(n)
            | CigarOp::Diff(n)
            | CigarOp::Ins(n)
            | CigarOp::Del(n)
            | CigarOp::RefSkip(n)
            | CigarOp::SoftClip(n)
            | CigarOp::HardClip(n)
            | CigarOp::Pad(n) => *n,
        }
    }

    /// Check if operation is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len(), self.op_char())
    }
}

/// An ordered list of CIGAR operations.
///
/// Parsed with an explicit scan over `(<digits><op>)*`. The SAM placeholder
/// `*` is accepted and yields no operations. A length followed by a symbol
/// outside the SAM set is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar(Vec<CigarOp>);

impl Cigar {
    pub fn ops(&self) -> &[CigarOp] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-empty reference skips, i.e. junctions this CIGAR implies
    pub fn skip_count(&self) -> usize {
        self.0
            .iter()
            .filter(|op| matches!(op, CigarOp::RefSkip(_)) && !op.is_empty())
            .count()
    }
}

impl FromStr for Cigar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        // Digits seen since the last operation symbol
        let mut len: Option<u32> = None;

        for (i, c) in s.char_indices() {
            if let Some(digit) = c.to_digit(10) {
                let acc = len.unwrap_or(0);
                let next = acc
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| Error::cigar(s, format!("length overflows at offset {i}")))?;
                len = Some(next);
                continue;
            }

            let n = len
                .take()
                .ok_or_else(|| Error::cigar(s, format!("operation '{c}' at offset {i} has no length")))?;
            // Symbols outside the SAM set are dropped along with their length
            if let Some(op) = CigarOp::from_symbol(c, n) {
                ops.push(op);
            }
        }

        if len.is_some() {
            return Err(Error::cigar(s, "trailing length without an operation"));
        }

        Ok(Self(ops))
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "*");
        }
        for op in &self.0 {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
