pub mod cigar;
pub mod record;

pub use cigar::{Cigar, CigarOp};
pub use record::AlignmentRecord;
