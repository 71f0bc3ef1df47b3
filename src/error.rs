use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by all fallible matrix operations
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("index ({row},{col}) is out of range for a {rows}x{cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("operand shapes {lhs:?} and {rhs:?} are incompatible")]
    ShapeMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("operands are not in the same representation family")]
    FormatMismatch,
    #[error("entry ({row},{col}) is off the diagonal and cannot be assigned through a diagonal view")]
    IllegalStructure { row: usize, col: usize },
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed matrix market data at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Error type returned by the [`check_format`](crate::Matrix::check_format) utility.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Slice pointers are not monotonically non-decreasing")]
    BadSlicePointers,
    #[error("Minor indices are not strictly increasing within a slice")]
    BadMinorOrdering,
    #[error("Minor index exceeds the matrix dimension")]
    BadMinorIndex,
}
