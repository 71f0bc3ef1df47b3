// Small tag types shared by every matrix kind.  All storage containers
// speak (major, minor) coordinates; the storage order decides which of
// the two public axes is the major one.

/// Storage order of a matrix, fixed at construction
///
/// The order decides both the iteration order of the coordinate store and
/// which axis becomes the slice axis of the compressed representations:
/// `RowMajor` compresses to CSR/MSR, `ColumnMajor` to CSC/MSC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageOrder {
    /// rows are the major axis
    RowMajor,
    /// columns are the major axis
    ColumnMajor,
}

impl StorageOrder {
    /// map public (row, col) coordinates to storage coordinates
    #[inline]
    pub(crate) fn to_storage(self, row: usize, col: usize) -> Index {
        match self {
            StorageOrder::RowMajor => Index {
                major: row,
                minor: col,
            },
            StorageOrder::ColumnMajor => Index {
                major: col,
                minor: row,
            },
        }
    }

    /// map storage coordinates back to public (row, col) coordinates
    #[inline]
    pub(crate) fn to_row_col(self, major: usize, minor: usize) -> (usize, usize) {
        match self {
            StorageOrder::RowMajor => (major, minor),
            StorageOrder::ColumnMajor => (minor, major),
        }
    }
}

/// Storage-order coordinates of a stored entry.
///
/// The derived lexicographic order (major first, then minor) is exactly
/// the comparator required of the coordinate store: row-then-column for
/// `RowMajor`, column-then-row for `ColumnMajor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Index {
    pub major: usize,
    pub minor: usize,
}

/// Selector for the matrix norms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormKind {
    /// maximum absolute column sum
    One,
    /// maximum absolute row sum
    Infinity,
    /// square root of the sum of squared magnitudes
    Frobenius,
}
