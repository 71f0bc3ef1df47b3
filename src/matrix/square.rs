use crate::error::{FormatError, MatrixError};
use crate::matrix::norms::norm_from;
use crate::matrix::{Entry, Matrix, MatrixRepr};
use crate::scalar::ScalarT;
use crate::storage::{CooStorage, MsxStorage};
use crate::types::{NormKind, StorageOrder};
use crate::views::DiagonalView;

/// Square sparse matrix
///
/// Carries the whole general-matrix surface plus a third, diagonal-aware
/// representation (MSR/MSC) reached through
/// [`compress_mod`](SquareMatrix::compress_mod).  The three states form a
/// closed conversion set:
///
/// ```text
///   Uncompressed  <──compress──>  Compressed
///         │                           │
///         └──compress_mod──>  ModifiedCompressed  <──compress──
///                                    │
///                                    └──uncompress──> Uncompressed
/// ```
///
/// Any `set` from a compressed or modified state transparently falls back
/// to uncompressed form first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareMatrix<T = f64> {
    pub(crate) base: Matrix<T>,
    // Some(_) exactly while in modified compressed state; the base matrix
    // then holds an empty coordinate store
    pub(crate) msx: Option<MsxStorage<T>>,
}

impl<T> SquareMatrix<T>
where
    T: ScalarT,
{
    /// Empty `n` x `n` matrix in uncompressed state.
    pub fn new(n: usize, order: StorageOrder) -> Self {
        SquareMatrix {
            base: Matrix::new(n, n, order),
            msx: None,
        }
    }

    /// Take ownership of a general matrix, which must be square.
    pub fn from_matrix(m: Matrix<T>) -> Result<Self, MatrixError> {
        if m.rows != m.cols {
            return Err(MatrixError::ShapeMismatch {
                lhs: (m.rows, m.cols),
                rhs: (m.rows, m.rows),
            });
        }
        Ok(SquareMatrix { base: m, msx: None })
    }

    /// side length
    pub fn dim(&self) -> usize {
        self.base.rows
    }

    /// number of rows
    pub fn rows(&self) -> usize {
        self.base.rows
    }

    /// number of columns
    pub fn cols(&self) -> usize {
        self.base.cols
    }

    /// storage order, fixed at construction
    pub fn order(&self) -> StorageOrder {
        self.base.order
    }

    /// Number of stored entries.  In modified form this counts the
    /// nonzero diagonal slots plus all off-diagonal entries; zero
    /// diagonal slots are structural and not counted.
    pub fn nnz(&self) -> usize {
        match &self.msx {
            Some(msx) => msx.nnz(self.dim()),
            None => self.base.nnz(),
        }
    }

    /// true while in compressed (CSR/CSC) state
    pub fn is_compressed(&self) -> bool {
        self.base.is_compressed()
    }

    /// true while in modified compressed (MSR/MSC) state
    pub fn is_modified(&self) -> bool {
        self.msx.is_some()
    }

    /// Value at `(row, col)`; zero for entries that are not stored.
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        match &self.msx {
            Some(msx) => {
                self.base.check_bounds(row, col)?;
                Ok(msx.get(self.dim(), self.base.order.to_storage(row, col)))
            }
            None => self.base.get(row, col),
        }
    }

    /// Store `v` at `(row, col)`, falling back to uncompressed form first.
    pub fn set(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.uncompress();
        self.base.set(row, col, v)
    }

    /// Scoped accessor for the entry at `(row, col)`; forces uncompressed
    /// form.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<Entry<'_, T>, MatrixError> {
        self.uncompress();
        self.base.at_mut(row, col)
    }

    /// Square resize; all stored data is dropped and the state returns to
    /// uncompressed.
    pub fn resize_and_clear(&mut self, n: usize) {
        self.msx = None;
        self.base.resize_and_clear(n, n);
    }

    /// Convert to CSR/CSC from either other state.
    ///
    /// From modified form the diagonal is merged back into slice order;
    /// zero diagonal slots are dropped on the way.
    pub fn compress(&mut self) {
        match self.msx.take() {
            Some(msx) => {
                self.base.repr = MatrixRepr::Csx(msx.to_csx(self.dim()));
            }
            None => self.base.compress(),
        }
    }

    /// Convert to coordinate form from either compressed state.
    pub fn uncompress(&mut self) {
        match self.msx.take() {
            Some(msx) => {
                self.base.repr = MatrixRepr::Coo(msx.to_coo(self.dim()));
            }
            None => self.base.uncompress(),
        }
    }

    /// Convert to MSR/MSC from either other state.  No-op when already
    /// modified.
    ///
    /// The diagonal occupies `n` reserved slots whether or not those
    /// entries are zero; the slice pointers cover only the off-diagonal
    /// region.
    pub fn compress_mod(&mut self) {
        if self.msx.is_some() {
            return;
        }
        let n = self.dim();
        let msx = match &self.base.repr {
            MatrixRepr::Coo(coo) => MsxStorage::from_coo(n, coo),
            MatrixRepr::Csx(csx) => MsxStorage::from_csx(n, csx),
        };
        self.base.repr = MatrixRepr::Coo(CooStorage::new());
        self.msx = Some(msx);
    }

    /// Check the structural invariants of the active representation.
    pub fn check_format(&self) -> Result<(), FormatError> {
        match &self.msx {
            Some(msx) => {
                let n = self.dim();
                if msx.bind.len() != msx.values.len() || msx.values.len() < n {
                    return Err(FormatError::IncompatibleDimension);
                }
                // the merged walk rebuilds plain compressed arrays, whose
                // checker covers pointer monotonicity and minor ordering
                msx.to_csx(n).check_format(n, n)
            }
            None => self.base.check_format(),
        }
    }

    /// Matrix norm of the requested kind, computed directly from the
    /// active representation.
    pub fn norm(&self, kind: NormKind) -> T::Magnitude {
        norm_from(kind, self.rows(), self.cols(), self.iter())
    }

    /// Stored entries as `(row, col, value)` triples, in storage order.
    /// In modified form the diagonal is reported at its sorted position
    /// and zero diagonal slots are skipped.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        match &self.msx {
            Some(msx) => {
                let order = self.base.order;
                Box::new(msx.iter_merged(self.dim()).map(move |(idx, v)| {
                    let (r, c) = order.to_row_col(idx.major, idx.minor);
                    (r, c, v)
                }))
            }
            None => self.base.iter(),
        }
    }

    /// diagonal view of this matrix
    pub fn diag(&mut self) -> DiagonalView<'_, T> {
        DiagonalView::new(self)
    }
}

#[cfg(feature = "parallel")]
impl<T> SquareMatrix<T>
where
    T: ScalarT,
{
    /// Parallel variant of [`compress`](SquareMatrix::compress).  From
    /// modified form the diagonal merge is inherently sequential per
    /// slice, so that path is unchanged.
    pub fn compress_parallel(&mut self) {
        match self.msx.take() {
            Some(msx) => {
                self.base.repr = MatrixRepr::Csx(msx.to_csx(self.dim()));
            }
            None => self.base.compress_parallel(),
        }
    }
}
