mod entry;
mod norms;
mod square;

pub use entry::Entry;
pub use square::SquareMatrix;

use crate::error::{FormatError, MatrixError};
use crate::scalar::ScalarT;
use crate::storage::{CooStorage, CsxStorage};
use crate::types::StorageOrder;
use crate::views::{DiagonalView, TransposeView};

/// Sparse matrix with a fixed storage order and a tagged representation
///
/// A matrix is created empty and uncompressed; entries are accumulated in
/// coordinate form through [`set`](Matrix::set) or [`at_mut`](Matrix::at_mut)
/// and the matrix is then [`compress`](Matrix::compress)ed for the product
/// kernels.  Conversions are explicit, idempotent and lossless; a `set` on
/// a compressed matrix transparently falls back to coordinate form first,
/// so bulk construction should happen before compression.
///
/// __Example usage__ : to build the 2 x 3 matrix
/// ```text
/// A = [1.  0.  2.]
///     [0.  3.  0.]
/// ```
///
/// ```
/// use sparmat::{Matrix, StorageOrder};
///
/// let mut A = Matrix::<f64>::new(2, 3, StorageOrder::RowMajor);
/// A.set(0, 0, 1.0).unwrap();
/// A.set(0, 2, 2.0).unwrap();
/// A.set(1, 1, 3.0).unwrap();
/// A.compress();
///
/// assert_eq!(A.nnz(), 3);
/// assert_eq!(A.get(0, 2).unwrap(), 2.0);
/// assert_eq!(A.get(1, 0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T = f64> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) order: StorageOrder,
    pub(crate) repr: MatrixRepr<T>,
}

/// Active representation of a general matrix.  The modified compressed
/// state exists only on [`SquareMatrix`], which carries it separately so
/// that the illegal compressed-and-modified combination cannot be built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum MatrixRepr<T> {
    Coo(CooStorage<T>),
    Csx(CsxStorage<T>),
}

impl<T> Matrix<T>
where
    T: ScalarT,
{
    /// Empty matrix of the given shape, in uncompressed state.
    pub fn new(rows: usize, cols: usize, order: StorageOrder) -> Self {
        Matrix {
            rows,
            cols,
            order,
            repr: MatrixRepr::Coo(CooStorage::new()),
        }
    }

    /// Identity matrix of size `n`, in compressed state.
    pub fn identity(n: usize, order: StorageOrder) -> Self {
        let inner = (0usize..=n).collect();
        let outer = (0usize..n).collect();
        let values = vec![T::one(); n];
        Matrix {
            rows: n,
            cols: n,
            order,
            repr: MatrixRepr::Csx(CsxStorage {
                inner,
                outer,
                values,
            }),
        }
    }

    /// number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// storage order, fixed at construction
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// number of stored (nonzero) entries
    pub fn nnz(&self) -> usize {
        match &self.repr {
            MatrixRepr::Coo(coo) => coo.len(),
            MatrixRepr::Csx(csx) => csx.nnz(),
        }
    }

    /// true while the matrix is in compressed (CSR/CSC) state
    pub fn is_compressed(&self) -> bool {
        matches!(self.repr, MatrixRepr::Csx(_))
    }

    /// number of slices of the active order
    pub(crate) fn majors(&self) -> usize {
        match self.order {
            StorageOrder::RowMajor => self.rows,
            StorageOrder::ColumnMajor => self.cols,
        }
    }

    pub(crate) fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Value at `(row, col)`; zero for entries that are not stored.
    ///
    /// Never mutates the store and never changes the representation.
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        self.check_bounds(row, col)?;
        let idx = self.order.to_storage(row, col);
        let v = match &self.repr {
            MatrixRepr::Coo(coo) => coo.value_or_zero(idx),
            MatrixRepr::Csx(csx) => csx.get(idx).unwrap_or_else(T::zero),
        };
        Ok(v)
    }

    /// Store `v` at `(row, col)`, erasing the entry when `v` is zero.
    ///
    /// A compressed matrix transparently falls back to uncompressed form
    /// first.
    pub fn set(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        self.uncompress();
        let idx = self.order.to_storage(row, col);
        match &mut self.repr {
            MatrixRepr::Coo(coo) => coo.set(idx, v),
            MatrixRepr::Csx(_) => unreachable!("uncompressed above"),
        }
        Ok(())
    }

    /// Scoped accessor for the entry at `(row, col)`.
    ///
    /// Forces uncompressed form, then hands out a proxy whose writers keep
    /// the no-stored-zeros invariant.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<Entry<'_, T>, MatrixError> {
        self.check_bounds(row, col)?;
        self.uncompress();
        let idx = self.order.to_storage(row, col);
        match &mut self.repr {
            MatrixRepr::Coo(coo) => Ok(Entry::new(coo, idx)),
            MatrixRepr::Csx(_) => unreachable!("uncompressed above"),
        }
    }

    /// Replace the dimensions, dropping all stored data and returning to
    /// uncompressed state.
    pub fn resize_and_clear(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.repr = MatrixRepr::Coo(CooStorage::new());
    }

    /// Convert coordinate storage to CSR/CSC.  No-op when already
    /// compressed.
    pub fn compress(&mut self) {
        if let MatrixRepr::Coo(coo) = &self.repr {
            let csx = CsxStorage::from_coo(self.majors(), coo);
            self.repr = MatrixRepr::Csx(csx);
        }
    }

    /// Convert CSR/CSC storage back to coordinate form.  No-op when
    /// already uncompressed.
    pub fn uncompress(&mut self) {
        if let MatrixRepr::Csx(csx) = &self.repr {
            let coo = csx.to_coo();
            self.repr = MatrixRepr::Coo(coo);
        }
    }

    /// Check that a compressed matrix's arrays are correctly formatted.
    /// Always succeeds on an uncompressed matrix: the coordinate store
    /// maintains its invariants on every write.
    pub fn check_format(&self) -> Result<(), FormatError> {
        match &self.repr {
            MatrixRepr::Coo(_) => Ok(()),
            MatrixRepr::Csx(csx) => {
                let minors = match self.order {
                    StorageOrder::RowMajor => self.cols,
                    StorageOrder::ColumnMajor => self.rows,
                };
                csx.check_format(self.majors(), minors)
            }
        }
    }

    /// Stored entries as `(row, col, value)` triples.
    ///
    /// Enumeration follows the storage order: row-then-column for
    /// `RowMajor`, column-then-row for `ColumnMajor`, in every
    /// representation.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        let order = self.order;
        match &self.repr {
            MatrixRepr::Coo(coo) => Box::new(coo.iter().map(move |(idx, v)| {
                let (r, c) = order.to_row_col(idx.major, idx.minor);
                (r, c, v)
            })),
            MatrixRepr::Csx(csx) => Box::new(csx.iter().map(move |(idx, v)| {
                let (r, c) = order.to_row_col(idx.major, idx.minor);
                (r, c, v)
            })),
        }
    }

    /// transpose view of this matrix
    pub fn t(&mut self) -> TransposeView<'_, T> {
        TransposeView::new(self)
    }

    /// Materialize a transpose view into an owned matrix.
    ///
    /// The result is always in uncompressed state, whatever the state of
    /// the underlying matrix.
    pub fn from_transpose(view: &TransposeView<'_, T>) -> Self {
        let src = view.src();
        let mut out = Matrix::new(src.cols, src.rows, src.order);
        if let MatrixRepr::Coo(coo) = &mut out.repr {
            for (r, c, v) in src.iter() {
                coo.set(out.order.to_storage(c, r), v);
            }
        }
        out
    }

    /// Materialize a diagonal view into an owned matrix, in uncompressed
    /// state.
    pub fn from_diagonal(view: &DiagonalView<'_, T>) -> Self {
        let n = view.dim();
        let src = view.src();
        let mut out = Matrix::new(n, n, src.order());
        if let MatrixRepr::Coo(coo) = &mut out.repr {
            for i in 0..n {
                coo.set(out.order.to_storage(i, i), view.diag_value(i));
            }
        }
        out
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use crate::types::Index;
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    impl<T> Matrix<T>
    where
        T: ScalarT,
    {
        /// Parallel variant of [`compress`](Matrix::compress) with an
        /// identical postcondition.
        ///
        /// Slice populations are counted with relaxed atomic increments,
        /// the slice pointers come from an exclusive prefix sum over the
        /// counts, and the entry scatter exploits the fact that the k-th
        /// entry in coordinate order lands at offset k of the compressed
        /// arrays.
        pub fn compress_parallel(&mut self) {
            let coo = match &self.repr {
                MatrixRepr::Coo(coo) => coo,
                MatrixRepr::Csx(_) => return,
            };
            let majors = self.majors();
            let entries: Vec<(Index, T)> = coo.iter().collect();

            let counts: Vec<AtomicUsize> = (0..majors).map(|_| AtomicUsize::new(0)).collect();
            entries.par_iter().for_each(|(idx, _)| {
                counts[idx.major].fetch_add(1, Ordering::Relaxed);
            });

            let mut inner = Vec::with_capacity(majors + 1);
            let mut total = 0;
            inner.push(0);
            for c in &counts {
                total += c.load(Ordering::Relaxed);
                inner.push(total);
            }

            let mut outer = vec![0usize; entries.len()];
            let mut values = vec![T::zero(); entries.len()];
            outer
                .par_iter_mut()
                .zip(values.par_iter_mut())
                .zip(entries.par_iter())
                .for_each(|((o, val), &(idx, v))| {
                    *o = idx.minor;
                    *val = v;
                });

            self.repr = MatrixRepr::Csx(CsxStorage {
                inner,
                outer,
                values,
            });
        }
    }
}
