use crate::error::MatrixError;
use crate::matrix::{Entry, Matrix, MatrixRepr, SquareMatrix};
use crate::scalar::ScalarT;
use crate::types::{Index, NormKind};
use num_traits::{Float, Zero};

/// Logically transposed view of a matrix
///
/// A non-owning handle that re-maps coordinates; nothing is copied and the
/// underlying matrix is never physically transposed.  The view borrows the
/// matrix mutably, so for as long as it exists no other accessor can touch
/// the matrix; mutations through the view land in the underlying storage.
pub struct TransposeView<'a, T>
where
    T: ScalarT,
{
    src: &'a mut Matrix<T>,
}

impl<'a, T> TransposeView<'a, T>
where
    T: ScalarT,
{
    pub fn new(src: &'a mut Matrix<T>) -> Self {
        TransposeView { src }
    }

    pub(crate) fn src(&self) -> &Matrix<T> {
        self.src
    }

    /// number of rows of the view (columns of the underlying matrix)
    pub fn rows(&self) -> usize {
        self.src.cols()
    }

    /// number of columns of the view (rows of the underlying matrix)
    pub fn cols(&self) -> usize {
        self.src.rows()
    }

    pub fn nnz(&self) -> usize {
        self.src.nnz()
    }

    pub fn is_compressed(&self) -> bool {
        self.src.is_compressed()
    }

    pub fn compress(&mut self) {
        self.src.compress();
    }

    pub fn uncompress(&mut self) {
        self.src.uncompress();
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    /// `self[row, col]`, i.e. the underlying `[col, row]`
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        self.check_bounds(row, col)?;
        self.src.get(col, row)
    }

    /// store through the view; lands at the underlying `[col, row]`
    pub fn set(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        self.src.set(col, row, v)
    }

    /// scoped accessor through the view
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<Entry<'_, T>, MatrixError> {
        self.check_bounds(row, col)?;
        self.src.at_mut(col, row)
    }

    /// Norm of the transposed matrix: the one and infinity norms swap,
    /// the Frobenius norm is unchanged.
    pub fn norm(&self, kind: NormKind) -> T::Magnitude {
        match kind {
            NormKind::One => self.src.norm(NormKind::Infinity),
            NormKind::Infinity => self.src.norm(NormKind::One),
            NormKind::Frobenius => self.src.norm(NormKind::Frobenius),
        }
    }

    /// load the underlying matrix from a Matrix Market file
    pub fn read_matrix_market<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<(), MatrixError>
    where
        T: std::str::FromStr,
    {
        self.src.read_matrix_market(path)
    }
}

/// Diagonal view of a square matrix
///
/// Exposes only the main diagonal: off-diagonal reads yield zero and
/// off-diagonal writes are rejected as
/// [`IllegalStructure`](crate::MatrixError::IllegalStructure).
pub struct DiagonalView<'a, T>
where
    T: ScalarT,
{
    src: &'a mut SquareMatrix<T>,
}

impl<'a, T> DiagonalView<'a, T>
where
    T: ScalarT,
{
    pub fn new(src: &'a mut SquareMatrix<T>) -> Self {
        DiagonalView { src }
    }

    pub(crate) fn src(&self) -> &SquareMatrix<T> {
        self.src
    }

    /// side length of the underlying matrix
    pub fn dim(&self) -> usize {
        self.src.dim()
    }

    pub fn rows(&self) -> usize {
        self.dim()
    }

    pub fn cols(&self) -> usize {
        self.dim()
    }

    pub fn is_compressed(&self) -> bool {
        self.src.is_compressed()
    }

    pub fn is_modified(&self) -> bool {
        self.src.is_modified()
    }

    pub fn compress(&mut self) {
        self.src.compress();
    }

    pub fn uncompress(&mut self) {
        self.src.uncompress();
    }

    pub fn compress_mod(&mut self) {
        self.src.compress_mod();
    }

    /// number of nonzero diagonal slots
    pub fn nnz(&self) -> usize {
        (0..self.dim())
            .filter(|&i| !self.diag_value(i).is_zero())
            .count()
    }

    // diagonal value straight from the active storage, without state
    // changes
    pub(crate) fn diag_value(&self, i: usize) -> T {
        let idx = Index { major: i, minor: i };
        match &self.src.msx {
            Some(msx) => msx.values[i],
            None => match &self.src.base.repr {
                MatrixRepr::Coo(coo) => coo.value_or_zero(idx),
                MatrixRepr::Csx(csx) => csx.get(idx).unwrap_or_else(T::zero),
            },
        }
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.dim() || col >= self.dim() {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.dim(),
                cols: self.dim(),
            });
        }
        Ok(())
    }

    /// diagonal entries read through; off-diagonal reads are zero
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        self.check_bounds(row, col)?;
        if row == col {
            Ok(self.diag_value(row))
        } else {
            Ok(T::zero())
        }
    }

    /// diagonal writes pass through; off-diagonal writes are rejected
    pub fn set(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        if row != col {
            return Err(MatrixError::IllegalStructure { row, col });
        }
        self.src.set(row, col, v)
    }

    /// scoped accessor for the i-th diagonal entry
    pub fn at_mut(&mut self, i: usize) -> Result<Entry<'_, T>, MatrixError> {
        self.src.at_mut(i, i)
    }

    /// Norm of the diagonal part: the one and infinity norms both reduce
    /// to the largest diagonal magnitude.
    pub fn norm(&self, kind: NormKind) -> T::Magnitude {
        match kind {
            NormKind::One | NormKind::Infinity => (0..self.dim())
                .fold(T::Magnitude::zero(), |m, i| {
                    T::Magnitude::max(m, self.diag_value(i).modulus())
                }),
            NormKind::Frobenius => (0..self.dim())
                .fold(T::Magnitude::zero(), |acc, i| {
                    acc + self.diag_value(i).modulus_sqr()
                })
                .sqrt(),
        }
    }

    /// load the underlying matrix from a Matrix Market file, which must
    /// describe a square matrix
    pub fn read_matrix_market<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<(), MatrixError>
    where
        T: std::str::FromStr,
    {
        self.src.read_matrix_market(path)
    }
}
