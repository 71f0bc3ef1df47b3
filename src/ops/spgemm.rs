#![allow(non_snake_case)]

use crate::error::MatrixError;
use crate::matrix::{Matrix, MatrixRepr, SquareMatrix};
use crate::scalar::ScalarT;
use crate::storage::{CooStorage, CsxStorage, MsxStorage};
use crate::types::{Index, StorageOrder};
use crate::views::{DiagonalView, TransposeView};

impl<T> Matrix<T>
where
    T: ScalarT,
{
    /// Matrix-matrix product `A * B`.
    ///
    /// Both operands must share the storage order and be in the same
    /// representation family (both compressed or both uncompressed).  The
    /// result is a fresh matrix in uncompressed state; cancellations to
    /// zero are never stored.
    pub fn mul_mat(&self, other: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        if self.order != other.order {
            return Err(MatrixError::FormatMismatch);
        }

        let mut acc = CooStorage::new();
        match (&self.repr, &other.repr) {
            (MatrixRepr::Coo(a), MatrixRepr::Coo(b)) => _coo_spgemm(self.order, a, b, &mut acc),
            (MatrixRepr::Csx(a), MatrixRepr::Csx(b)) => match self.order {
                StorageOrder::RowMajor => _csr_spgemm(a, b, &mut acc),
                StorageOrder::ColumnMajor => _csc_spgemm(a, b, &mut acc),
            },
            _ => return Err(MatrixError::FormatMismatch),
        }

        let mut out = Matrix::new(self.rows, other.cols, self.order);
        out.repr = MatrixRepr::Coo(acc);
        Ok(out)
    }

    /// Product `A * D` with a diagonal view: scales the columns of `A`.
    /// The result is a fresh matrix in uncompressed state.
    pub fn mul_diag(&self, d: &DiagonalView<'_, T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols != d.dim() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows, self.cols),
                rhs: (d.dim(), d.dim()),
            });
        }
        let mut acc = CooStorage::new();
        for (r, c, v) in self.iter() {
            acc.set(self.order.to_storage(r, c), v * d.diag_value(c));
        }
        let mut out = Matrix::new(self.rows, d.dim(), self.order);
        out.repr = MatrixRepr::Coo(acc);
        Ok(out)
    }

    /// Product `A * T(B)`: the transposed operand is materialized in
    /// uncompressed form and the product falls back to an entry join, so
    /// the operands need not share a representation family.
    pub fn mul_transpose(&self, other: &TransposeView<'_, T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows, self.cols),
                rhs: (other.rows(), other.cols()),
            });
        }
        if self.order != other.src().order {
            return Err(MatrixError::FormatMismatch);
        }
        let tb = Matrix::from_transpose(other);
        Ok(_join_spgemm(self, &tb))
    }
}

impl<T> SquareMatrix<T>
where
    T: ScalarT,
{
    /// Square matrix-matrix product, with the same preconditions as the
    /// general product plus a third accepted pairing: both operands in
    /// modified compressed form.
    pub fn mul_mat(&self, other: &SquareMatrix<T>) -> Result<SquareMatrix<T>, MatrixError> {
        if self.dim() != other.dim() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.dim(), self.dim()),
                rhs: (other.dim(), other.dim()),
            });
        }
        if self.order() != other.order() {
            return Err(MatrixError::FormatMismatch);
        }

        match (&self.msx, &other.msx) {
            (Some(a), Some(b)) => {
                let n = self.dim();
                let mut acc = CooStorage::new();
                _msx_spgemm(self.order(), a, b, n, &mut acc);
                let mut base = Matrix::new(n, n, self.order());
                base.repr = MatrixRepr::Coo(acc);
                Ok(SquareMatrix { base, msx: None })
            }
            (None, None) => {
                let base = self.base.mul_mat(&other.base)?;
                Ok(SquareMatrix { base, msx: None })
            }
            _ => Err(MatrixError::FormatMismatch),
        }
    }
}

impl<'a, T> TransposeView<'a, T>
where
    T: ScalarT,
{
    /// Product of two transposed views: `T(A) * T(B) = T(B * A)`.
    ///
    /// Computes `B * A` with the ordinary kernels, then materializes the
    /// transpose of the result in uncompressed form.
    pub fn mul_transpose(&self, other: &TransposeView<'_, T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows(), self.cols()),
                rhs: (other.rows(), other.cols()),
            });
        }
        let mut p = other.src().mul_mat(self.src())?;
        Ok(Matrix::from_transpose(&p.t()))
    }

    /// Product `T(A) * B`: the view is materialized in uncompressed form
    /// and the product falls back to an entry join.
    pub fn mul_mat(&self, other: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows(), self.cols()),
                rhs: (other.rows(), other.cols()),
            });
        }
        if self.src().order() != other.order() {
            return Err(MatrixError::FormatMismatch);
        }
        let ta = Matrix::from_transpose(self);
        Ok(_join_spgemm(&ta, other))
    }
}

impl<'a, T> DiagonalView<'a, T>
where
    T: ScalarT,
{
    /// Product of two diagonal views: a diagonal square matrix of
    /// elementwise products, in uncompressed state.
    pub fn mul_diag(&self, other: &DiagonalView<'_, T>) -> Result<SquareMatrix<T>, MatrixError> {
        if self.dim() != other.dim() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.dim(), self.dim()),
                rhs: (other.dim(), other.dim()),
            });
        }
        let mut out = SquareMatrix::new(self.dim(), self.src().order());
        for i in 0..self.dim() {
            out.set(i, i, self.diag_value(i) * other.diag_value(i))?;
        }
        Ok(out)
    }

    /// Product `D * A` with a general matrix: scales the rows of `A`.
    /// The result is a fresh matrix in uncompressed state.
    pub fn mul_mat(&self, other: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.dim() != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.dim(), self.dim()),
                rhs: (other.rows(), other.cols()),
            });
        }
        let mut acc = CooStorage::new();
        for (r, c, v) in other.iter() {
            acc.set(other.order().to_storage(r, c), self.diag_value(r) * v);
        }
        let mut out = Matrix::new(self.dim(), other.cols(), other.order());
        out.repr = MatrixRepr::Coo(acc);
        Ok(out)
    }
}

// nested join on a.col == b.row, accumulating through the
// zero-suppressing store
fn _coo_spgemm<T: ScalarT>(
    order: StorageOrder,
    A: &CooStorage<T>,
    B: &CooStorage<T>,
    acc: &mut CooStorage<T>,
) {
    for (ia, va) in A.iter() {
        let (ra, ca) = order.to_row_col(ia.major, ia.minor);
        for (ib, vb) in B.iter() {
            let (rb, cb) = order.to_row_col(ib.major, ib.minor);
            if ca == rb {
                acc.add(order.to_storage(ra, cb), va * vb);
            }
        }
    }
}

// Gustavson: row i of C accumulates row k of B for every stored A[i,k]
fn _csr_spgemm<T: ScalarT>(A: &CsxStorage<T>, B: &CsxStorage<T>, acc: &mut CooStorage<T>) {
    for i in 0..A.majors() {
        for (k, av) in A.slice(i) {
            for (j, bv) in B.slice(k) {
                acc.add(Index { major: i, minor: j }, av * bv);
            }
        }
    }
}

// mirror case: column j of C accumulates column k of A for every stored
// B[k,j]
fn _csc_spgemm<T: ScalarT>(A: &CsxStorage<T>, B: &CsxStorage<T>, acc: &mut CooStorage<T>) {
    for j in 0..B.majors() {
        for (k, bv) in B.slice(j) {
            for (i, av) in A.slice(k) {
                acc.add(Index { major: j, minor: i }, av * bv);
            }
        }
    }
}

// The modified-form product decomposes into four contributions:
// off(A)*off(B), off(A)*diag(B), diag(A)*off(B) and diag(A)*diag(B).
fn _msx_spgemm<T: ScalarT>(
    order: StorageOrder,
    A: &MsxStorage<T>,
    B: &MsxStorage<T>,
    n: usize,
    acc: &mut CooStorage<T>,
) {
    let ad = A.diag(n);
    let bd = B.diag(n);
    match order {
        StorageOrder::RowMajor => {
            for i in 0..n {
                for (k, av) in A.offdiag_slice(n, i) {
                    for (j, bv) in B.offdiag_slice(n, k) {
                        acc.add(Index { major: i, minor: j }, av * bv);
                    }
                    acc.add(Index { major: i, minor: k }, av * bd[k]);
                }
                for (j, bv) in B.offdiag_slice(n, i) {
                    acc.add(Index { major: i, minor: j }, ad[i] * bv);
                }
                acc.add(Index { major: i, minor: i }, ad[i] * bd[i]);
            }
        }
        StorageOrder::ColumnMajor => {
            for j in 0..n {
                for (k, bv) in B.offdiag_slice(n, j) {
                    for (r, av) in A.offdiag_slice(n, k) {
                        acc.add(Index { major: j, minor: r }, av * bv);
                    }
                    acc.add(Index { major: j, minor: k }, ad[k] * bv);
                }
                for (r, av) in A.offdiag_slice(n, j) {
                    acc.add(Index { major: j, minor: r }, av * bd[j]);
                }
                acc.add(Index { major: j, minor: j }, ad[j] * bd[j]);
            }
        }
    }
}

// entry join over any representation pair; used by the mixed
// transpose-view products after materialization
fn _join_spgemm<T: ScalarT>(A: &Matrix<T>, B: &Matrix<T>) -> Matrix<T> {
    let order = A.order();
    let mut acc = CooStorage::new();
    for (ra, ca, va) in A.iter() {
        for (rb, cb, vb) in B.iter() {
            if ca == rb {
                acc.add(order.to_storage(ra, cb), va * vb);
            }
        }
    }
    let mut out = Matrix::new(A.rows(), B.cols(), order);
    out.repr = MatrixRepr::Coo(acc);
    out
}
