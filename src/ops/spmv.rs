#![allow(non_snake_case)]

use crate::error::MatrixError;
use crate::matrix::{Matrix, MatrixRepr, SquareMatrix};
use crate::scalar::ScalarT;
use crate::storage::{CooStorage, CsxStorage, MsxStorage};
use crate::types::StorageOrder;
use crate::views::{DiagonalView, TransposeView};

impl<T> Matrix<T>
where
    T: ScalarT,
{
    /// Matrix-vector product `A * x`.
    ///
    /// Requires `x.len() == self.cols()`.  Dispatches on the active
    /// representation and touches only stored entries.
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        if x.len() != self.cols {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows, self.cols),
                rhs: (x.len(), 1),
            });
        }
        let mut y = vec![T::zero(); self.rows];
        match (&self.repr, self.order) {
            (MatrixRepr::Coo(coo), order) => _coo_spmv(order, coo, x, &mut y),
            (MatrixRepr::Csx(csx), StorageOrder::RowMajor) => _csr_spmv(csx, x, &mut y),
            (MatrixRepr::Csx(csx), StorageOrder::ColumnMajor) => _csc_spmv(csx, x, &mut y),
        }
        Ok(y)
    }
}

impl<T> SquareMatrix<T>
where
    T: ScalarT,
{
    /// Matrix-vector product `A * x`; in modified form the off-diagonal
    /// region and the diagonal slots are accumulated separately.
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        match &self.msx {
            Some(msx) => {
                let n = self.dim();
                if x.len() != n {
                    return Err(MatrixError::ShapeMismatch {
                        lhs: (n, n),
                        rhs: (x.len(), 1),
                    });
                }
                let mut y = vec![T::zero(); n];
                _msx_spmv(self.order(), msx, n, x, &mut y);
                Ok(y)
            }
            None => self.base.mul_vec(x),
        }
    }
}

impl<'a, T> TransposeView<'a, T>
where
    T: ScalarT,
{
    /// Product of the transposed view with a vector.
    ///
    /// Runs against the underlying storage with the roles of the two axes
    /// swapped: gather loops become scatter loops and vice versa.  Nothing
    /// is materialized.
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        let A = self.src();
        if x.len() != self.cols() {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.rows(), self.cols()),
                rhs: (x.len(), 1),
            });
        }
        let mut y = vec![T::zero(); self.rows()];
        match (&A.repr, A.order) {
            (MatrixRepr::Coo(coo), order) => {
                for (idx, v) in coo.iter() {
                    let (r, c) = order.to_row_col(idx.major, idx.minor);
                    y[c] += v * x[r];
                }
            }
            // CSR slices are rows of A, i.e. columns of the view: scatter
            (MatrixRepr::Csx(csx), StorageOrder::RowMajor) => {
                for i in 0..csx.majors() {
                    for (minor, v) in csx.slice(i) {
                        y[minor] += v * x[i];
                    }
                }
            }
            // CSC slices are columns of A, i.e. rows of the view: gather
            (MatrixRepr::Csx(csx), StorageOrder::ColumnMajor) => {
                for j in 0..csx.majors() {
                    let mut sum = T::zero();
                    for (minor, v) in csx.slice(j) {
                        sum += v * x[minor];
                    }
                    y[j] = sum;
                }
            }
        }
        Ok(y)
    }
}

impl<'a, T> DiagonalView<'a, T>
where
    T: ScalarT,
{
    /// Product of the diagonal view with a vector: an elementwise
    /// multiply of the diagonal by `x`.
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        let n = self.dim();
        if x.len() != n {
            return Err(MatrixError::ShapeMismatch {
                lhs: (n, n),
                rhs: (x.len(), 1),
            });
        }
        let y = (0..n).map(|i| self.diag_value(i) * x[i]).collect();
        Ok(y)
    }
}

fn _coo_spmv<T: ScalarT>(order: StorageOrder, A: &CooStorage<T>, x: &[T], y: &mut [T]) {
    for (idx, v) in A.iter() {
        let (r, c) = order.to_row_col(idx.major, idx.minor);
        y[r] += v * x[c];
    }
}

// row-wise gather
fn _csr_spmv<T: ScalarT>(A: &CsxStorage<T>, x: &[T], y: &mut [T]) {
    for (i, yi) in y.iter_mut().enumerate() {
        let mut sum = T::zero();
        for (col, v) in A.slice(i) {
            sum += v * x[col];
        }
        *yi = sum;
    }
}

// column-wise scatter
fn _csc_spmv<T: ScalarT>(A: &CsxStorage<T>, x: &[T], y: &mut [T]) {
    for (j, &xj) in x.iter().enumerate() {
        for (row, v) in A.slice(j) {
            y[row] += v * xj;
        }
    }
}

// off-diagonal entries first, then one fused pass over the diagonal slots
fn _msx_spmv<T: ScalarT>(order: StorageOrder, A: &MsxStorage<T>, n: usize, x: &[T], y: &mut [T]) {
    for i in 0..n {
        for (minor, v) in A.offdiag_slice(n, i) {
            let (r, c) = order.to_row_col(i, minor);
            y[r] += v * x[c];
        }
    }
    for (i, &d) in A.diag(n).iter().enumerate() {
        y[i] += d * x[i];
    }
}
