//! Sparse matrix storage formats and the operations that go with them.
//!
//! A [`Matrix`] holds a two-dimensional array of mostly-zero scalar values
//! in one of two interchangeable representations: an ordered coordinate
//! store for construction and a three-array compressed form (CSR or CSC,
//! depending on the matrix's [`StorageOrder`]) for the product kernels.
//! [`SquareMatrix`] adds a third, diagonal-aware representation (MSR/MSC)
//! in which the main diagonal occupies a reserved prefix of the value
//! array.  Conversions between representations are explicit, idempotent
//! and lossless.
//!
//! [`TransposeView`] and [`DiagonalView`] re-map coordinates over an
//! existing matrix without copying, and the matrix-vector and
//! matrix-matrix products specialize on them.  Matrices load from the
//! Matrix Market coordinate format via
//! [`read_matrix_market`](Matrix::read_matrix_market).
//!
//! All element types implementing [`ScalarT`] are supported, including
//! the complex floats; norms and magnitudes are reported on the scalar's
//! associated [`FloatT`] magnitude type.

mod error;
mod io;
mod matrix;
mod ops;
mod scalar;
mod storage;
mod types;
mod views;

pub use error::{FormatError, MatrixError};
pub use matrix::{Entry, Matrix, SquareMatrix};
pub use scalar::{FloatT, ScalarT};
pub use types::{NormKind, StorageOrder};
pub use views::{DiagonalView, TransposeView};

//configure tests of internals
#[cfg(test)]
mod tests;
