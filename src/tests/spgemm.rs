#![allow(non_snake_case)]
use crate::*;
use itertools::iproduct;

fn test_matrix_3x3(order: StorageOrder) -> Matrix<f64> {
    // A =
    //[ 1.0  2.0  3.0]
    //[  ⋅    ⋅    ⋅ ]
    //[ 3.0  3.0   ⋅ ]
    let mut A = Matrix::new(3, 3, order);
    A.set(0, 0, 1.0).unwrap();
    A.set(0, 1, 2.0).unwrap();
    A.set(0, 2, 3.0).unwrap();
    A.set(2, 0, 3.0).unwrap();
    A.set(2, 1, 3.0).unwrap();
    A
}

// A * A =
//[ 10.0  11.0  3.0]
//[   ⋅     ⋅    ⋅ ]
//[  3.0   6.0  9.0]
const A_SQUARED: [[f64; 3]; 3] = [[10.0, 11.0, 3.0], [0.0, 0.0, 0.0], [3.0, 6.0, 9.0]];

fn assert_dense_eq(C: &Matrix<f64>, expected: &[[f64; 3]; 3]) {
    for (r, c) in iproduct!(0..3, 0..3) {
        assert_eq!(C.get(r, c).unwrap(), expected[r][c], "mismatch at ({r},{c})");
    }
}

#[test]
fn test_spgemm_uncompressed() {
    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let A = test_matrix_3x3(order);
        let C = A.mul_mat(&A).unwrap();

        assert!(!C.is_compressed());
        assert_eq!(C.nnz(), 6);
        assert_dense_eq(&C, &A_SQUARED);
    }
}

#[test]
fn test_spgemm_compressed() {
    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let mut A = test_matrix_3x3(order);
        A.compress();
        let C = A.mul_mat(&A).unwrap();

        assert!(!C.is_compressed());
        assert_eq!(C.nnz(), 6);
        assert_dense_eq(&C, &A_SQUARED);
    }
}

#[test]
fn test_spgemm_rectangular() {
    // A = [1 2 0]    B = [1 0]
    //     [0 0 3]        [0 2]
    //                    [4 0]
    let mut A = Matrix::<f64>::new(2, 3, StorageOrder::RowMajor);
    A.set(0, 0, 1.0).unwrap();
    A.set(0, 1, 2.0).unwrap();
    A.set(1, 2, 3.0).unwrap();

    let mut B = Matrix::<f64>::new(3, 2, StorageOrder::RowMajor);
    B.set(0, 0, 1.0).unwrap();
    B.set(1, 1, 2.0).unwrap();
    B.set(2, 0, 4.0).unwrap();

    A.compress();
    B.compress();
    let C = A.mul_mat(&B).unwrap();

    assert_eq!(C.rows(), 2);
    assert_eq!(C.cols(), 2);
    assert_eq!(C.get(0, 0).unwrap(), 1.0);
    assert_eq!(C.get(0, 1).unwrap(), 4.0);
    assert_eq!(C.get(1, 0).unwrap(), 12.0);
    assert_eq!(C.get(1, 1).unwrap(), 0.0);
}

#[test]
fn test_spgemm_preconditions() {
    let A = test_matrix_3x3(StorageOrder::RowMajor);

    // shape
    let B = Matrix::<f64>::new(4, 3, StorageOrder::RowMajor);
    assert!(matches!(
        A.mul_mat(&B),
        Err(MatrixError::ShapeMismatch { .. })
    ));

    // storage order
    let B = Matrix::<f64>::new(3, 3, StorageOrder::ColumnMajor);
    assert!(matches!(A.mul_mat(&B), Err(MatrixError::FormatMismatch)));

    // representation family
    let mut B = test_matrix_3x3(StorageOrder::RowMajor);
    B.compress();
    assert!(matches!(A.mul_mat(&B), Err(MatrixError::FormatMismatch)));
}

#[test]
fn test_spgemm_cancellation_not_stored() {
    // [1 -1] * [1; 1] = [0]: the cancelled cell must not appear in the
    // result's store
    let mut A = Matrix::<f64>::new(1, 2, StorageOrder::RowMajor);
    A.set(0, 0, 1.0).unwrap();
    A.set(0, 1, -1.0).unwrap();

    let mut B = Matrix::<f64>::new(2, 1, StorageOrder::RowMajor);
    B.set(0, 0, 1.0).unwrap();
    B.set(1, 0, 1.0).unwrap();

    let C = A.mul_mat(&B).unwrap();
    assert_eq!(C.nnz(), 0);
    assert_eq!(C.get(0, 0).unwrap(), 0.0);
}

#[test]
fn test_spgemm_modified() {
    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let mut A = SquareMatrix::new(3, order);
        A.set(0, 0, 1.0).unwrap();
        A.set(0, 1, 2.0).unwrap();
        A.set(0, 2, 3.0).unwrap();
        A.set(2, 0, 3.0).unwrap();
        A.set(2, 1, 3.0).unwrap();
        A.compress_mod();

        let C = A.mul_mat(&A).unwrap();
        assert!(!C.is_modified());
        assert!(!C.is_compressed());
        for (r, c) in iproduct!(0..3, 0..3) {
            assert_eq!(C.get(r, c).unwrap(), A_SQUARED[r][c]);
        }
    }
}

#[test]
fn test_spgemm_modified_family_mismatch() {
    let mut A = SquareMatrix::<f64>::new(3, StorageOrder::RowMajor);
    A.set(0, 0, 1.0).unwrap();
    let B = A.clone();

    A.compress_mod();
    assert!(matches!(A.mul_mat(&B), Err(MatrixError::FormatMismatch)));
}

#[test]
fn test_transpose_times_transpose() {
    // T(A) * T(B) = T(B * A)
    let mut A = test_matrix_3x3(StorageOrder::RowMajor);
    let mut B = Matrix::<f64>::new(3, 3, StorageOrder::RowMajor);
    B.set(0, 1, 1.0).unwrap();
    B.set(1, 2, 2.0).unwrap();
    B.set(2, 0, -1.0).unwrap();

    let P = B.mul_mat(&A).unwrap();
    let C = A.t().mul_transpose(&B.t()).unwrap();

    assert!(!C.is_compressed());
    assert_eq!(C.rows(), 3);
    assert_eq!(C.cols(), 3);
    for (r, c) in iproduct!(0..3, 0..3) {
        assert_eq!(C.get(r, c).unwrap(), P.get(c, r).unwrap());
    }
}

#[test]
fn test_transpose_times_matrix() {
    let mut A = test_matrix_3x3(StorageOrder::RowMajor);
    let B = test_matrix_3x3(StorageOrder::RowMajor);

    // reference: materialize A^T by hand
    let mut At = Matrix::<f64>::new(3, 3, StorageOrder::RowMajor);
    for (r, c) in iproduct!(0..3, 0..3) {
        At.set(r, c, A.get(c, r).unwrap()).unwrap();
    }
    let reference = At.mul_mat(&B).unwrap();

    let C = A.t().mul_mat(&B).unwrap();
    for (r, c) in iproduct!(0..3, 0..3) {
        assert_eq!(C.get(r, c).unwrap(), reference.get(r, c).unwrap());
    }

    // the join path accepts a compressed right-hand side
    let mut B = B;
    B.compress();
    let C = A.t().mul_mat(&B).unwrap();
    for (r, c) in iproduct!(0..3, 0..3) {
        assert_eq!(C.get(r, c).unwrap(), reference.get(r, c).unwrap());
    }
}

#[test]
fn test_matrix_times_transpose() {
    let A = test_matrix_3x3(StorageOrder::RowMajor);
    let mut B = test_matrix_3x3(StorageOrder::RowMajor);

    // reference: A * B^T by dense accumulation
    let mut reference = [[0.0; 3]; 3];
    for (r, c, k) in iproduct!(0..3, 0..3, 0..3) {
        reference[r][c] += A.get(r, k).unwrap() * B.get(c, k).unwrap();
    }

    let C = A.mul_transpose(&B.t()).unwrap();
    for (r, c) in iproduct!(0..3, 0..3) {
        assert_eq!(C.get(r, c).unwrap(), reference[r][c]);
    }
}

#[test]
fn test_diagonal_times_diagonal() {
    let mut A = SquareMatrix::<f64>::new(3, StorageOrder::RowMajor);
    A.set(0, 0, 2.0).unwrap();
    A.set(1, 1, -1.0).unwrap();
    A.set(0, 2, 9.0).unwrap(); // ignored by the view

    let mut B = SquareMatrix::<f64>::new(3, StorageOrder::RowMajor);
    B.set(0, 0, 4.0).unwrap();
    B.set(2, 2, 5.0).unwrap();

    let C = A.diag().mul_diag(&B.diag()).unwrap();
    assert!(!C.is_compressed());
    assert_eq!(C.nnz(), 1);
    assert_eq!(C.get(0, 0).unwrap(), 8.0);
    assert_eq!(C.get(1, 1).unwrap(), 0.0);
    assert_eq!(C.get(2, 2).unwrap(), 0.0);
}

#[test]
fn test_matrix_times_diagonal_scales_columns() {
    let mut A = test_matrix_3x3(StorageOrder::RowMajor);
    A.compress();

    let mut D = SquareMatrix::<f64>::new(3, StorageOrder::RowMajor);
    D.set(0, 0, 2.0).unwrap();
    D.set(1, 1, -1.0).unwrap();
    D.set(2, 2, 0.5).unwrap();

    let C = A.mul_diag(&D.diag()).unwrap();
    let expected = [[2.0, -2.0, 1.5], [0.0, 0.0, 0.0], [6.0, -3.0, 0.0]];
    assert_dense_eq(&C, &expected);
}

#[test]
fn test_diagonal_times_matrix_scales_rows() {
    let A = test_matrix_3x3(StorageOrder::RowMajor);

    let mut D = SquareMatrix::<f64>::new(3, StorageOrder::RowMajor);
    D.set(0, 0, 2.0).unwrap();
    D.set(2, 2, -1.0).unwrap();

    let C = D.diag().mul_mat(&A).unwrap();
    let expected = [[2.0, 4.0, 6.0], [0.0, 0.0, 0.0], [-3.0, -3.0, 0.0]];
    assert_dense_eq(&C, &expected);
}

#[test]
fn test_spgemm_aliasing_allowed() {
    // A * A with A aliasing both operands writes only into the fresh
    // result
    let mut A = test_matrix_3x3(StorageOrder::RowMajor);
    A.compress();
    let C = A.mul_mat(&A).unwrap();
    assert_dense_eq(&C, &A_SQUARED);
    assert!(A.is_compressed());
    assert_eq!(A.nnz(), 5);
}
