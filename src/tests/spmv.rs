#![allow(non_snake_case)]
use crate::*;
use num_complex::Complex;

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

#[test]
fn test_spmv_all_representations() {
    let x = vec![1.0, 2.0, 3.0];
    let expected = vec![14.0, 0.0, 9.0];

    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let mut A = test_matrix_3x3(order);
        assert_eq!(A.mul_vec(&x).unwrap(), expected);

        A.compress();
        assert_eq!(A.mul_vec(&x).unwrap(), expected);
    }
}

#[test]
fn test_spmv_modified_representation() {
    let x = vec![1.0, 2.0, 3.0];
    let expected = vec![14.0, 0.0, 9.0];

    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let mut A = SquareMatrix::new(3, order);
        A.set(0, 0, 1.0).unwrap();
        A.set(0, 1, 2.0).unwrap();
        A.set(0, 2, 3.0).unwrap();
        A.set(2, 0, 3.0).unwrap();
        A.set(2, 1, 3.0).unwrap();

        assert_eq!(A.mul_vec(&x).unwrap(), expected);
        A.compress_mod();
        assert_eq!(A.mul_vec(&x).unwrap(), expected);
        A.compress();
        assert_eq!(A.mul_vec(&x).unwrap(), expected);
    }
}

#[test]
fn test_spmv_shape_mismatch() {
    let A = test_matrix_3x3(StorageOrder::RowMajor);
    assert!(matches!(
        A.mul_vec(&[1.0, 2.0]),
        Err(MatrixError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_transpose_spmv() {
    // A^T =
    //[ 1.0   ⋅   3.0]
    //[ 2.0   ⋅   3.0]
    //[ 3.0   ⋅    ⋅ ]
    let x = vec![1.0, 2.0, 3.0];
    let expected = vec![10.0, 11.0, 3.0];

    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let mut A = test_matrix_3x3(order);
        assert_eq!(A.t().mul_vec(&x).unwrap(), expected);

        A.compress();
        assert_eq!(A.t().mul_vec(&x).unwrap(), expected);
    }
}

#[test]
fn test_transpose_spmv_rectangular() {
    // A =
    //[ 1.0  2.0]
    //[  ⋅   4.0]
    //[ 5.0   ⋅ ]
    let mut A = Matrix::<f64>::new(3, 2, StorageOrder::RowMajor);
    A.set(0, 0, 1.0).unwrap();
    A.set(0, 1, 2.0).unwrap();
    A.set(1, 1, 4.0).unwrap();
    A.set(2, 0, 5.0).unwrap();
    A.compress();

    // A^T is 2x3, so the operand length follows the view's shape
    assert!(matches!(
        A.t().mul_vec(&[1.0, 1.0]),
        Err(MatrixError::ShapeMismatch { .. })
    ));
    assert_eq!(A.t().mul_vec(&[1.0, 1.0, 1.0]).unwrap(), vec![6.0, 6.0]);
}

#[test]
fn test_diagonal_spmv() {
    // diagonal [2, -1, 0, 5] with an ignored off-diagonal entry
    let mut A = SquareMatrix::new(4, StorageOrder::RowMajor);
    A.set(0, 0, 2.0).unwrap();
    A.set(1, 1, -1.0).unwrap();
    A.set(3, 3, 5.0).unwrap();
    A.set(1, 3, 7.0).unwrap();

    let x = vec![1.0, 1.0, 1.0, 1.0];
    let expected = vec![2.0, -1.0, 0.0, 5.0];

    assert_eq!(A.diag().mul_vec(&x).unwrap(), expected);

    A.compress();
    assert_eq!(A.diag().mul_vec(&x).unwrap(), expected);

    A.compress_mod();
    assert_eq!(A.diag().mul_vec(&x).unwrap(), expected);

    assert!(A.diag().mul_vec(&[1.0, 1.0]).is_err());
}

#[test]
fn test_spmv_complex() {
    let i = Complex::new(0.0, 1.0);
    let one = Complex::new(1.0, 0.0);

    // A = [1  i]
    //     [⋅  1+i]
    let mut A = Matrix::<Complex<f64>>::new(2, 2, StorageOrder::RowMajor);
    A.set(0, 0, one).unwrap();
    A.set(0, 1, i).unwrap();
    A.set(1, 1, one + i).unwrap();
    A.compress();

    let x = vec![one, i];
    let y = A.mul_vec(&x).unwrap();
    // [1*1 + i*i, (1+i)*i] = [0, -1+i]
    assert_eq!(y[0], Complex::new(0.0, 0.0));
    assert_eq!(y[1], Complex::new(-1.0, 1.0));
}

#[test]
fn test_spmv_linearity() {
    use approx::assert_abs_diff_eq;

    let mut A = test_matrix_3x3(StorageOrder::RowMajor);
    A.compress();

    let v = [1.0, -2.0, 0.5];
    let w = [3.0, 0.0, -1.0];
    let (alpha, beta) = (2.5, -0.75);

    let combined: Vec<f64> = (0..3).map(|k| alpha * v[k] + beta * w[k]).collect();
    let lhs = A.mul_vec(&combined).unwrap();

    let Av = A.mul_vec(&v).unwrap();
    let Aw = A.mul_vec(&w).unwrap();
    for k in 0..3 {
        assert_abs_diff_eq!(lhs[k], alpha * Av[k] + beta * Aw[k], epsilon = 1e-12);
    }
}
