use std::cell::Cell;

use approx::assert_relative_eq;
use densexpr::{
    Caps, Constant, DenseBase, Expr, ExprTraits, LinearAccess, Matrix, Role, Scalar, Select,
    Truthy,
};
use fastrand::Rng;
use rayon::prelude::*;

fn random_shape(rng: &mut Rng) -> (usize, usize) {
    (rng.usize(0..7), rng.usize(0..7))
}

fn random_mask(rng: &mut Rng, (rows, cols): (usize, usize)) -> Matrix<bool> {
    Matrix::from_fn(rows, cols, |_, _| rng.bool())
}

fn random_ints(rng: &mut Rng, (rows, cols): (usize, usize)) -> Matrix<i32> {
    Matrix::from_fn(rows, cols, |_, _| rng.i32(-100..100))
}

fn traits_of<X: Expr>(_: &X) -> ExprTraits {
    X::TRAITS
}

/// Wraps a matrix and counts how many of its coefficients are read.
struct Counting<'a, T> {
    inner: &'a Matrix<T>,
    reads: &'a Cell<usize>,
}

impl<T: Scalar> Expr for Counting<'_, T> {
    type Elem = T;

    const TRAITS: ExprTraits = Matrix::<T>::TRAITS;

    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn coeff(&self, row: usize, col: usize) -> T {
        self.reads.set(self.reads.get() + 1);
        self.inner.coeff(row, col)
    }
}

#[test]
fn select_is_coefficient_wise_ternary() {
    let mut rng = Rng::with_seed(0x5e1ec7);
    for _ in 0..200 {
        let shape = random_shape(&mut rng);
        let cond = random_mask(&mut rng, shape);
        let a = random_ints(&mut rng, shape);
        let b = random_ints(&mut rng, shape);

        let sel = cond.select(&a, &b);
        assert_eq!(sel.shape(), shape);
        for col in 0..shape.1 {
            for row in 0..shape.0 {
                let expected = if cond[(row, col)] { a[(row, col)] } else { b[(row, col)] };
                assert_eq!(sel.coeff(row, col), expected);
                assert_eq!(sel.coeff_linear(col * shape.0 + row), expected);
            }
        }
    }
}

#[test]
fn scalar_broadcast_equivalence() {
    let mut rng = Rng::with_seed(42);
    for _ in 0..100 {
        let shape = random_shape(&mut rng);
        let cond = random_mask(&mut rng, shape);
        let a = random_ints(&mut rng, shape);
        let x = rng.i32(..);

        let broadcast = Constant::new(shape.0, shape.1, x);
        assert_eq!(
            cond.select_else_scalar(&a, x).eval::<Matrix<_>>(),
            cond.select(&a, &broadcast).eval::<Matrix<_>>(),
        );
        assert_eq!(
            cond.select_then_scalar(x, &a).eval::<Matrix<_>>(),
            cond.select(&broadcast, &a).eval::<Matrix<_>>(),
        );
    }
}

#[test]
fn composition_matches_materialization() {
    let mut rng = Rng::with_seed(7);
    for _ in 0..100 {
        let shape = random_shape(&mut rng);
        let outer = random_mask(&mut rng, shape);
        let inner = random_mask(&mut rng, shape);
        let a = random_ints(&mut rng, shape);
        let b = random_ints(&mut rng, shape);
        let c = random_ints(&mut rng, shape);

        let nested = inner.select(&a, &b);
        let materialized: Matrix<i32> = nested.eval();

        assert_eq!(
            outer.select(&nested, &c).eval::<Matrix<_>>(),
            outer.select(&materialized, &c).eval::<Matrix<_>>(),
        );
        assert_eq!(
            outer.select(&c, &nested).eval::<Matrix<_>>(),
            outer.select(&c, &materialized).eval::<Matrix<_>>(),
        );

        // An expression can also be the condition.
        let cond_expr = outer.select(&inner, &outer);
        let cond_mat: Matrix<bool> = cond_expr.eval();
        assert_eq!(
            cond_expr.select(&a, &b).eval::<Matrix<_>>(),
            cond_mat.select(&a, &b).eval::<Matrix<_>>(),
        );
    }
}

#[test]
fn reads_are_idempotent() {
    let mut rng = Rng::with_seed(1234);
    let shape = (5, 6);
    let cond = random_mask(&mut rng, shape);
    let a = random_ints(&mut rng, shape);
    let sel = cond.select_else_scalar(&a, 0);

    let first: Matrix<i32> = sel.eval();
    for _ in 0..3 {
        assert_eq!(sel.eval::<Matrix<i32>>(), first);
    }
}

#[test]
fn concrete_scenarios() {
    let cond = Matrix::from_rows([[true, false], [false, true]]);
    let a = Matrix::from_rows([[1, 2], [3, 4]]);
    let b = Matrix::from_rows([[10, 20], [30, 40]]);
    assert_eq!(
        cond.select(&a, &b).eval::<Matrix<_>>(),
        Matrix::from_rows([[1, 20], [30, 4]])
    );

    let a = Matrix::from_rows([[0.5, -1.0], [f64::MAX, f64::MIN_POSITIVE]]);
    let all = Matrix::from_fn(2, 2, |_, _| true);
    let none = Matrix::from_fn(2, 2, |_, _| false);
    assert_eq!(all.select_else_scalar(&a, 0.0).eval::<Matrix<_>>(), a);
    assert_eq!(
        none.select_else_scalar(&a, 0.0).eval::<Matrix<_>>(),
        Matrix::<f64>::zeros(2, 2)
    );
}

#[test]
fn mismatched_shapes_are_rejected_before_reading() -> anyhow::Result<()> {
    let cond = Matrix::from_fn(3, 3, |_, _| true);
    let good = Matrix::<f32>::zeros(3, 3);
    let narrow = Matrix::<f32>::zeros(3, 2);

    let err = Select::try_new(&cond, &narrow, &good).err().unwrap();
    assert_eq!(err.role(), Role::Then);
    assert_eq!(err.expected(), (3, 3));
    assert_eq!(err.found(), (3, 2));

    let err = Select::try_new(&cond, &good, &narrow).err().unwrap();
    assert_eq!(err.role(), Role::Else);
    assert_eq!(
        err.to_string(),
        "shape mismatch: else operand is 3x2, expected 3x3"
    );

    let reads = Cell::new(0);
    let counted_cond = Counting {
        inner: &cond,
        reads: &reads,
    };
    let counted_then = Counting {
        inner: &good,
        reads: &reads,
    };
    let counted_else = Counting {
        inner: &narrow,
        reads: &reads,
    };
    let err = Select::try_new(counted_cond, counted_then, counted_else).err();
    assert_eq!(err.map(|e| e.role()), Some(Role::Else));
    assert_eq!(reads.get(), 0);

    let sel = Select::try_new(&cond, &good, &good)?;
    assert_eq!(sel.shape(), (3, 3));
    Ok(())
}

#[test]
fn numeric_conditions() {
    let cond = Matrix::from_rows([[f32::NAN, 0.0, -0.0, 1e-30]]);
    assert!(cond[(0, 0)].is_truthy());
    let out: Matrix<u8> = cond.select_then_scalar(1, &Matrix::from_rows([[0; 4]])).eval();
    assert_eq!(out, Matrix::from_rows([[1, 0, 0, 1]]));
}

#[test]
fn capabilities_are_conservative() {
    let cond = Matrix::from_rows([[true, false], [false, true]]);
    let a = Matrix::from_rows([[1, 2], [3, 4]]);
    let big = Matrix::from_fn(3, 3, |row, col| (row * 3 + col) as i32);
    let block = big.block(0, 1, 2, 2);

    let linear = cond.select(&a, &a);
    assert!(traits_of(&linear).caps.contains(Caps::LINEAR_ACCESS));
    assert!(!traits_of(&linear).caps.contains(Caps::LVALUE));
    assert!(!traits_of(&linear).caps.contains(Caps::DIRECT_ACCESS));

    let strided = cond.select(&a, &block);
    assert!(!traits_of(&strided).caps.contains(Caps::LINEAR_ACCESS));
    assert_eq!(traits_of(&strided).caps, Caps::NONE);
    assert_eq!(strided.eval::<Matrix<_>>(), Matrix::from_rows([[1, 2], [4, 4]]));

    // A condition without linear access makes the whole selection lose it.
    let mask = big.block(1, 0, 2, 2);
    let by_block = mask.select(&a, &a);
    assert!(!traits_of(&by_block).caps.contains(Caps::LINEAR_ACCESS));
    assert_eq!(by_block.eval::<Matrix<_>>(), a);
}

#[test]
fn cost_accumulates() {
    let cond = Matrix::from_rows([[true]]);
    let a = Matrix::from_rows([[1]]);
    let inner = cond.select_else_scalar(&a, 0);
    let outer = cond.select(&inner, &a);
    assert_eq!(traits_of(&inner).cost, 2);
    assert_eq!(traits_of(&outer).cost, 3);
}

#[test]
fn concurrent_reads() {
    let mut rng = Rng::with_seed(99);
    let shape = (64, 48);
    let cond = random_mask(&mut rng, shape);
    let a = random_ints(&mut rng, shape);
    let b = random_ints(&mut rng, shape);

    let sel = cond.select(&a, &b);
    let sequential: Vec<i32> = (0..sel.len()).map(|i| sel.coeff_linear(i)).collect();
    let parallel: Vec<i32> = (0..sel.len())
        .into_par_iter()
        .map(|i| sel.coeff_linear(i))
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn nalgebra_and_ndarray_agree_with_matrix() {
    let mut rng = Rng::with_seed(3);
    let (rows, cols) = (4, 5);
    let cond = Matrix::from_fn(rows, cols, |_, _| rng.bool());
    let a = Matrix::from_fn(rows, cols, |_, _| rng.f64() * 10.0 - 5.0);

    let na_cond = nalgebra::DMatrix::from_fn(rows, cols, |row, col| cond[(row, col)]);
    let na_a = nalgebra::DMatrix::from_fn(rows, cols, |row, col| a[(row, col)]);
    let nd_cond = ndarray::Array2::from_shape_fn((rows, cols), |(row, col)| cond[(row, col)]);
    let nd_a = ndarray::Array2::from_shape_fn((rows, cols), |(row, col)| a[(row, col)]);

    let native: Matrix<f64> = cond.select_else_scalar(&a, 0.0).eval();
    let na: nalgebra::DMatrix<f64> = na_cond.select_else_scalar(&na_a, 0.0).eval();
    let nd: Matrix<f64> = DenseBase::select_else_scalar(&nd_cond, &nd_a, 0.0).eval();

    for row in 0..rows {
        for col in 0..cols {
            assert_relative_eq!(na[(row, col)], native[(row, col)]);
            assert_relative_eq!(nd[(row, col)], native[(row, col)]);
        }
    }
}
