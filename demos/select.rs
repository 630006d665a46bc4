//! Masks out the negative coefficients of a matrix, then clamps what remains.

use densexpr::{DenseBase, Expr, ExprTraits, Matrix, Select};

fn traits_of<X: Expr>(_: &X) -> ExprTraits {
    X::TRAITS
}

fn main() -> anyhow::Result<()> {
    densexpr::init_logger!();

    let size = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 4,
    };

    let m = Matrix::from_fn(size, size, |row, col| {
        (row as f32 - col as f32) * 1.5 + (row * col) as f32 * 0.25
    });
    let positive = m.clone().map(|v| v > 0.0);
    let large = m.clone().map(|v| v > 3.0);

    let masked = positive.select_else_scalar(&m, 0.0);
    let clamped = large.select_then_scalar(3.0, &masked);
    log::info!("clamping expression: {:?}", traits_of(&clamped));

    println!("input:\n{:#?}", m);
    println!("clamped:\n{:#?}", clamped);

    // User-provided shapes go through the fallible constructor.
    let short = Matrix::<f32>::zeros(size, size.saturating_sub(1));
    match Select::try_new(&positive, &m, &short) {
        Ok(_) => println!("accepted {size}x{size} operands"),
        Err(e) => println!("rejected: {e}"),
    }

    let mut out = Matrix::zeros(size, size);
    out.assign(&clamped);
    let sum: f32 = out.as_slice().iter().sum();
    println!("sum of clamped coefficients: {sum}");

    Ok(())
}
