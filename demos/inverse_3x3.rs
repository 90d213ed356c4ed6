use nsinv::{BackendKind, InvContext, InvOptions, Matrix, ReferenceBackend, residual_norm};

fn print(m: &Matrix<f32>) {
    for i in 0..m.size() {
        let row: Vec<String> = m.row(i).iter().map(|x| format!("{x:6.3}")).collect();
        println!("{}", row.join(" "));
    }
    println!();
}

fn main() -> Result<(), nsinv::InvError> {
    let a = Matrix::from_row_major(3, vec![2.0f32, 0.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0])?;
    println!("A:");
    print(&a);
    println!("expected inverse:");
    print(&Matrix::from_row_major(3, vec![1.0, 0.0, -1.0, 2.0, 1.0, -4.0, -1.0, 0.0, 2.0])?);

    let base = InvOptions::from_env();
    for backend in [BackendKind::Reference, BackendKind::Faer] {
        for order in [1000, 10_000] {
            let ctx = InvContext::new(InvOptions { order, backend, ..base.clone() });
            let x = ctx.invert(&a)?;
            println!(
                "{backend:?}, m = {order}: residual {:.3e}",
                residual_norm(&ReferenceBackend, &a, &x)?
            );
            print(&x);
        }
    }
    Ok(())
}
