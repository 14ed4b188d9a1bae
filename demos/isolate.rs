//! Isolating and refining the real roots of a polynomial.
//!
//! Coefficients are given in ascending exponent order; `-v` enables debug
//! logging and `-vv` traces every bisection.
//!
//! Run with: cargo run --example isolate -- [-v] 1 -3 2

use std::time::Instant;

use sturm::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let mut verbosity = 0;
    let mut coeffs = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" => verbosity += 1,
            "-vv" => verbosity += 2,
            _ => match arg.parse::<f64>() {
                Ok(c) => coeffs.push(c),
                Err(e) => {
                    eprintln!("invalid coefficient {arg:?}: {e}");
                    std::process::exit(1);
                }
            },
        }
    }
    if coeffs.is_empty() {
        // Wilkinson-style product (x - 1)(x - 2)...(x - 8)
        coeffs = Polynomial::from_roots(&(1..=8).map(f64::from).collect::<Vec<_>>())
            .coeffs()
            .to_vec();
    }

    if verbosity > 0 {
        let level = if verbosity > 1 { Level::TRACE } else { Level::DEBUG };
        let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set tracing subscriber: {e}");
            std::process::exit(1);
        }
    }

    let p = Polynomial::from_coeffs(coeffs);
    println!("p(x) = {p}\n");

    let seq = match SturmSequence::new(&p) {
        Ok(seq) => seq,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("Sturm sequence:\n{seq}");

    let start = Instant::now();
    let isolation = match seq.separate_roots_auto() {
        Ok(isolation) => isolation,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("{isolation}");

    let solver = Solver::new(SolverConfig::default().with_tolerance(1e-14));
    for (root, refined) in isolation
        .iter()
        .zip(solver.refine_all(seq.squarefree(), &isolation.roots))
    {
        match refined {
            Ok(r) => println!(
                "  {root} -> {:.15} (width {:.1e}, {} iterations)",
                r.value,
                r.width(),
                r.iterations
            ),
            Err(e) => println!("  {root} -> {e}"),
        }
    }
    println!("\nElapsed: {:?}", start.elapsed());
}
