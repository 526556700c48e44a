//! Print the I/J/P/D report of a zonotopal algebra over Q
//!
//! Usage: `cargo run --example zon_info -- <variant> "<row>;<row>;..."`
//! e.g. `cargo run --example zon_info -- external "1,0,1;0,1,1"`
//!
//! Set `RUST_LOG=zonotopal_algebra=debug` to see the D-space computation.

use std::env;
use std::process;

use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use zonotopal_algebra::*;

fn parse_variant(s: &str) -> Option<Variant> {
    match s {
        "central" => Some(Variant::Central),
        "internal" => Some(Variant::Internal),
        "external" => Some(Variant::External),
        "forward-exchange" => Some(Variant::ForwardExchange),
        _ => None,
    }
}

fn parse_rows(s: &str) -> Option<Vec<Vec<i64>>> {
    s.split(';')
        .map(|row| row.split(',').map(|v| v.trim().parse().ok()).collect())
        .collect()
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let variant = args.get(1).map(String::as_str).unwrap_or("central");
    let rows = args.get(2).map(String::as_str).unwrap_or("1,0,1,1;0,1,1,-1");

    let (variant, rows) = match (parse_variant(variant), parse_rows(rows)) {
        (Some(v), Some(r)) => (v, r),
        _ => {
            eprintln!("usage: zon_info <central|internal|external|forward-exchange> \"1,0,1;0,1,1\"");
            process::exit(2);
        }
    };

    let q = rational_field();
    let algebra = match Matrix::from_i64_rows(&q, &rows).and_then(|x| zonotopal_algebra(&x, variant, &ZonotopalConfig::new())) {
        Ok(algebra) => algebra,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    match algebra.zon_spaces() {
        Ok(spaces) => {
            info!(%variant, dimension = spaces.dimension(), degrees = ?spaces.degree_counts(), "computed");
            print!("{}", spaces);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
