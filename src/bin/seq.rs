//! Sequential runner
//!
//! Generates a random n×n matrix, then times the symmetry check and the
//! transpose as two independent intervals on a single thread. Output is
//! `<sym_secs>,<transpose_secs>` on stdout with no trailing newline, the
//! format the measurement scripts parse.

use std::env;
use std::process::ExitCode;

use espejo::{symmetry, timing, transpose, Matrix};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("seq");
    if args.len() != 2 {
        eprintln!("Usage: {program} <matrix_size>");
        return ExitCode::FAILURE;
    }
    let n: usize = match args[1].parse() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!("Usage: {program} <matrix_size>");
            return ExitCode::FAILURE;
        }
    };

    let matrix = Matrix::random(n);

    let (_is_symmetric, sym_time) = timing::time(|| symmetry::is_symmetric(&matrix));
    let (_transposed, transpose_time) = timing::time(|| transpose::transpose(&matrix));

    print!("{}", timing::report(sym_time, transpose_time));
    ExitCode::SUCCESS
}
