//! Shared-memory parallel runner
//!
//! Same shape as `seq`, but both operations run over the rayon pool. Thread
//! count follows rayon's `RAYON_NUM_THREADS` convention and stays fixed for
//! the run. The full transpose result is visible to every thread on
//! completion; there is no gather phase because the memory is shared.
//!
//! Output is `<sym_secs>,<transpose_secs>` followed by a newline.

use std::env;
use std::process::ExitCode;

use espejo::{symmetry, timing, transpose, Matrix};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("threaded");
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

    let (_is_symmetric, sym_time) = timing::time(|| symmetry::is_symmetric_parallel(&matrix));
    let (_transposed, transpose_time) = timing::time(|| transpose::transpose_parallel(&matrix));

    println!("{}", timing::report(sym_time, transpose_time));
    ExitCode::SUCCESS
}
