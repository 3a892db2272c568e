//! Distributed-model runner
//!
//! Spawns a fixed worker group (`ESPEJO_WORKERS`, default: available
//! parallelism) of isolated workers. The coordinator generates the matrix
//! and broadcasts its flattened cells; every worker reconstructs a private
//! copy, checks its row partition, and participates in the collectives. Only
//! the coordinator prints the two durations, with no trailing newline.
//!
//! The transpose requires `n` divisible by the worker count. The check runs
//! once, before the group is spawned, so every worker observes the same
//! fatal decision — no rank ever branches past it.

use std::env;
use std::process::ExitCode;

use espejo::cluster::{self, WorkerGroup, ROOT};
use espejo::{symmetry, timing, transpose, Matrix};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cluster");
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

    let workers = espejo::worker_count();
    if n % workers != 0 {
        eprintln!("Matrix size must be divisible by the number of workers ({n} % {workers} != 0)");
        return ExitCode::FAILURE;
    }

    let results = cluster::run(workers, |group| -> espejo::Result<Option<String>> {
        // The coordinator owns the source matrix; everyone else receives its
        // cells over the broadcast and rebuilds a private copy.
        let mut flat = if group.rank() == ROOT {
            Matrix::random(n).flatten()
        } else {
            vec![0.0f32; n * n]
        };
        group.broadcast(&mut flat, ROOT);
        let matrix = Matrix::from_flat(n, flat)?;

        let (_is_symmetric, sym_time) =
            timing::time(|| symmetry::is_symmetric_distributed(&matrix, &group));
        let (transposed, transpose_time) =
            timing::time(|| transpose::transpose_distributed(&matrix, &group));
        let _transposed = transposed?;

        Ok(if group.rank() == ROOT {
            Some(timing::report(sym_time, transpose_time))
        } else {
            None
        })
    });

    for result in results {
        match result {
            Ok(Some(report)) => print!("{report}"),
            Ok(None) => {}
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
