//! Espejo: Dense-Matrix Symmetry and Transpose Benchmark
//!
//! **Espejo** (Spanish: "mirror") benchmarks two dense n×n matrix operations
//! — symmetry verification and transpose — across three execution models:
//!
//! 1. **Sequential** - single-threaded baseline
//! 2. **Shared-memory parallel** - rayon work-sharing over row partitions
//!    (feature `parallel`, on by default)
//! 3. **Distributed** - isolated workers with private memory, coordinated
//!    only through blocking collectives (broadcast, all-reduce, gather)
//!
//! # Design Principles
//!
//! - **One kernel per operation**: every execution model runs the same
//!   per-partition comparison/copy logic; only the decomposition and the
//!   aggregation differ
//! - **Reduction over shared state**: parallel verdicts are folded with a
//!   logical-AND combine instead of mutating a shared flag
//! - **Timing measures real cost**: communication inside an operation counts
//!   toward that operation's interval
//!
//! # Quick Start
//!
//! ```rust
//! use espejo::{symmetry, transpose, Matrix};
//!
//! let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 1.0]).unwrap();
//!
//! assert!(!symmetry::is_symmetric(&m)); // 2.0 != 3.0, bit-exact compare
//!
//! let t = transpose::transpose(&m);
//! assert_eq!(t.as_slice(), &[1.0, 3.0, 2.0, 1.0]);
//! ```
//!
//! The distributed model runs through a [`cluster::WorkerGroup`]:
//!
//! ```rust
//! use espejo::{cluster, symmetry, Matrix};
//!
//! let m = Matrix::identity(4);
//! let verdicts = cluster::run(2, |group| symmetry::is_symmetric_distributed(&m, &group));
//! assert_eq!(verdicts, vec![true, true]); // every worker sees the verdict
//! ```

pub mod cluster;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod symmetry;
pub mod timing;
pub mod transpose;

pub use cluster::WorkerGroup;
pub use error::{EspejoError, Result};
pub use matrix::Matrix;
pub use partition::RowRange;

/// Determines the worker count for one run
///
/// Honors the `ESPEJO_WORKERS` environment variable when it holds a positive
/// integer, falling back to the machine's available parallelism. The value
/// is fixed for the lifetime of a run; nothing rescales mid-flight.
///
/// # Examples
///
/// ```
/// let workers = espejo::worker_count();
/// assert!(workers >= 1);
/// ```
pub fn worker_count() -> usize {
    std::env::var("ESPEJO_WORKERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&w| w > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        })
}
