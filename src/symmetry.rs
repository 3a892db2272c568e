//! Matrix symmetry verification
//!
//! Compares `m[i][j]` to `m[j][i]` for every off-diagonal pair above the
//! diagonal. Comparison is bit-exact `f32` equality: the contract is exact
//! symmetry, not closeness, so values that differ by generation noise count
//! as a mismatch.
//!
//! Three variants share one per-partition kernel:
//!
//! - [`is_symmetric`] walks the whole matrix on the calling thread,
//! - [`is_symmetric_parallel`] folds per-row verdicts through a rayon AND
//!   reduction,
//! - [`is_symmetric_distributed`] checks a planned row range locally, then
//!   combines verdicts with a blocking all-reduce so every worker observes
//!   the global answer.

use crate::cluster::WorkerGroup;
use crate::matrix::Matrix;
use crate::partition::RowRange;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-partition kernel: verifies `m[i][j] == m[j][i]` for rows in `range`
///
/// Only columns `j > i` are compared; diagonal entries are trivially
/// symmetric. Bails out on the first mismatch.
fn rows_symmetric(m: &Matrix, range: RowRange) -> bool {
    let n = m.n();
    let data = m.as_slice();
    for i in range.start..range.end {
        for j in (i + 1)..n {
            if data[i * n + j] != data[j * n + i] {
                return false;
            }
        }
    }
    true
}

/// Checks whether the matrix equals its own transpose, sequentially
///
/// # Example
///
/// ```
/// use espejo::{symmetry, Matrix};
///
/// assert!(symmetry::is_symmetric(&Matrix::identity(4)));
///
/// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 1.0]).unwrap();
/// assert!(!symmetry::is_symmetric(&m));
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(m), fields(n = m.n())))]
pub fn is_symmetric(m: &Matrix) -> bool {
    rows_symmetric(
        m,
        RowRange {
            start: 0,
            end: m.n(),
        },
    )
}

/// Shared-memory parallel symmetry check
///
/// Rows are distributed across the rayon pool; each task produces a private
/// per-row verdict and the verdicts are folded with a logical-AND reduce at
/// the join. No task ever writes shared state, so no locking is involved.
#[cfg(feature = "parallel")]
#[cfg_attr(feature = "tracing", instrument(skip(m), fields(n = m.n())))]
pub fn is_symmetric_parallel(m: &Matrix) -> bool {
    use rayon::prelude::*;

    (0..m.n())
        .into_par_iter()
        .map(|i| rows_symmetric(m, RowRange { start: i, end: i + 1 }))
        .reduce(|| true, |a, b| a && b)
}

/// Distributed symmetry check over a worker group
///
/// Each worker checks the row range planned for its rank (uneven splits are
/// fine; the last rank absorbs the remainder), then all local verdicts are
/// combined with a blocking logical-AND all-reduce. Every worker returns the
/// combined verdict, not just the coordinator.
#[cfg_attr(feature = "tracing", instrument(skip(m, group), fields(n = m.n(), rank = group.rank())))]
pub fn is_symmetric_distributed<G: WorkerGroup>(m: &Matrix, group: &G) -> bool {
    let range = RowRange::plan(m.n(), group.size(), group.rank());
    let local = rows_symmetric(m, range);
    group.allreduce_and(local)
}
