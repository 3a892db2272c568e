//! Matrix transpose across the three execution models
//!
//! Values are copied verbatim, never computed, so every variant is exact and
//! transposing twice restores the original matrix bit for bit.
//!
//! Unlike the symmetry check, the distributed variant *requires* the rows to
//! divide evenly across the worker group: the gather step assumes every chunk
//! has identical shape. The uneven-split tolerance of the symmetry check is
//! not extended here on purpose.

use crate::cluster::WorkerGroup;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::partition::chunk_rows;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Sequential transpose: `out[j][i] = m[i][j]`
///
/// Works block-wise for cache locality; a 64×64 block of f32 (16KB) sits
/// comfortably in L1.
///
/// # Example
///
/// ```
/// use espejo::{transpose, Matrix};
///
/// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 1.0]).unwrap();
/// let t = transpose::transpose(&m);
/// assert_eq!(t.as_slice(), &[1.0, 3.0, 2.0, 1.0]);
/// assert_eq!(transpose::transpose(&t), m);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(m), fields(n = m.n())))]
pub fn transpose(m: &Matrix) -> Matrix {
    let n = m.n();
    let mut out = Matrix::zeros(n);

    const BLOCK_SIZE: usize = 64;

    let src = m.as_slice();
    let dst = out.as_mut_slice();
    for i_block in (0..n).step_by(BLOCK_SIZE) {
        let i_end = (i_block + BLOCK_SIZE).min(n);
        for j_block in (0..n).step_by(BLOCK_SIZE) {
            let j_end = (j_block + BLOCK_SIZE).min(n);
            for i in i_block..i_end {
                let src_row_start = i * n;
                for j in j_block..j_end {
                    dst[j * n + i] = src[src_row_start + j];
                }
            }
        }
    }

    out
}

/// Shared-memory parallel transpose
///
/// Each rayon task owns one output row, so every `(i, j)` cell is written by
/// exactly one task and the disjointness is visible in the types via
/// `par_chunks_mut`. The full result is in one shared allocation; no gather
/// is needed.
#[cfg(feature = "parallel")]
#[cfg_attr(feature = "tracing", instrument(skip(m), fields(n = m.n())))]
pub fn transpose_parallel(m: &Matrix) -> Matrix {
    use rayon::prelude::*;

    let n = m.n();
    if n == 0 {
        return Matrix::zeros(0);
    }

    let src = m.as_slice();
    let mut data = vec![0.0f32; n * n];
    data.par_chunks_mut(n)
        .enumerate()
        .for_each(|(j, out_row)| {
            // output row j is input column j
            for (i, cell) in out_row.iter_mut().enumerate() {
                *cell = src[i * n + j];
            }
        });

    Matrix::from_raw(n, data)
}

/// Distributed transpose over a worker group
///
/// Each worker produces the source columns matching its assigned row range,
/// which become rows of the transposed matrix, flattens them, and a blocking
/// rank-ordered gather lands every chunk on the coordinator. Only the
/// coordinator reconstructs and returns the full matrix; every other worker
/// gets `None`, and callers must account for that asymmetry — the result is
/// deliberately not broadcast back.
///
/// # Errors
///
/// Returns `PartitionMismatch` if `m.n()` is not divisible by the group size.
#[cfg_attr(feature = "tracing", instrument(skip(m, group), fields(n = m.n(), rank = group.rank())))]
pub fn transpose_distributed<G: WorkerGroup>(m: &Matrix, group: &G) -> Result<Option<Matrix>> {
    let n = m.n();
    let rows_per_worker = chunk_rows(n, group.size())?;
    let col_offset = group.rank() * rows_per_worker;

    // Local chunk row i is source column (col_offset + i).
    let src = m.as_slice();
    let mut chunk = vec![0.0f32; rows_per_worker * n];
    for i in 0..rows_per_worker {
        let chunk_row_start = i * n;
        for j in 0..n {
            chunk[chunk_row_start + j] = src[j * n + (col_offset + i)];
        }
    }

    match group.gather(chunk, crate::cluster::ROOT) {
        Some(flat) => Ok(Some(Matrix::from_flat(n, flat)?)),
        None => Ok(None),
    }
}
