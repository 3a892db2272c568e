//! Row partitioning across a worker group
//!
//! Both parallel execution models split the matrix by contiguous row ranges.
//! The two operations tolerate uneven splits differently, and that asymmetry
//! is kept on purpose rather than unified:
//!
//! - the symmetry check accepts any worker count; the last worker absorbs
//!   whatever remainder rows integer division leaves over
//!   ([`RowRange::plan`]),
//! - the distributed transpose requires the rows to divide exactly, because
//!   the gather step assumes every chunk has the same shape ([`chunk_rows`]).

use crate::error::{EspejoError, Result};

/// A contiguous half-open row range `[start, end)` owned by one worker
///
/// Ranges planned for the same `(n, size)` are disjoint and their union is
/// exactly `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    /// First row in the range
    pub start: usize,
    /// One past the last row in the range
    pub end: usize,
}

impl RowRange {
    /// Plans the row range for `rank` out of `size` workers over `n` rows
    ///
    /// Each worker gets `n / size` rows; the last worker additionally takes
    /// the remainder when `n` is not evenly divisible.
    ///
    /// # Example
    ///
    /// ```
    /// use espejo::RowRange;
    ///
    /// // 6 rows over 3 workers: [0,2), [2,4), [4,6)
    /// assert_eq!(RowRange::plan(6, 3, 0), RowRange { start: 0, end: 2 });
    /// assert_eq!(RowRange::plan(6, 3, 1), RowRange { start: 2, end: 4 });
    /// assert_eq!(RowRange::plan(6, 3, 2), RowRange { start: 4, end: 6 });
    /// ```
    pub fn plan(n: usize, size: usize, rank: usize) -> RowRange {
        debug_assert!(size > 0, "worker group must have at least one member");
        debug_assert!(rank < size, "rank {rank} out of range for {size} workers");

        let rows_per_worker = n / size;
        let start = rank * rows_per_worker;
        let end = if rank == size - 1 {
            n
        } else {
            start + rows_per_worker
        };
        RowRange { start, end }
    }

    /// Number of rows in the range
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the range covers no rows
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Rows per worker for an exact split, as the distributed transpose requires
///
/// # Errors
///
/// Returns `PartitionMismatch` if `n` is not divisible by `size`.
pub fn chunk_rows(n: usize, size: usize) -> Result<usize> {
    if size == 0 || n % size != 0 {
        return Err(EspejoError::PartitionMismatch { n, workers: size });
    }
    Ok(n / size)
}
