//! Wall-clock timing for benchmark runs
//!
//! Each operation is wrapped individually, so the two reported durations are
//! independent intervals rather than a running total. Synchronization and
//! communication cost inside a timed operation counts toward that operation:
//! the point is the real parallel cost, collectives included.

use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the elapsed wall-clock time
///
/// Uses [`Instant`], which is monotonic.
///
/// # Example
///
/// ```
/// use espejo::timing;
///
/// let (sum, elapsed) = timing::time(|| (0..100).sum::<u32>());
/// assert_eq!(sum, 4950);
/// assert!(elapsed.as_secs() < 1);
/// ```
pub fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Renders the two durations as `<sym_secs>,<transpose_secs>`
///
/// This is the line format downstream measurement scripts parse; callers
/// decide whether a newline follows.
pub fn report(symmetry_check: Duration, transpose: Duration) -> String {
    format!(
        "{},{}",
        symmetry_check.as_secs_f64(),
        transpose.as_secs_f64()
    )
}
