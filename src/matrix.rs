//! Dense square matrix storage and transport utilities
//!
//! Provides the n×n container both benchmark operations run over, plus the
//! flatten/reconstruct pair used to move a matrix across worker boundaries
//! in the distributed model.
//!
//! # Example
//!
//! ```
//! use espejo::Matrix;
//!
//! let m = Matrix::identity(3);
//! assert_eq!(m.n(), 3);
//! assert_eq!(m.get(0, 0), Some(&1.0));
//! assert_eq!(m.get(0, 1), Some(&0.0));
//! ```

use rand::Rng;

use crate::error::{EspejoError, Result};

/// A dense n×n matrix of `f32` with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row. The flat transport layout produced by
/// [`Matrix::flatten`] is therefore the storage layout itself:
/// `flat[i * n + j] == m[i][j]`.
///
/// # Example
///
/// ```
/// use espejo::Matrix;
///
/// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(m.get(0, 1), Some(&2.0));
/// assert_eq!(m.get(1, 0), Some(&3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates an n×n matrix filled with zeros
    ///
    /// # Example
    ///
    /// ```
    /// use espejo::Matrix;
    ///
    /// let m = Matrix::zeros(3);
    /// assert_eq!(m.get(1, 1), Some(&0.0));
    /// ```
    pub fn zeros(n: usize) -> Self {
        Matrix {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `n == 0` or `data.len() != n * n`
    ///
    /// # Example
    ///
    /// ```
    /// use espejo::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.n(), 2);
    /// ```
    pub fn from_vec(n: usize, data: Vec<f32>) -> Result<Self> {
        if n == 0 {
            return Err(EspejoError::InvalidInput(
                "matrix dimension must be positive".to_string(),
            ));
        }
        if data.len() != n * n {
            return Err(EspejoError::InvalidInput(format!(
                "Data length {} does not match matrix dimension {}x{} (expected {})",
                data.len(),
                n,
                n,
                n * n
            )));
        }

        Ok(Matrix { n, data })
    }

    /// Creates a matrix from a slice by copying the data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `n == 0` or `data.len() != n * n`
    pub fn from_slice(n: usize, data: &[f32]) -> Result<Self> {
        Self::from_vec(n, data.to_vec())
    }

    /// Creates an identity matrix (1s on the diagonal, 0s elsewhere)
    ///
    /// # Example
    ///
    /// ```
    /// use espejo::Matrix;
    ///
    /// let m = Matrix::identity(3);
    /// assert_eq!(m.get(1, 1), Some(&1.0));
    /// assert_eq!(m.get(1, 2), Some(&0.0));
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Matrix { n, data }
    }

    /// Creates an n×n matrix of uniform random values in `[0.0, 100.0)`
    ///
    /// Freshly seeded from the OS on every call; runs are deliberately not
    /// reproducible. Correctness tests should construct fixed matrices with
    /// [`Matrix::from_vec`] instead.
    pub fn random(n: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..n * n).map(|_| rng.gen_range(0.0..100.0)).collect();
        Matrix { n, data }
    }

    /// Internal constructor for data whose length is correct by construction
    pub(crate) fn from_raw(n: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Matrix { n, data }
    }

    /// Returns the matrix dimension
    pub fn n(&self) -> usize {
        self.n
    }

    /// Gets a reference to the element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&f32> {
        if row >= self.n || col >= self.n {
            None
        } else {
            self.data.get(row * self.n + col)
        }
    }

    /// Gets a mutable reference to the element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f32> {
        if row >= self.n || col >= self.n {
            None
        } else {
            let idx = row * self.n + col;
            self.data.get_mut(idx)
        }
    }

    /// Returns a reference to the underlying row-major data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Linearizes the matrix for transport across worker boundaries
    ///
    /// The mapping is `flat[i * n + j] == m[i][j]`. Since storage is already
    /// row-major this is a plain copy; the named method keeps the transport
    /// contract explicit at call sites.
    ///
    /// # Example
    ///
    /// ```
    /// use espejo::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.flatten(), vec![1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn flatten(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Reconstructs a matrix from its flattened transport form
    ///
    /// Exact inverse of [`Matrix::flatten`]: the round-trip is lossless and
    /// order-preserving.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `flat.len() != n * n`
    pub fn from_flat(n: usize, flat: Vec<f32>) -> Result<Self> {
        Self::from_vec(n, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let m = Matrix::zeros(4);
        assert_eq!(m.n(), 4);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_vec_valid() {
        let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.get(0, 0), Some(&1.0));
        assert_eq!(m.get(0, 1), Some(&2.0));
        assert_eq!(m.get(1, 0), Some(&3.0));
        assert_eq!(m.get(1, 1), Some(&4.0));
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let result = Matrix::from_vec(2, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(EspejoError::InvalidInput(_))));
    }

    #[test]
    fn test_from_vec_zero_dimension() {
        let result = Matrix::from_vec(0, vec![]);
        assert!(matches!(result, Err(EspejoError::InvalidInput(_))));
    }

    #[test]
    fn test_identity() {
        let m = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(m.get(i, j), Some(&expected));
            }
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::zeros(2);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn test_get_mut() {
        let mut m = Matrix::zeros(2);
        *m.get_mut(1, 0).unwrap() = 7.0;
        assert_eq!(m.get(1, 0), Some(&7.0));
    }

    #[test]
    fn test_flatten_layout() {
        let m = Matrix::from_vec(3, (0..9).map(|i| i as f32).collect()).unwrap();
        let flat = m.flatten();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(flat[i * 3 + j], *m.get(i, j).unwrap());
            }
        }
    }

    #[test]
    fn test_flatten_round_trip() {
        let m = Matrix::from_vec(3, (0..9).map(|i| i as f32 * 1.5).collect()).unwrap();
        let rebuilt = Matrix::from_flat(3, m.flatten()).unwrap();
        assert_eq!(m, rebuilt);
    }

    #[test]
    fn test_from_flat_wrong_length() {
        let result = Matrix::from_flat(3, vec![0.0; 8]);
        assert!(matches!(result, Err(EspejoError::InvalidInput(_))));
    }

    #[test]
    fn test_random_range() {
        let m = Matrix::random(8);
        assert_eq!(m.n(), 8);
        assert!(m.as_slice().iter().all(|&v| (0.0..100.0).contains(&v)));
    }
}
