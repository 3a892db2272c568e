//! Error types for espejo operations

use thiserror::Error;

/// Result type for espejo operations
pub type Result<T> = std::result::Result<T, EspejoError>;

/// Errors that can occur during espejo operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EspejoError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Matrix rows do not split evenly across the worker group
    #[error("Matrix size {n} is not divisible by worker count {workers}")]
    PartitionMismatch {
        /// Matrix dimension
        n: usize,
        /// Number of workers in the group
        workers: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = EspejoError::InvalidInput("matrix dimension must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: matrix dimension must be positive"
        );
    }

    #[test]
    fn test_partition_mismatch_error() {
        let err = EspejoError::PartitionMismatch { n: 10, workers: 3 };
        assert_eq!(
            err.to_string(),
            "Matrix size 10 is not divisible by worker count 3"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = EspejoError::PartitionMismatch { n: 8, workers: 3 };
        let err2 = EspejoError::PartitionMismatch { n: 8, workers: 3 };
        assert_eq!(err1, err2);
    }
}
