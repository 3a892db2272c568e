//! Distributed Model Story Tests
//!
//! Walks the full distributed run end to end the way the `cluster` binary
//! does it: the coordinator owns the matrix, broadcasts its flattened cells,
//! every worker checks its partition and participates in the collectives,
//! and only the coordinator ends up with the transposed matrix.

use espejo::cluster::{self, WorkerGroup, ROOT};
use espejo::{symmetry, timing, transpose, EspejoError, Matrix};

/// The full pipeline: broadcast, reconstruct, check, transpose, gather.
#[test]
fn test_full_distributed_run() {
    let n = 8;
    let source = Matrix::from_vec(n, (0..n * n).map(|i| i as f32).collect()).expect("valid matrix");
    let expected_transpose = transpose::transpose(&source);
    let expected_verdict = symmetry::is_symmetric(&source);

    let results = cluster::run(4, |group| {
        // Workers other than the coordinator start with an empty buffer;
        // the broadcast is their only way to see the coordinator's memory.
        let mut flat = if group.rank() == ROOT {
            source.flatten()
        } else {
            vec![0.0f32; n * n]
        };
        group.broadcast(&mut flat, ROOT);
        let matrix = Matrix::from_flat(n, flat).expect("broadcast preserves the cell count");

        let (verdict, sym_time) =
            timing::time(|| symmetry::is_symmetric_distributed(&matrix, &group));
        let (transposed, transpose_time) =
            timing::time(|| transpose::transpose_distributed(&matrix, &group));

        (
            verdict,
            transposed.expect("n divides evenly"),
            timing::report(sym_time, transpose_time),
        )
    });

    assert_eq!(results.len(), 4);
    for (rank, (verdict, transposed, report)) in results.into_iter().enumerate() {
        // The verdict is replicated to every worker by the all-reduce.
        assert_eq!(verdict, expected_verdict, "rank {rank}");

        // Only the coordinator holds the full transposed matrix.
        if rank == ROOT {
            assert_eq!(transposed, Some(expected_transpose.clone()));
        } else {
            assert_eq!(transposed, None);
        }

        // Every worker could render a report; only the coordinator's is
        // printed in the binary.
        assert_eq!(report.split(',').count(), 2);
    }
}

/// Broadcast replicates the coordinator's matrix exactly, element for element.
#[test]
fn test_broadcast_replicates_matrix() {
    let n = 4;
    let source = Matrix::random(n);
    let flat_source = source.flatten();

    let copies = cluster::run(3, |group| {
        let mut flat = if group.rank() == ROOT {
            flat_source.clone()
        } else {
            vec![0.0f32; n * n]
        };
        group.broadcast(&mut flat, ROOT);
        Matrix::from_flat(n, flat).expect("broadcast preserves the cell count")
    });

    for copy in copies {
        assert_eq!(copy, source);
    }
}

/// A mismatch in any single partition makes the global verdict false for
/// every worker, whichever rank owns the corrupted row.
#[test]
fn test_verdict_false_regardless_of_owner() {
    let n = 8;
    let size = 4;
    let base: Vec<f32> = {
        let mut data = vec![0.0f32; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = ((i + j) % 13) as f32; // symmetric
            }
        }
        data
    };

    // Corrupt one pair inside each rank's partition in turn.
    for owner in 0..size {
        let row = owner * (n / size);
        let mut data = base.clone();
        data[row * n + (n - 1)] += 5.0;
        let m = Matrix::from_vec(n, data).expect("valid matrix");

        let verdicts = cluster::run(size, |group| symmetry::is_symmetric_distributed(&m, &group));
        assert_eq!(verdicts, vec![false; size], "owner rank {owner}");
    }
}

/// The distributed transpose rejects an uneven split on every worker; the
/// symmetry check accepts the same split. The asymmetry is part of the
/// contract.
#[test]
fn test_split_tolerance_asymmetry() {
    let n = 10;
    let size = 3; // 10 % 3 != 0
    let m = Matrix::identity(n);

    let results = cluster::run(size, |group| {
        let verdict = symmetry::is_symmetric_distributed(&m, &group);
        let transposed = transpose::transpose_distributed(&m, &group);
        (verdict, transposed)
    });

    for (verdict, transposed) in results {
        assert!(verdict);
        assert_eq!(
            transposed,
            Err(EspejoError::PartitionMismatch { n: 10, workers: 3 })
        );
    }
}

/// Chunks arrive at the coordinator in rank order, so transposed rows land
/// in ascending row order.
#[test]
fn test_gather_assembles_rows_in_rank_order() {
    let n = 6;
    let m = Matrix::from_vec(n, (0..n * n).map(|i| i as f32).collect()).expect("valid matrix");
    let expected = transpose::transpose(&m);

    for size in [1, 2, 3, 6] {
        let mut results = cluster::run(size, |group| transpose::transpose_distributed(&m, &group));
        let root = results
            .remove(0)
            .expect("exact split")
            .expect("coordinator holds the result");
        assert_eq!(root, expected, "size {size}");
    }
}
