//! Message-passing worker group for the distributed execution model
//!
//! Workers are isolated threads with private memory. They never share a
//! matrix; the only data paths between them are three blocking collectives
//! over a full mesh of channels:
//!
//! - [`WorkerGroup::broadcast`] — one-to-all, root's cells to every worker
//! - [`WorkerGroup::allreduce_and`] — logical AND of local verdicts,
//!   combined result visible on every worker
//! - [`WorkerGroup::gather`] — rank-ordered all-to-one chunk collection
//!
//! Every collective blocks until the whole group has participated, which is
//! the ordering guarantee that makes reading the combined result safe. Any
//! substrate providing these three operations could back the distributed
//! model; this one uses `std::sync::mpsc` with one channel per directed pair
//! of workers.
//!
//! There is no cancellation, timeout, or partial-failure recovery: a worker
//! panic tears down the whole run when [`run`] joins it.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Rank of the coordinating worker
pub const ROOT: usize = 0;

enum Packet {
    Cells(Vec<f32>),
    Flag(bool),
}

/// Collective operations available to one member of a worker group
///
/// `rank` identifies the member, `size` the fixed group population. Both are
/// constant for the lifetime of a run.
pub trait WorkerGroup {
    /// This member's 0-indexed rank
    fn rank(&self) -> usize;

    /// Number of workers in the group
    fn size(&self) -> usize;

    /// One-to-all broadcast: after the call, every worker's `buf` holds the
    /// root's data. The root's own buffer is left untouched.
    fn broadcast(&self, buf: &mut Vec<f32>, root: usize);

    /// Blocking logical-AND reduction across all workers
    ///
    /// Every worker observes the combined verdict, not just the root.
    fn allreduce_and(&self, local: bool) -> bool;

    /// Blocking all-to-one gather, chunks concatenated in rank order
    ///
    /// Returns `Some` only on `root`; every other worker contributes its
    /// chunk and gets `None` back.
    fn gather(&self, chunk: Vec<f32>, root: usize) -> Option<Vec<f32>>;
}

/// One endpoint of an in-process worker group
///
/// Created by [`run`]; holds this member's side of the channel mesh.
pub struct Worker {
    rank: usize,
    size: usize,
    to_peer: Vec<Option<Sender<Packet>>>,
    from_peer: Vec<Option<Receiver<Packet>>>,
}

impl Worker {
    fn send(&self, dst: usize, packet: Packet) {
        self.to_peer[dst]
            .as_ref()
            .expect("no channel to self")
            .send(packet)
            .expect("worker group member terminated");
    }

    fn recv_cells(&self, src: usize) -> Vec<f32> {
        match self.recv(src) {
            Packet::Cells(cells) => cells,
            Packet::Flag(_) => unreachable!("collective ordering violated: expected cells"),
        }
    }

    fn recv_flag(&self, src: usize) -> bool {
        match self.recv(src) {
            Packet::Flag(flag) => flag,
            Packet::Cells(_) => unreachable!("collective ordering violated: expected flag"),
        }
    }

    fn recv(&self, src: usize) -> Packet {
        self.from_peer[src]
            .as_ref()
            .expect("no channel from self")
            .recv()
            .expect("worker group member terminated")
    }
}

impl WorkerGroup for Worker {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn broadcast(&self, buf: &mut Vec<f32>, root: usize) {
        if self.rank == root {
            for dst in 0..self.size {
                if dst != root {
                    self.send(dst, Packet::Cells(buf.clone()));
                }
            }
        } else {
            *buf = self.recv_cells(root);
        }
    }

    fn allreduce_and(&self, local: bool) -> bool {
        // Reduce to rank 0, then fan the combined verdict back out. Workers
        // block on the result, so none runs ahead of the reduction.
        if self.rank == 0 {
            let mut combined = local;
            for src in 1..self.size {
                combined = combined && self.recv_flag(src);
            }
            for dst in 1..self.size {
                self.send(dst, Packet::Flag(combined));
            }
            combined
        } else {
            self.send(0, Packet::Flag(local));
            self.recv_flag(0)
        }
    }

    fn gather(&self, chunk: Vec<f32>, root: usize) -> Option<Vec<f32>> {
        if self.rank == root {
            let mut all = Vec::with_capacity(chunk.len() * self.size);
            for src in 0..self.size {
                if src == root {
                    all.extend_from_slice(&chunk);
                } else {
                    all.extend_from_slice(&self.recv_cells(src));
                }
            }
            Some(all)
        } else {
            self.send(root, Packet::Cells(chunk));
            None
        }
    }
}

/// Spawns `size` isolated workers, runs `body` on each, and returns the
/// per-rank results in rank order
///
/// The group population is fixed for the run; a panicking worker aborts the
/// whole run when it is joined.
///
/// # Example
///
/// ```
/// use espejo::cluster::{self, WorkerGroup};
///
/// let verdicts = cluster::run(3, |group| group.allreduce_and(group.rank() != 1));
/// // rank 1 voted false, so everyone sees false
/// assert_eq!(verdicts, vec![false, false, false]);
/// ```
///
/// # Panics
///
/// Panics if `size == 0` or if any worker panics.
pub fn run<T, F>(size: usize, body: F) -> Vec<T>
where
    T: Send,
    F: Fn(Worker) -> T + Sync,
{
    assert!(size > 0, "worker group must have at least one member");

    // Wire the mesh: one channel per directed pair of workers.
    let mut to_peer: Vec<Vec<Option<Sender<Packet>>>> =
        (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
    let mut from_peer: Vec<Vec<Option<Receiver<Packet>>>> =
        (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
    for src in 0..size {
        for dst in 0..size {
            if src == dst {
                continue;
            }
            let (tx, rx) = channel();
            to_peer[src][dst] = Some(tx);
            from_peer[dst][src] = Some(rx);
        }
    }

    let endpoints: Vec<Worker> = to_peer
        .into_iter()
        .zip(from_peer)
        .enumerate()
        .map(|(rank, (to_peer, from_peer))| Worker {
            rank,
            size,
            to_peer,
            from_peer,
        })
        .collect();

    let body = &body;
    thread::scope(|scope| {
        let handles: Vec<_> = endpoints
            .into_iter()
            .map(|worker| scope.spawn(move || body(worker)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    })
}
