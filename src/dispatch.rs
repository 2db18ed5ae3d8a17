//! Data-parallel pass execution.
//!
//! Every clustering pass is a for-each over the track index range. Both
//! entry points return only once every index has been processed, which is
//! the barrier between consecutive passes.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How the per-track passes are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// One index after the other on the calling thread.
    Serial,
    /// Spread over the rayon pool. Falls back to `Serial` without the
    /// `parallel` feature.
    Parallel,
}

impl Default for Dispatch {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Dispatch::Parallel
        } else {
            Dispatch::Serial
        }
    }
}

impl Dispatch {
    /// Call `f(i)` for every `i` in `0..n`, then wait for all of them.
    #[inline]
    pub fn for_each<F>(self, n: usize, f: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        match self {
            #[cfg(feature = "parallel")]
            Dispatch::Parallel => (0..n).into_par_iter().for_each(f),
            _ => (0..n).for_each(f),
        }
    }

    /// Overwrite every slot of `out` with `f(i)`.
    ///
    /// Each index writes only its own slot; `f` may read anything that is
    /// not being written in the same pass.
    #[inline]
    pub fn fill_with<T, F>(self, out: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match self {
            #[cfg(feature = "parallel")]
            Dispatch::Parallel => out
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = f(i)),
            _ => out
                .iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = f(i)),
        }
    }
}
