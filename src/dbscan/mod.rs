//! Histogram-driven DBSCAN over track z.
//!
//! The clusterer runs as a fixed sequence of data-parallel passes over the
//! track range, each one finishing before the next starts:
//!
//! 1. index: quantize z, reset chain pointers, build the [`ZHist`]
//! 2. neighbors: count neighbors within `eps` for seed-quality tracks
//! 3. cores: point each core track at the lowest core neighbor
//! 4. chains: collapse every chain onto its root
//! 5. labels: give each core root a dense id, mark other roots as noise
//! 6. edges: attach leftover tracks to the closest core neighbor's cluster
//! 7. sort: sum weights per cluster and order clusters by weight
//!
//! Cross-track writes happen only through the cluster counter (labels) and
//! the per-cluster weight sums (sort). Everything else writes the track's
//! own slot.
//!
//! [`ZHist`]: crate::z_hist::ZHist

mod chains;
mod compute;
pub(crate) mod constants;
mod cores;
mod debug;
mod edges;
mod index;
mod labels;
mod neighbors;
mod timing;
mod workspace;


pub(crate) use compute::find_clusters;
pub use workspace::WorkSpace;

use crate::VertexConfig;

/// Pass-level view of [`VertexConfig`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClusterParams {
    pub min_neighbors: i32,
    pub eps: f32,
    /// `errmax^2`, the seed gate on `ez2`.
    pub er2mx: f32,
    pub chi2max: f32,
}

impl ClusterParams {
    pub fn from_config(config: &VertexConfig) -> Self {
        Self {
            min_neighbors: i32::try_from(config.min_neighbors).unwrap_or(i32::MAX),
            eps: config.eps,
            er2mx: config.errmax * config.errmax,
            chi2max: config.chi2max,
        }
    }

    #[inline]
    pub fn is_core(&self, neighbors: i32) -> bool {
        neighbors >= self.min_neighbors
    }
}

/// `(za, a)` sorts strictly before `(zb, b)`: lower z, ties broken by index.
#[inline]
pub(crate) fn precedes(za: f32, a: usize, zb: f32, b: usize) -> bool {
    za < zb || (za == zb && a < b)
}
