//! Per-event scratch state shared by the clustering passes.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use super::constants::{MAX_TRACKS, MAX_VTX};
use crate::sort::AtomicF32;
use crate::z_hist::ZHist;
use crate::{TrackLike, VertexError};

/// Track arrays and clustering scratch for one event.
///
/// Every buffer is sized for [`MAX_TRACKS`] / [`MAX_VTX`] up front, so
/// loading and clustering an event does not allocate. Reuse one workspace
/// across events; [`WorkSpace::reset`] is called by every `load*`.
pub struct WorkSpace {
    pub(crate) ntrks: usize,
    pub(crate) zt: Vec<f32>,
    pub(crate) ezt2: Vec<f32>,
    pub(crate) ptt2: Vec<f32>,
    /// Upstream index of each working track.
    pub(crate) itrk: Vec<u16>,
    /// Working index of each upstream track (inverse of `itrk`).
    pub(crate) slot_of: Vec<u16>,

    /// Histogram key per track.
    pub(crate) izt: Vec<u8>,
    /// Neighbor count per track.
    pub(crate) nn: Vec<i32>,
    /// Chain pointer (track index) while clustering, then the cluster id.
    pub(crate) iv: Vec<AtomicI32>,
    pub(crate) hist: ZHist,

    /// Shared cluster id counter.
    pub(crate) found: AtomicU32,
    /// Number of clusters after labeling.
    pub(crate) nv: usize,
    /// Root track of each allocated cluster id.
    pub(crate) roots: Vec<AtomicU32>,
    /// Scratch permutation of cluster ids ordered by root.
    pub(crate) by_root: Vec<u16>,
    /// Allocated id to canonical id.
    pub(crate) remap: Vec<u16>,
    /// Per-cluster weight sums.
    pub(crate) ptv2: Vec<AtomicF32>,
}

impl WorkSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of loaded tracks.
    #[inline]
    pub fn num_tracks(&self) -> usize {
        self.ntrks
    }

    /// Number of clusters found by the last run.
    #[inline]
    pub fn num_clusters(&self) -> usize {
        self.nv
    }

    /// Neighbor counts of the last run, by working index.
    #[inline]
    pub fn neighbor_counts(&self) -> &[i32] {
        &self.nn[..self.ntrks]
    }

    /// Current cluster ref of working track `i`.
    ///
    /// Mid-pipeline this is a chain pointer; after a full run it is the
    /// cluster id or [`NOISE`](super::constants::NOISE).
    #[inline]
    pub fn cluster_ref(&self, i: usize) -> i32 {
        self.iv[i].load(Ordering::Relaxed)
    }

    /// Snapshot of all cluster refs.
    pub fn cluster_refs(&self) -> Vec<i32> {
        (0..self.ntrks).map(|i| self.cluster_ref(i)).collect()
    }

    /// Drop the loaded event, keeping all allocations.
    pub fn reset(&mut self) {
        self.ntrks = 0;
        self.zt.clear();
        self.ezt2.clear();
        self.ptt2.clear();
        self.itrk.clear();
        self.slot_of.clear();
        self.izt.clear();
        self.nn.clear();
        self.iv.clear();
        *self.found.get_mut() = 0;
        self.nv = 0;
    }

    /// Load tracks for a new event.
    pub fn load<T: TrackLike>(&mut self, tracks: &[T]) -> Result<(), VertexError> {
        check_capacity(tracks.len())?;
        self.reset();
        self.zt.extend(tracks.iter().map(|t| t.z()));
        self.ezt2.extend(tracks.iter().map(|t| t.ez2()));
        self.ptt2.extend(tracks.iter().map(|t| t.pt2()));
        self.finish_load();
        Ok(())
    }

    /// Load tracks given as parallel arrays.
    pub fn load_soa(&mut self, z: &[f32], ez2: &[f32], pt2: &[f32]) -> Result<(), VertexError> {
        if z.len() != ez2.len() || z.len() != pt2.len() {
            return Err(VertexError::LengthMismatch {
                z: z.len(),
                ez2: ez2.len(),
                pt2: pt2.len(),
            });
        }
        check_capacity(z.len())?;
        self.reset();
        self.zt.extend_from_slice(z);
        self.ezt2.extend_from_slice(ez2);
        self.ptt2.extend_from_slice(pt2);
        self.finish_load();
        Ok(())
    }

    /// Map working tracks to their upstream indices.
    ///
    /// `origin[i]` is the upstream index of loaded track `i`; it must be a
    /// permutation of `0..num_tracks()`.
    pub fn set_origin(&mut self, origin: &[u16]) -> Result<(), VertexError> {
        let n = self.ntrks;
        if origin.len() != n {
            return Err(VertexError::InvalidOrigin(format!(
                "{} entries for {} tracks",
                origin.len(),
                n
            )));
        }
        let mut seen = vec![false; n];
        for &o in origin {
            let o = o as usize;
            if o >= n || seen[o] {
                return Err(VertexError::InvalidOrigin(format!(
                    "index {} out of range or repeated",
                    o
                )));
            }
            seen[o] = true;
        }
        self.itrk.clear();
        self.itrk.extend_from_slice(origin);
        for (i, &o) in origin.iter().enumerate() {
            self.slot_of[o as usize] = i as u16;
        }
        Ok(())
    }

    fn finish_load(&mut self) {
        let n = self.zt.len();
        self.ntrks = n;
        self.itrk.extend(0..n as u16);
        self.slot_of.extend(0..n as u16);
        self.izt.resize(n, 0);
        self.nn.resize(n, 0);
        self.iv.resize_with(n, || AtomicI32::new(0));
    }
}

fn check_capacity(n: usize) -> Result<(), VertexError> {
    if n > MAX_TRACKS {
        Err(VertexError::TooManyTracks(n))
    } else {
        Ok(())
    }
}

impl Default for WorkSpace {
    fn default() -> Self {
        Self {
            ntrks: 0,
            zt: Vec::with_capacity(MAX_TRACKS),
            ezt2: Vec::with_capacity(MAX_TRACKS),
            ptt2: Vec::with_capacity(MAX_TRACKS),
            itrk: Vec::with_capacity(MAX_TRACKS),
            slot_of: Vec::with_capacity(MAX_TRACKS),
            izt: Vec::with_capacity(MAX_TRACKS),
            nn: Vec::with_capacity(MAX_TRACKS),
            iv: Vec::with_capacity(MAX_TRACKS),
            hist: ZHist::new(MAX_TRACKS),
            found: AtomicU32::new(0),
            nv: 0,
            roots: (0..MAX_VTX).map(|_| AtomicU32::new(0)).collect(),
            by_root: Vec::with_capacity(MAX_VTX),
            remap: vec![0; MAX_VTX],
            ptv2: (0..MAX_VTX).map(|_| AtomicF32::new(0.0)).collect(),
        }
    }
}
