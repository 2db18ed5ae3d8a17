//! Fixed 256-bin histogram over quantized track z.
//!
//! Positions are scaled by [`Z_RESOLUTION`], truncated, clamped to the `i8`
//! range and offset into `0..NUM_BINS`. Tracks within one bin width of each
//! other always land in the same or adjacent bins, so a neighbor search with
//! `eps <= BIN_WIDTH` only needs to visit `key - 1 ..= key + 1`.
//!
//! Registration is the usual counting sort, one barrier between each step:
//! 1. `count` every key (atomic per-bin counters),
//! 2. `finalize` (prefix sum into bin offsets),
//! 3. `fill` every track id (atomic per-bin cursors),
//! 4. `seal` (order each bin by track id, fixing the scan order).

use std::sync::atomic::{AtomicU16, AtomicU32, Ordering};

mod build;


/// Number of bins.
pub const NUM_BINS: usize = 256;
/// Bins per unit of z.
pub const Z_RESOLUTION: f32 = 10.0;
/// Width of one bin in z.
pub const BIN_WIDTH: f32 = 1.0 / Z_RESOLUTION;
/// Bins visited on each side of a track's own bin.
pub const BIN_RADIUS: usize = 1;

/// Map a position to its bin key.
///
/// Positions beyond +-12.8 all fall in the edge bins.
#[inline]
pub fn quantize(z: f32) -> u8 {
    // `as` truncates toward zero and saturates (NaN maps to 0).
    let iz = ((z * Z_RESOLUTION) as i32).clamp(i8::MIN as i32, i8::MAX as i32);
    (iz - i8::MIN as i32) as u8
}

/// Bucket index from bin key to track ids.
pub struct ZHist {
    /// Per-bin counters during `count`, write cursors during `fill`.
    cursors: Vec<AtomicU32>,
    /// `offsets[b]..offsets[b + 1]` is the range of bin `b`.
    offsets: Vec<u32>,
    /// Track ids as written by `fill`.
    staged: Vec<AtomicU16>,
    /// Track ids after `seal`, ascending within each bin.
    ids: Vec<u16>,
    capacity: usize,
    sealed: bool,
}

impl ZHist {
    /// Create an empty histogram able to hold `capacity` track ids.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity <= u16::MAX as usize + 1,
            "ZHist stores u16 track ids (capacity {})",
            capacity
        );
        Self {
            cursors: (0..NUM_BINS).map(|_| AtomicU32::new(0)).collect(),
            offsets: vec![0; NUM_BINS + 1],
            staged: (0..capacity).map(|_| AtomicU16::new(0)).collect(),
            ids: Vec::with_capacity(capacity),
            capacity,
            sealed: false,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of registered track ids (valid after `finalize`).
    #[inline]
    pub fn size(&self) -> usize {
        self.offsets[NUM_BINS] as usize
    }

    /// Forget all registered tracks.
    pub fn reset(&mut self) {
        for c in &mut self.cursors {
            *c.get_mut() = 0;
        }
        self.offsets.fill(0);
        self.ids.clear();
        self.sealed = false;
    }

    /// Reserve one slot in bin `key`.
    #[inline]
    pub fn count(&self, key: u8) {
        self.cursors[key as usize].fetch_add(1, Ordering::Relaxed);
    }

    /// Turn the per-bin counts into offsets and arm the fill cursors.
    ///
    /// # Panics
    /// If more ids were counted than the histogram can hold.
    pub fn finalize(&mut self) {
        let mut sum = 0u32;
        for (b, cursor) in self.cursors.iter_mut().enumerate() {
            self.offsets[b] = sum;
            sum += *cursor.get_mut();
            *cursor.get_mut() = self.offsets[b];
        }
        self.offsets[NUM_BINS] = sum;
        assert!(
            sum as usize <= self.capacity,
            "ZHist overflow: {} ids for capacity {}",
            sum,
            self.capacity
        );
    }

    /// Store `id` in bin `key`. Requires `finalize` and a matching `count`.
    #[inline]
    pub fn fill(&self, key: u8, id: u16) {
        let b = key as usize;
        let pos = self.cursors[b].fetch_add(1, Ordering::Relaxed) as usize;
        debug_assert!(
            pos < self.offsets[b + 1] as usize,
            "fill without matching count in bin {}",
            b
        );
        self.staged[pos].store(id, Ordering::Relaxed);
    }

    /// Freeze the contents, sorting every bin by ascending track id.
    ///
    /// Fill order depends on scheduling; after sealing, scans visit tracks
    /// in a fixed order.
    pub fn seal(&mut self) {
        let size = self.size();
        self.ids.clear();
        self.ids
            .extend(self.staged[..size].iter_mut().map(|a| *a.get_mut()));
        for b in 0..NUM_BINS {
            let (start, end) = (self.offsets[b] as usize, self.offsets[b + 1] as usize);
            if end - start > 1 {
                self.ids[start..end].sort_unstable();
            }
        }
        self.sealed = true;
    }

    /// Track ids in bin `key`.
    #[inline]
    pub fn bin(&self, key: u8) -> &[u16] {
        debug_assert!(self.sealed, "ZHist read before seal");
        let b = key as usize;
        &self.ids[self.offsets[b] as usize..self.offsets[b + 1] as usize]
    }

    /// Call `f` with every track id in bins `key - radius ..= key + radius`
    /// (clamped to the histogram), in ascending bin order.
    #[inline]
    pub fn for_each_in_bins<F>(&self, key: u8, radius: usize, mut f: F)
    where
        F: FnMut(usize),
    {
        debug_assert!(self.sealed, "ZHist read before seal");
        let b = key as usize;
        let lo = b.saturating_sub(radius);
        let hi = (b + radius).min(NUM_BINS - 1);
        let start = self.offsets[lo] as usize;
        let end = self.offsets[hi + 1] as usize;
        for &id in &self.ids[start..end] {
            f(id as usize);
        }
    }
}
