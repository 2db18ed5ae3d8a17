//! Capacities and cluster-ref encodings.

/// Maximum number of tracks per event.
pub const MAX_TRACKS: usize = 32 * 1024;

/// Maximum number of vertices per event.
pub const MAX_VTX: usize = 1024;

/// Cluster id of a track that belongs to no vertex.
///
/// Also the in-flight mark for noise roots while labeling.
pub const NOISE: i32 = -1;

/// Cluster ref of a labeled root: `-(id + 2)`, disjoint from track indices
/// (`>= 0`) and from [`NOISE`].
#[inline]
pub(crate) fn encode_id(id: usize) -> i32 {
    -(id as i32) - 2
}

/// Inverse of [`encode_id`]. `NOISE` must be handled by the caller.
#[inline]
pub(crate) fn decode_id(v: i32) -> usize {
    debug_assert!(v <= -2, "not an encoded cluster id: {}", v);
    (-v - 2) as usize
}
