//! Track input types.

use bytemuck::{Pod, Zeroable};

use crate::VertexError;

/// A reconstructed track projected on the beam axis.
///
/// `#[repr(C)]` with three `f32` fields, so a flat `[z, ez2, pt2, ...]`
/// buffer can be viewed as `&[Track]` without copying
/// (see [`Track::slice_from_flat`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Track {
    /// Longitudinal position.
    pub z: f32,
    /// Squared uncertainty on `z`.
    pub ez2: f32,
    /// Weight used to rank vertices (transverse momentum squared).
    pub pt2: f32,
}

impl Track {
    #[inline]
    pub const fn new(z: f32, ez2: f32, pt2: f32) -> Self {
        Self { z, ez2, pt2 }
    }

    /// Create from any type implementing `TrackLike`.
    #[inline]
    pub fn from_like<T: TrackLike>(t: &T) -> Self {
        Self::new(t.z(), t.ez2(), t.pt2())
    }

    /// View a flat buffer of `z, ez2, pt2` triples as tracks.
    pub fn slice_from_flat(data: &[f32]) -> Result<&[Track], VertexError> {
        bytemuck::try_cast_slice(data).map_err(|e| {
            VertexError::Layout(format!("{} floats: {:?}", data.len(), e))
        })
    }
}

impl From<[f32; 3]> for Track {
    #[inline]
    fn from([z, ez2, pt2]: [f32; 3]) -> Self {
        Self::new(z, ez2, pt2)
    }
}

impl From<Track> for [f32; 3] {
    #[inline]
    fn from(t: Track) -> Self {
        [t.z, t.ez2, t.pt2]
    }
}

/// Trait for types that can be used as input tracks.
pub trait TrackLike {
    fn z(&self) -> f32;
    fn ez2(&self) -> f32;
    fn pt2(&self) -> f32;
}

impl TrackLike for Track {
    #[inline]
    fn z(&self) -> f32 {
        self.z
    }
    #[inline]
    fn ez2(&self) -> f32 {
        self.ez2
    }
    #[inline]
    fn pt2(&self) -> f32 {
        self.pt2
    }
}

impl TrackLike for [f32; 3] {
    #[inline]
    fn z(&self) -> f32 {
        self[0]
    }
    #[inline]
    fn ez2(&self) -> f32 {
        self[1]
    }
    #[inline]
    fn pt2(&self) -> f32 {
        self[2]
    }
}

impl TrackLike for (f32, f32, f32) {
    #[inline]
    fn z(&self) -> f32 {
        self.0
    }
    #[inline]
    fn ez2(&self) -> f32 {
        self.1
    }
    #[inline]
    fn pt2(&self) -> f32 {
        self.2
    }
}
