//! Vertex candidates produced by the clusterer.

use crate::dbscan::constants::{MAX_TRACKS, MAX_VTX, NOISE};

/// Clusters of one event.
///
/// Vertex ids run over `0..num_vertices()`. Per-track arrays are indexed by
/// upstream track index (the identity unless an origin mapping was given).
#[derive(Debug, Clone)]
pub struct ZVertices {
    pub(crate) count: usize,
    /// Summed `pt2` per vertex.
    pub(crate) weight: Vec<f32>,
    /// Vertex ids by ascending weight.
    pub(crate) order: Vec<u16>,
    /// Vertex id per track, or [`NOISE`].
    pub(crate) track_vertex: Vec<i32>,
    /// Neighbor count per track.
    pub(crate) ndof: Vec<i32>,
}

impl Default for ZVertices {
    fn default() -> Self {
        Self {
            count: 0,
            weight: Vec::with_capacity(MAX_VTX),
            order: Vec::with_capacity(MAX_VTX),
            track_vertex: Vec::with_capacity(MAX_TRACKS),
            ndof: Vec::with_capacity(MAX_TRACKS),
        }
    }
}

impl ZVertices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear for an event with `n_tracks` tracks.
    pub(crate) fn reset(&mut self, n_tracks: usize) {
        self.count = 0;
        self.weight.clear();
        self.order.clear();
        self.track_vertex.clear();
        self.track_vertex.resize(n_tracks, NOISE);
        self.ndof.clear();
        self.ndof.resize(n_tracks, 0);
    }

    /// Number of vertices found.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.count
    }

    /// Number of tracks in the event.
    #[inline]
    pub fn num_tracks(&self) -> usize {
        self.track_vertex.len()
    }

    /// Summed track weight per vertex id.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weight
    }

    /// Vertex ids sorted by ascending weight.
    #[inline]
    pub fn order(&self) -> &[u16] {
        &self.order
    }

    /// Vertex id per track, [`NOISE`] for unassigned tracks.
    #[inline]
    pub fn track_vertices(&self) -> &[i32] {
        &self.track_vertex
    }

    /// Neighbor count per track.
    #[inline]
    pub fn ndof(&self) -> &[i32] {
        &self.ndof
    }

    /// Vertex of `track`, `None` for noise.
    #[inline]
    pub fn vertex_of(&self, track: usize) -> Option<usize> {
        let v = self.track_vertex[track];
        (v != NOISE).then_some(v as usize)
    }

    /// Get a view of a specific vertex.
    #[inline]
    pub fn vertex(&self, id: usize) -> VertexView<'_> {
        assert!(id < self.count, "vertex {} of {}", id, self.count);
        VertexView {
            id,
            weight: self.weight[id],
            track_vertex: &self.track_vertex,
        }
    }

    /// Vertices from lightest to heaviest.
    pub fn iter_by_weight(&self) -> impl Iterator<Item = VertexView<'_>> + '_ {
        self.order.iter().map(move |&id| self.vertex(id as usize))
    }

    /// Vertices from heaviest to lightest.
    pub fn iter_by_weight_desc(&self) -> impl Iterator<Item = VertexView<'_>> + '_ {
        self.order.iter().rev().map(move |&id| self.vertex(id as usize))
    }
}

/// Read-only view of one vertex.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    pub id: usize,
    pub weight: f32,
    track_vertex: &'a [i32],
}

impl<'a> VertexView<'a> {
    /// Tracks assigned to this vertex, by upstream index.
    pub fn tracks(&self) -> impl Iterator<Item = usize> + 'a {
        let id = self.id as i32;
        self.track_vertex
            .iter()
            .enumerate()
            .filter(move |&(_, &v)| v == id)
            .map(|(k, _)| k)
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks().count()
    }
}
