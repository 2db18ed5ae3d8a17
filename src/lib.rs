//! Primary vertex finding along the beam axis.
//!
//! Tracks, given by their longitudinal position `z`, squared uncertainty
//! `ez2` and weight `pt2`, are grouped with a histogram-bounded DBSCAN
//! variant. Each track ends up in one vertex or is marked as noise, and
//! vertices are ordered by their summed weight.
//!
//! # Example
//!
//! ```
//! use zvertex::{find_vertices_with, Track, VertexConfig};
//!
//! let tracks = vec![
//!     Track::new(0.00, 5e-5, 1.0),
//!     Track::new(0.01, 5e-5, 1.0),
//!     Track::new(0.02, 5e-5, 1.0),
//!     Track::new(5.00, 5e-5, 4.0),
//!     Track::new(5.01, 5e-5, 4.0),
//! ];
//!
//! let config = VertexConfig {
//!     min_neighbors: 1,
//!     ..Default::default()
//! };
//! let output = find_vertices_with(&tracks, &config).expect("valid input");
//! let vertices = &output.vertices;
//! assert_eq!(vertices.num_vertices(), 2);
//! assert_eq!(vertices.vertex_of(0), vertices.vertex_of(2));
//! // Lightest first.
//! assert_eq!(vertices.order(), &[0, 1]);
//! ```

mod config;
mod dispatch;
mod error;
mod finder;
mod types;
mod vertices;
pub mod validation;

// Internal modules
pub(crate) mod dbscan;
pub(crate) mod sort;
pub mod z_hist;

pub use config::VertexConfig;
pub use dbscan::constants::{MAX_TRACKS, MAX_VTX, NOISE};
pub use dbscan::WorkSpace;
pub use dispatch::Dispatch;
pub use error::VertexError;
pub use finder::VertexFinder;
pub use types::{Track, TrackLike};
pub use vertices::{VertexView, ZVertices};

/// Output from vertex finding, including vertices and diagnostics.
#[derive(Debug, Clone)]
pub struct VertexOutput {
    /// The vertices found.
    pub vertices: ZVertices,
    /// Diagnostic information about the computation.
    pub diagnostics: VertexDiagnostics,
}

/// Diagnostic information from one clustering run.
///
/// The consistency counters are only filled when
/// [`VertexConfig::verify`] is set and should always be zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexDiagnostics {
    pub num_tracks: usize,
    /// Tracks with at least `min_neighbors` neighbors.
    pub core_tracks: usize,
    /// Tracks assigned to no vertex.
    pub noise_tracks: usize,
    /// Clusters found before any downstream split/merge stage.
    pub proto_vertices: usize,
    /// Core links pointing straight back at their source.
    pub back_links: usize,
    /// Core tracks whose root is not below them.
    pub misordered_roots: usize,
    /// Core neighbor pairs that ended up in different clusters.
    pub split_pairs: usize,
}

impl VertexDiagnostics {
    /// Returns true if no consistency issue was detected.
    pub fn is_clean(&self) -> bool {
        self.back_links == 0 && self.misordered_roots == 0 && self.split_pairs == 0
    }
}

/// Find vertices with default settings.
pub fn find_vertices<T: TrackLike>(tracks: &[T]) -> Result<VertexOutput, VertexError> {
    find_vertices_with(tracks, &VertexConfig::default())
}

/// Find vertices with explicit configuration.
///
/// Allocates a fresh workspace; use [`VertexFinder`] to reuse buffers
/// across events.
pub fn find_vertices_with<T: TrackLike>(
    tracks: &[T],
    config: &VertexConfig,
) -> Result<VertexOutput, VertexError> {
    let mut finder = VertexFinder::new(config.clone())?;
    let diagnostics = finder.process(tracks)?;
    Ok(VertexOutput {
        vertices: finder.take_vertices(),
        diagnostics,
    })
}
