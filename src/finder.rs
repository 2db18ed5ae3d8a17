//! Reusable vertex finder.

use crate::dbscan::{find_clusters, WorkSpace};
use crate::{TrackLike, VertexConfig, VertexDiagnostics, VertexError, ZVertices};

/// Vertex finder owning its workspace and output buffers.
///
/// Keep one finder per event stream: buffers are allocated once at their
/// full capacity and reused for every event.
///
/// ```
/// use zvertex::{Track, VertexConfig, VertexFinder};
///
/// let mut finder = VertexFinder::new(VertexConfig::default()).unwrap();
/// let tracks = [
///     Track::new(1.00, 5e-5, 2.0),
///     Track::new(1.02, 5e-5, 3.0),
///     Track::new(1.04, 5e-5, 1.0),
/// ];
/// finder.process(&tracks).unwrap();
/// assert_eq!(finder.vertices().num_vertices(), 1);
/// assert_eq!(finder.vertices().weights(), &[6.0]);
/// ```
pub struct VertexFinder {
    config: VertexConfig,
    workspace: WorkSpace,
    vertices: ZVertices,
}

impl VertexFinder {
    pub fn new(config: VertexConfig) -> Result<Self, VertexError> {
        config.validate()?;
        Ok(Self {
            config,
            workspace: WorkSpace::new(),
            vertices: ZVertices::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &VertexConfig {
        &self.config
    }

    /// Vertices of the last processed event.
    #[inline]
    pub fn vertices(&self) -> &ZVertices {
        &self.vertices
    }

    /// Workspace state of the last processed event.
    #[inline]
    pub fn workspace(&self) -> &WorkSpace {
        &self.workspace
    }

    /// Cluster one event.
    pub fn process<T: TrackLike>(
        &mut self,
        tracks: &[T],
    ) -> Result<VertexDiagnostics, VertexError> {
        self.workspace.load(tracks)?;
        Ok(self.run())
    }

    /// Cluster one event given as parallel `z`, `ez2`, `pt2` arrays.
    pub fn process_soa(
        &mut self,
        z: &[f32],
        ez2: &[f32],
        pt2: &[f32],
    ) -> Result<VertexDiagnostics, VertexError> {
        self.workspace.load_soa(z, ez2, pt2)?;
        Ok(self.run())
    }

    /// Cluster one event whose tracks were reordered upstream.
    ///
    /// `origin[i]` is the upstream index of `tracks[i]`; per-track outputs
    /// are indexed by upstream index.
    pub fn process_with_origin<T: TrackLike>(
        &mut self,
        tracks: &[T],
        origin: &[u16],
    ) -> Result<VertexDiagnostics, VertexError> {
        self.workspace.load(tracks)?;
        self.workspace.set_origin(origin)?;
        Ok(self.run())
    }

    /// Move the last event's vertices out, leaving empty buffers behind.
    pub fn take_vertices(&mut self) -> ZVertices {
        std::mem::take(&mut self.vertices)
    }

    fn run(&mut self) -> VertexDiagnostics {
        find_clusters(&mut self.workspace, &mut self.vertices, &self.config)
    }
}
