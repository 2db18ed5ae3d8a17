//! Clustering parameters.
//!
//! Defaults follow the usual pixel-track settings: a core track needs two
//! neighbors within 0.07 in z, seeds need `ez <= 0.01`, and edge tracks are
//! attached within a chi2 of 9.

use serde::{Deserialize, Serialize};

use crate::z_hist::BIN_WIDTH;
use crate::{Dispatch, VertexError};

/// Configuration for vertex finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexConfig {
    /// Minimum number of neighbors for a track to be a core track (>= 1).
    pub min_neighbors: u32,
    /// Maximum |dz| between neighbors. Must not exceed one histogram bin.
    pub eps: f32,
    /// Tracks with `ez2 > errmax^2` never accumulate neighbors.
    pub errmax: f32,
    /// Edge tracks attach only if `dz^2 <= chi2max * (ez2_i + ez2_j)`.
    pub chi2max: f32,
    /// Pass execution backend.
    pub dispatch: Dispatch,
    /// Renumber cluster ids by ascending root track index.
    ///
    /// Ids handed out by the shared counter depend on thread scheduling;
    /// with this set the output is identical for every dispatch.
    pub canonical_ids: bool,
    /// Run the consistency passes after chain building and resolution.
    pub verify: bool,
}

impl Default for VertexConfig {
    fn default() -> Self {
        Self {
            min_neighbors: 2,
            eps: 0.07,
            errmax: 0.01,
            chi2max: 9.0,
            dispatch: Dispatch::default(),
            canonical_ids: true,
            verify: false,
        }
    }
}

impl VertexConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, VertexError> {
        let config: VertexConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, VertexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameters the passes cannot honor.
    ///
    /// Neighbor search only visits the adjacent histogram bins, so an `eps`
    /// wider than one bin would silently miss neighbors.
    pub fn validate(&self) -> Result<(), VertexError> {
        if self.min_neighbors == 0 {
            return Err(invalid("min_neighbors", "must be at least 1".into()));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(invalid("eps", format!("must be positive, got {}", self.eps)));
        }
        if self.eps > BIN_WIDTH {
            return Err(invalid(
                "eps",
                format!("{} exceeds the bin width {}", self.eps, BIN_WIDTH),
            ));
        }
        if self.errmax.is_nan() || self.errmax < 0.0 {
            return Err(invalid(
                "errmax",
                format!("must be non-negative, got {}", self.errmax),
            ));
        }
        if self.chi2max.is_nan() || self.chi2max < 0.0 {
            return Err(invalid(
                "chi2max",
                format!("must be non-negative, got {}", self.chi2max),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: String) -> VertexError {
    VertexError::InvalidConfig { field, message }
}
