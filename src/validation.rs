//! Consistency validation for vertex finder output.
//!
//! Checks the partition, weight and ordering properties a correct run must
//! satisfy. Useful for tests and for spot checks on real data.

use rustc_hash::FxHashMap;

use crate::dbscan::constants::{MAX_VTX, NOISE};
use crate::{TrackLike, ZVertices};

/// Relative tolerance on weight sums (summation order differs under
/// parallel dispatch).
const WEIGHT_RTOL: f64 = 1e-4;

/// Detailed validation report for one event.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub num_tracks: usize,
    pub num_vertices: usize,

    /// Tracks whose id is neither noise nor in `0..num_vertices`.
    pub ids_out_of_range: usize,
    /// Vertex ids no track is assigned to.
    pub empty_vertices: usize,
    /// Number of noise tracks.
    pub noise_tracks: usize,

    /// Vertices whose stored weight differs from their tracks' `pt2` sum.
    pub weight_mismatches: usize,
    /// Sum of `pt2` over all non-noise tracks.
    pub assigned_weight: f64,
    /// Sum of the stored vertex weights.
    pub vertex_weight: f64,

    /// `order` holds every vertex id exactly once.
    pub order_is_permutation: bool,
    /// Weights along `order` never decrease.
    pub order_is_sorted: bool,
    pub within_capacity: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.ids_out_of_range == 0
            && self.empty_vertices == 0
            && self.weight_mismatches == 0
            && close(self.assigned_weight, self.vertex_weight)
            && self.order_is_permutation
            && self.order_is_sorted
            && self.within_capacity
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= WEIGHT_RTOL * a.abs().max(b.abs()).max(1.0)
}

/// Validate `vertices` against the tracks they were computed from.
///
/// `tracks` must be indexed like [`ZVertices::track_vertices`], i.e. by
/// upstream index.
pub fn validate<T: TrackLike>(tracks: &[T], vertices: &ZVertices) -> ValidationReport {
    let nv = vertices.num_vertices();
    let ids = vertices.track_vertices();
    let weights = vertices.weights();
    let order = vertices.order();

    let mut report = ValidationReport {
        num_tracks: ids.len(),
        num_vertices: nv,
        within_capacity: nv < MAX_VTX && weights.len() == nv,
        ..Default::default()
    };

    // id -> (members, summed pt2)
    let mut members: FxHashMap<usize, (usize, f64)> = FxHashMap::default();
    for (k, &id) in ids.iter().enumerate() {
        if id == NOISE {
            report.noise_tracks += 1;
            continue;
        }
        if id < 0 || id as usize >= nv {
            report.ids_out_of_range += 1;
            continue;
        }
        let pt2 = tracks.get(k).map_or(0.0, |t| t.pt2() as f64);
        let entry = members.entry(id as usize).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += pt2;
        report.assigned_weight += pt2;
    }

    for (id, &w) in weights.iter().enumerate() {
        report.vertex_weight += w as f64;
        match members.get(&id) {
            None => report.empty_vertices += 1,
            Some(&(_, sum)) if !close(sum, w as f64) => report.weight_mismatches += 1,
            Some(_) => {}
        }
    }

    let mut seen = vec![false; nv];
    report.order_is_permutation = order.len() == nv
        && order.iter().all(|&id| {
            let id = id as usize;
            id < nv && !std::mem::replace(&mut seen[id], true)
        });
    report.order_is_sorted = report.order_is_permutation
        && order
            .windows(2)
            .all(|w| weights[w[0] as usize] <= weights[w[1] as usize]);

    report
}
