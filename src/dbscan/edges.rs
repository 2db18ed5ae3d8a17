//! Pass 6: attach border tracks.

use std::sync::atomic::Ordering;

use super::{ClusterParams, WorkSpace};
use crate::z_hist::BIN_RADIUS;
use crate::Dispatch;

/// Attach every non-core track to the cluster of its closest core neighbor.
///
/// A core neighbor qualifies within `eps` and when
/// `dz^2 <= chi2max * (ez2_i + ez2_j)`. Among equally close candidates the
/// last one in scan order wins. Tracks without a candidate stay noise.
/// Runs after labeling: core tracks already carry their final id and are
/// only read here.
pub(super) fn attach_edges(ws: &WorkSpace, params: &ClusterParams, dispatch: Dispatch) {
    let n = ws.ntrks;
    let zt = &ws.zt[..n];
    let ezt2 = &ws.ezt2[..n];
    let izt = &ws.izt[..n];
    let nn = &ws.nn[..n];
    let iv = &ws.iv[..n];
    let hist = &ws.hist;

    dispatch.for_each(n, |i| {
        if params.is_core(nn[i]) {
            return;
        }
        let mut mdist = params.eps;
        let mut cluster = None;
        hist.for_each_in_bins(izt[i], BIN_RADIUS, |j| {
            if !params.is_core(nn[j]) {
                return;
            }
            let dist = (zt[i] - zt[j]).abs();
            if dist > mdist {
                return;
            }
            if dist * dist > params.chi2max * (ezt2[i] + ezt2[j]) {
                return;
            }
            mdist = dist;
            cluster = Some(iv[j].load(Ordering::Relaxed));
        });
        if let Some(c) = cluster {
            iv[i].store(c, Ordering::Relaxed);
        }
    });
}
