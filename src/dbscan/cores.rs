//! Pass 3: link core tracks toward lower z.

use std::sync::atomic::Ordering;

use super::{precedes, ClusterParams, WorkSpace};
use crate::z_hist::BIN_RADIUS;
use crate::Dispatch;

/// Point each core track at a core neighbor with lower z.
///
/// Neighbors are scanned in histogram order and the pointer moves whenever a
/// lower `(z, index)` core neighbor within `eps` shows up, so it ends on the
/// lowest one. Non-core tracks keep pointing at themselves.
///
/// Unlike a strict `z[j] < z[i]` rule, equal positions are ordered by track
/// index: coincident core tracks link to the lowest index and end up in one
/// cluster instead of staying separate roots. This also keeps the links
/// acyclic.
pub(super) fn link_cores(ws: &WorkSpace, params: &ClusterParams, dispatch: Dispatch) {
    let n = ws.ntrks;
    let zt = &ws.zt[..n];
    let izt = &ws.izt[..n];
    let nn = &ws.nn[..n];
    let iv = &ws.iv[..n];
    let hist = &ws.hist;

    dispatch.for_each(n, |i| {
        if !params.is_core(nn[i]) {
            return;
        }
        let mut mz = zt[i];
        let mut best = i;
        hist.for_each_in_bins(izt[i], BIN_RADIUS, |j| {
            if !precedes(zt[j], j, mz, best) {
                return;
            }
            if !params.is_core(nn[j]) {
                return;
            }
            if (zt[i] - zt[j]).abs() > params.eps {
                return;
            }
            mz = zt[j];
            best = j;
        });
        iv[i].store(best as i32, Ordering::Relaxed);
    });
}
