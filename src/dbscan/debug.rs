//! Consistency checks between passes (enabled by `VertexConfig::verify`).

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{precedes, ClusterParams, WorkSpace};
use crate::z_hist::BIN_RADIUS;
use crate::Dispatch;

/// After linking: count tracks whose target points straight back at them.
pub(super) fn count_back_links(ws: &WorkSpace, dispatch: Dispatch) -> usize {
    let n = ws.ntrks;
    let iv = &ws.iv[..n];
    let bad = AtomicUsize::new(0);
    dispatch.for_each(n, |i| {
        let v = iv[i].load(Ordering::Relaxed) as usize;
        if v != i && iv[v].load(Ordering::Relaxed) as usize == i {
            bad.fetch_add(1, Ordering::Relaxed);
        }
    });
    bad.into_inner()
}

/// After resolution: (roots above their core track, core neighbor pairs
/// with different roots).
pub(super) fn count_root_violations(
    ws: &WorkSpace,
    params: &ClusterParams,
    dispatch: Dispatch,
) -> (usize, usize) {
    let n = ws.ntrks;
    let zt = &ws.zt[..n];
    let izt = &ws.izt[..n];
    let nn = &ws.nn[..n];
    let iv = &ws.iv[..n];
    let hist = &ws.hist;
    let misordered = AtomicUsize::new(0);
    let split = AtomicUsize::new(0);

    dispatch.for_each(n, |i| {
        if !params.is_core(nn[i]) {
            return;
        }
        let root = iv[i].load(Ordering::Relaxed) as usize;
        if root != i && !precedes(zt[root], root, zt[i], i) {
            misordered.fetch_add(1, Ordering::Relaxed);
        }
        hist.for_each_in_bins(izt[i], BIN_RADIUS, |j| {
            if j <= i || !params.is_core(nn[j]) {
                return;
            }
            if (zt[i] - zt[j]).abs() > params.eps {
                return;
            }
            if iv[j].load(Ordering::Relaxed) as usize != root {
                log::trace!(
                    "split pair {} (z={}, root {}) / {} (z={}, root {})",
                    i,
                    zt[i],
                    root,
                    j,
                    zt[j],
                    iv[j].load(Ordering::Relaxed)
                );
                split.fetch_add(1, Ordering::Relaxed);
            }
        });
    });
    (misordered.into_inner(), split.into_inner())
}
