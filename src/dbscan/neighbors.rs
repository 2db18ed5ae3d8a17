//! Pass 2: neighbor counting.

use super::{ClusterParams, WorkSpace};
use crate::z_hist::BIN_RADIUS;
use crate::Dispatch;

/// Count, for every seed-quality track, the other tracks within `eps`.
///
/// Tracks failing the `ez2 <= errmax^2` gate keep a count of zero, but are
/// still counted as neighbors of others.
pub(super) fn count_neighbors(ws: &mut WorkSpace, params: &ClusterParams, dispatch: Dispatch) {
    let n = ws.ntrks;
    let zt = &ws.zt[..n];
    let ezt2 = &ws.ezt2[..n];
    let izt = &ws.izt[..n];
    let hist = &ws.hist;
    let eps = params.eps;
    let er2mx = params.er2mx;

    dispatch.fill_with(&mut ws.nn[..n], |i| {
        if ezt2[i] > er2mx {
            return 0;
        }
        let mut count = 0i32;
        hist.for_each_in_bins(izt[i], BIN_RADIUS, |j| {
            if i == j {
                return;
            }
            if (zt[i] - zt[j]).abs() > eps {
                return;
            }
            count += 1;
        });
        count
    });
}
