//! Pass 1: quantize positions and register every track in the histogram.

use std::sync::atomic::Ordering;

use super::WorkSpace;
use crate::z_hist::quantize;
use crate::Dispatch;

/// Compute bin keys, make every track its own root, build the histogram.
pub(super) fn index_tracks(ws: &mut WorkSpace, dispatch: Dispatch) {
    let n = ws.ntrks;
    let zt = &ws.zt[..n];
    dispatch.fill_with(&mut ws.izt[..n], |i| quantize(zt[i]));
    dispatch.fill_with(&mut ws.nn[..n], |_| 0);

    let iv = &ws.iv[..n];
    dispatch.for_each(n, |i| iv[i].store(i as i32, Ordering::Relaxed));

    ws.hist.build(&ws.izt[..n], dispatch);
    log::trace!("indexed {} tracks into {} bins", n, crate::z_hist::NUM_BINS);
}
