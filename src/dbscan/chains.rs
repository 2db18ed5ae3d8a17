//! Pass 4: chain resolution.

use std::sync::atomic::Ordering;

use super::WorkSpace;
use crate::Dispatch;

/// Replace every chain pointer by the root of its chain.
///
/// Tracks read other tracks' pointers while those may be shortened
/// concurrently; any value observed is still on the same chain, and roots
/// never change in this pass.
pub(super) fn resolve_chains(ws: &WorkSpace, dispatch: Dispatch) {
    let n = ws.ntrks;
    let iv = &ws.iv[..n];

    dispatch.for_each(n, |i| {
        let mut m = iv[i].load(Ordering::Relaxed);
        loop {
            let next = iv[m as usize].load(Ordering::Relaxed);
            if next == m {
                break;
            }
            m = next;
        }
        iv[i].store(m, Ordering::Relaxed);
    });
}
