//! Pass 5: dense cluster ids.

use std::sync::atomic::Ordering;

use super::constants::{decode_id, encode_id, MAX_VTX, NOISE};
use super::{ClusterParams, WorkSpace};
use crate::Dispatch;

/// Turn resolved chains into cluster ids.
///
/// Every root that is a core track draws a unique id from the shared
/// counter; other roots become noise. Followers then copy their root's
/// label and all labels are decoded to `0..count` or [`NOISE`]. With
/// `canonical` set, ids are renumbered by ascending root index.
///
/// Returns the number of clusters.
///
/// # Panics
/// If [`MAX_VTX`] or more clusters are found.
pub(super) fn label_clusters(
    ws: &mut WorkSpace,
    params: &ClusterParams,
    canonical: bool,
    dispatch: Dispatch,
) -> usize {
    let n = ws.ntrks;
    *ws.found.get_mut() = 0;

    {
        let nn = &ws.nn[..n];
        let iv = &ws.iv[..n];
        let found = &ws.found;
        let roots = &ws.roots;
        dispatch.for_each(n, |i| {
            if iv[i].load(Ordering::Relaxed) != i as i32 {
                return;
            }
            if params.is_core(nn[i]) {
                let id = found.fetch_add(1, Ordering::Relaxed) as usize;
                assert!(
                    id + 1 < MAX_VTX,
                    "{} proto vertices reach the capacity of {}",
                    id + 1,
                    MAX_VTX
                );
                roots[id].store(i as u32, Ordering::Relaxed);
                iv[i].store(encode_id(id), Ordering::Relaxed);
            } else {
                iv[i].store(NOISE, Ordering::Relaxed);
            }
        });
    }

    let count = *ws.found.get_mut() as usize;
    let canonical = canonical && count > 1;
    if canonical {
        canonical_remap(ws, count);
    }

    let iv = &ws.iv[..n];
    dispatch.for_each(n, |i| {
        let v = iv[i].load(Ordering::Relaxed);
        if v >= 0 {
            iv[i].store(iv[v as usize].load(Ordering::Relaxed), Ordering::Relaxed);
        }
    });

    let remap = &ws.remap;
    dispatch.for_each(n, |i| {
        let v = iv[i].load(Ordering::Relaxed);
        if v == NOISE {
            return;
        }
        let id = decode_id(v);
        let id = if canonical { remap[id] as usize } else { id };
        iv[i].store(id as i32, Ordering::Relaxed);
    });

    ws.nv = count;
    count
}

/// Fill `ws.remap` so that cluster ids follow ascending root index.
fn canonical_remap(ws: &mut WorkSpace, count: usize) {
    let roots = &ws.roots;
    ws.by_root.clear();
    ws.by_root.extend(0..count as u16);
    ws.by_root
        .sort_unstable_by_key(|&id| roots[id as usize].load(Ordering::Relaxed));
    for (rank, &id) in ws.by_root.iter().enumerate() {
        ws.remap[id as usize] = rank as u16;
    }
}
