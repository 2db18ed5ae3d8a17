//! Per-vertex weight sums and the weight ordering.
//!
//! Weights are summed by a data-parallel pass with an atomic float add; the
//! ordering itself runs on one thread since there are at most `MAX_VTX`
//! vertices.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::dbscan::constants::NOISE;
use crate::dbscan::WorkSpace;
use crate::{Dispatch, ZVertices};

/// Orderings up to this length use insertion sort.
const SMALL_SORT_LEN: usize = 20;

/// `f32` with atomic add, stored as its bit pattern.
#[derive(Debug, Default)]
pub(crate) struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(v: f32) -> Self {
        Self(AtomicU32::new(v.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, v: f32) {
        self.0.store(v.to_bits(), Ordering::Relaxed);
    }

    /// Add `v`, returning the previous value.
    #[inline]
    pub fn fetch_add(&self, v: f32) -> f32 {
        let mut cur = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f32::from_bits(cur) + v).to_bits();
            match self
                .0
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(prev) => return f32::from_bits(prev),
                Err(actual) => cur = actual,
            }
        }
    }
}

/// Publish per-track ids, sum `pt2` per vertex and order vertices by
/// ascending weight.
///
/// With a single vertex the ordering is `[0]` without sorting; with none,
/// only the per-track outputs are written.
pub(crate) fn sort_by_pt2(ws: &WorkSpace, out: &mut ZVertices, dispatch: Dispatch) {
    let n = ws.ntrks;
    let count = ws.nv;
    let iv = &ws.iv[..n];
    let nn = &ws.nn[..n];
    let slot_of = &ws.slot_of[..n];

    out.reset(n);
    out.count = count;
    dispatch.fill_with(&mut out.track_vertex[..n], |k| {
        iv[slot_of[k] as usize].load(Ordering::Relaxed)
    });
    dispatch.fill_with(&mut out.ndof[..n], |k| nn[slot_of[k] as usize]);

    if count == 0 {
        return;
    }

    let ptv2 = &ws.ptv2[..count];
    for w in ptv2 {
        w.store(0.0);
    }
    let ptt2 = &ws.ptt2[..n];
    dispatch.for_each(n, |i| {
        let c = iv[i].load(Ordering::Relaxed);
        if c == NOISE {
            return;
        }
        ptv2[c as usize].fetch_add(ptt2[i]);
    });
    out.weight.extend(ptv2.iter().map(AtomicF32::load));

    if count == 1 {
        out.order.push(0);
        return;
    }

    out.order.extend(0..count as u16);
    let ZVertices { order, weight, .. } = out;
    sort_order(order, weight);
}

/// Stable sort of vertex ids by ascending `weight`.
pub(crate) fn sort_order(order: &mut [u16], weight: &[f32]) {
    let cmp = |a: &u16, b: &u16| weight[*a as usize].total_cmp(&weight[*b as usize]);
    if order.len() <= SMALL_SORT_LEN {
        insertion_sort_by(order, &mut |a, b| cmp(a, b) == CmpOrdering::Less);
    } else {
        order.sort_by(cmp);
    }
}

/// Stable insertion sort for short slices of `Copy` values.
pub fn insertion_sort_by<T, F>(v: &mut [T], is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        let tmp = v[i];
        if !is_less(&tmp, &v[i - 1]) {
            continue;
        }
        let mut j = i;
        while j > 0 && is_less(&tmp, &v[j - 1]) {
            v[j] = v[j - 1];
            j -= 1;
        }
        v[j] = tmp;
    }
}
