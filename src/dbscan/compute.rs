//! Pass pipeline for one event.

use super::chains::resolve_chains;
use super::constants::NOISE;
use super::cores::link_cores;
use super::debug;
use super::edges::attach_edges;
use super::index::index_tracks;
use super::labels::label_clusters;
use super::neighbors::count_neighbors;
use super::timing::{Pass, Timer, TimingBuilder};
use super::{ClusterParams, WorkSpace};
use crate::sort::sort_by_pt2;
use crate::{VertexConfig, VertexDiagnostics, ZVertices};

/// Cluster the tracks loaded in `ws` and write the vertices into `out`.
///
/// `config` must have passed [`VertexConfig::validate`].
pub(crate) fn find_clusters(
    ws: &mut WorkSpace,
    out: &mut ZVertices,
    config: &VertexConfig,
) -> VertexDiagnostics {
    let params = ClusterParams::from_config(config);
    let dispatch = config.dispatch;
    let n = ws.ntrks;
    log::debug!(
        "params minT={} eps={} errmax={} chi2max={} tracks={}",
        config.min_neighbors,
        config.eps,
        config.errmax,
        config.chi2max,
        n
    );

    let mut tb = TimingBuilder::new();
    let mut diagnostics = VertexDiagnostics {
        num_tracks: n,
        ..Default::default()
    };

    let t = Timer::start();
    index_tracks(ws, dispatch);
    tb.record(Pass::Index, t.elapsed());

    let t = Timer::start();
    count_neighbors(ws, &params, dispatch);
    tb.record(Pass::Neighbors, t.elapsed());

    let t = Timer::start();
    link_cores(ws, &params, dispatch);
    tb.record(Pass::Cores, t.elapsed());

    if config.verify {
        let t = Timer::start();
        diagnostics.back_links = debug::count_back_links(ws, dispatch);
        tb.record(Pass::Verify, t.elapsed());
    }

    let t = Timer::start();
    resolve_chains(ws, dispatch);
    tb.record(Pass::Chains, t.elapsed());

    if config.verify {
        let t = Timer::start();
        let (misordered, split) = debug::count_root_violations(ws, &params, dispatch);
        diagnostics.misordered_roots = misordered;
        diagnostics.split_pairs = split;
        tb.record(Pass::Verify, t.elapsed());
        if !diagnostics.is_clean() {
            log::warn!(
                "inconsistent clustering: back_links={} misordered_roots={} split_pairs={}",
                diagnostics.back_links,
                misordered,
                split
            );
        }
    }

    let t = Timer::start();
    let count = label_clusters(ws, &params, config.canonical_ids, dispatch);
    tb.record(Pass::Labels, t.elapsed());

    let t = Timer::start();
    attach_edges(ws, &params, dispatch);
    tb.record(Pass::Edges, t.elapsed());

    let t = Timer::start();
    sort_by_pt2(ws, out, dispatch);
    tb.record(Pass::Sort, t.elapsed());

    diagnostics.proto_vertices = count;
    diagnostics.core_tracks = ws.nn[..n]
        .iter()
        .filter(|&&c| params.is_core(c))
        .count();
    diagnostics.noise_tracks = (0..n).filter(|&i| ws.cluster_ref(i) == NOISE).count();

    log::debug!(
        "found {} proto vertices ({} core, {} noise of {} tracks)",
        count,
        diagnostics.core_tracks,
        diagnostics.noise_tracks,
        n
    );
    tb.finish().report(n, count);

    diagnostics
}
