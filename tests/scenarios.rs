//! Small hand-built events with known outcomes.

mod support;

use support::events::{at, EZ2};
use zvertex::{find_vertices_with, Dispatch, Track, VertexConfig, ZVertices, NOISE};

fn run(tracks: &[Track], config: &VertexConfig) -> ZVertices {
    find_vertices_with(tracks, config)
        .expect("valid input")
        .vertices
}

fn min_neighbors(n: u32) -> VertexConfig {
    VertexConfig {
        min_neighbors: n,
        ..Default::default()
    }
}

fn two_groups(pt2: [f32; 5]) -> Vec<Track> {
    [0.00, 0.01, 0.02, 5.00, 5.01]
        .iter()
        .zip(pt2)
        .map(|(&z, w)| Track::new(z, EZ2, w))
        .collect()
}

#[test]
fn test_two_groups_lighter_first() {
    let vertices = run(&two_groups([1.0, 1.0, 1.0, 4.0, 4.0]), &min_neighbors(1));

    assert_eq!(vertices.num_vertices(), 2);
    assert_eq!(vertices.track_vertices(), &[0, 0, 0, 1, 1]);
    assert_eq!(vertices.weights(), &[3.0, 8.0]);
    assert_eq!(vertices.order(), &[0, 1]);
}

#[test]
fn test_two_groups_heavier_first() {
    let vertices = run(&two_groups([5.0, 5.0, 5.0, 1.0, 1.0]), &min_neighbors(1));

    assert_eq!(vertices.weights(), &[15.0, 2.0]);
    assert_eq!(vertices.order(), &[1, 0]);
}

#[test]
fn test_pair_below_min_neighbors_is_noise() {
    // With two required neighbors the isolated pair has no core track.
    let vertices = run(&two_groups([1.0, 1.0, 1.0, 4.0, 4.0]), &min_neighbors(2));

    assert_eq!(vertices.num_vertices(), 1);
    assert_eq!(vertices.track_vertices(), &[0, 0, 0, NOISE, NOISE]);
    assert_eq!(vertices.order(), &[0]);
    assert_eq!(vertices.ndof(), &[2, 2, 2, 1, 1]);
}

#[test]
fn test_isolated_tracks_are_noise() {
    let vertices = run(&at(&[-3.0, -1.0, 0.0, 1.5, 4.0]), &VertexConfig::default());

    assert_eq!(vertices.num_vertices(), 0);
    assert!(vertices.order().is_empty());
    assert!(vertices.weights().is_empty());
    assert!(vertices.track_vertices().iter().all(|&v| v == NOISE));
}

#[test]
fn test_single_track() {
    let vertices = run(&at(&[0.3]), &min_neighbors(1));
    assert_eq!(vertices.num_vertices(), 0);
    assert_eq!(vertices.track_vertices(), &[NOISE]);
}

#[test]
fn test_single_vertex_order() {
    let vertices = run(&at(&[2.0, 2.01, 2.02, 2.03]), &VertexConfig::default());
    assert_eq!(vertices.num_vertices(), 1);
    assert_eq!(vertices.order(), &[0]);
    assert_eq!(vertices.weights(), &[4.0]);
}

#[test]
fn test_equal_weights_keep_id_order() {
    let tracks = at(&[-1.0, -0.99, -0.98, 1.0, 1.01, 1.02, 3.0, 3.01, 3.02]);
    let vertices = run(&tracks, &VertexConfig::default());
    assert_eq!(vertices.weights(), &[3.0, 3.0, 3.0]);
    assert_eq!(vertices.order(), &[0, 1, 2]);
}

#[test]
fn test_chain_links_distant_tracks() {
    // Steps of 0.05: each track sees only its direct neighbors.
    let zs: Vec<f32> = (0..21).map(|k| k as f32 * 0.05).collect();
    let tracks = at(&zs);

    // The end tracks have a single neighbor and fail the default chi2 gate.
    let vertices = run(&tracks, &VertexConfig::default());
    assert_eq!(vertices.num_vertices(), 1);
    let ids = vertices.track_vertices();
    assert_eq!((ids[0], ids[20]), (NOISE, NOISE));
    assert!(ids[1..20].iter().all(|&v| v == 0));

    let loose = VertexConfig {
        chi2max: 100.0,
        ..Default::default()
    };
    let vertices = run(&tracks, &loose);
    assert!(vertices.track_vertices().iter().all(|&v| v == 0));
    assert_eq!(vertices.ndof()[0], 1);
    assert_eq!(vertices.ndof()[10], 2);
}

#[test]
fn test_coincident_tracks() {
    let vertices = run(&at(&[0.5, 0.5, 0.5]), &VertexConfig::default());
    assert_eq!(vertices.num_vertices(), 1);
    assert_eq!(vertices.track_vertices(), &[0, 0, 0]);
}

#[test]
fn test_coincident_cores_join_their_neighbor() {
    // Equal z is ordered by index, so the two tracks at 1.0 do not stay
    // separate roots.
    let vertices = run(&at(&[1.0, 1.0, 1.01]), &VertexConfig::default());
    assert_eq!(vertices.num_vertices(), 1);
    assert_eq!(vertices.track_vertices(), &[0, 0, 0]);
}

#[test]
fn test_edge_track_chi2_gate() {
    // Track 3 sees only track 2, 0.065 away.
    let tracks = at(&[0.0, 0.01, 0.02, 0.085]);

    let strict = run(&tracks, &VertexConfig::default());
    assert_eq!(strict.track_vertices(), &[0, 0, 0, NOISE]);
    assert_eq!(strict.ndof()[3], 1);

    let loose = run(
        &tracks,
        &VertexConfig {
            chi2max: 100.0,
            ..Default::default()
        },
    );
    assert_eq!(loose.track_vertices(), &[0, 0, 0, 0]);
    assert_eq!(loose.weights(), &[4.0]);
}

#[test]
fn test_poorly_measured_track_attaches_as_edge() {
    let tracks = vec![
        Track::new(0.00, EZ2, 1.0),
        Track::new(0.01, EZ2, 1.0),
        Track::new(0.02, 1.0, 1.0),
    ];
    let vertices = run(&tracks, &VertexConfig::default());

    // Track 2 never seeds but still counts as a neighbor.
    assert_eq!(vertices.ndof(), &[2, 2, 0]);
    assert_eq!(vertices.track_vertices(), &[0, 0, 0]);
    assert_eq!(vertices.weights(), &[3.0]);
}

#[test]
fn test_tracks_beyond_histogram_range() {
    let tracks = at(&[20.0, 20.01, 20.02, 30.0, 30.01, 30.02, -25.0, -25.01, -25.02]);
    let vertices = run(&tracks, &VertexConfig::default());

    assert_eq!(vertices.num_vertices(), 3);
    let v = vertices.track_vertices();
    assert!(v[0] == v[1] && v[1] == v[2]);
    assert!(v[3] == v[4] && v[4] == v[5]);
    assert!(v[6] == v[7] && v[7] == v[8]);
    assert!(v[0] != v[3] && v[0] != v[6] && v[3] != v[6]);
}

#[test]
fn test_dispatch_does_not_change_result() {
    let tracks = two_groups([1.0, 2.0, 3.0, 4.0, 5.0]);
    let serial = run(
        &tracks,
        &VertexConfig {
            min_neighbors: 1,
            dispatch: Dispatch::Serial,
            ..Default::default()
        },
    );
    let parallel = run(
        &tracks,
        &VertexConfig {
            min_neighbors: 1,
            dispatch: Dispatch::Parallel,
            ..Default::default()
        },
    );
    assert_eq!(serial.track_vertices(), parallel.track_vertices());
    assert_eq!(serial.weights(), parallel.weights());
    assert_eq!(serial.order(), parallel.order());
}
