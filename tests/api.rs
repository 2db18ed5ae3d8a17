//! Public API integration tests for zvertex.

mod support;

use support::events::{at, permutation, separated_vertices, EZ2};
use zvertex::{
    find_vertices, find_vertices_with, Dispatch, Track, VertexConfig, VertexError, VertexFinder,
    MAX_TRACKS, NOISE,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Weight of the vertex each track belongs to (0 for noise).
fn vertex_weight_per_track(vertices: &zvertex::ZVertices) -> Vec<f32> {
    (0..vertices.num_tracks())
        .map(|k| vertices.vertex_of(k).map_or(0.0, |v| vertices.weights()[v]))
        .collect()
}

#[test]
fn test_find_vertices_basic() {
    init_logs();
    let event = separated_vertices(5, 6, 0.5, 0.02, 12345);
    let output = find_vertices(&event.tracks).expect("find should succeed");

    assert_eq!(output.vertices.num_vertices(), 5);
    assert_eq!(output.vertices.num_tracks(), event.tracks.len());
    assert_eq!(output.diagnostics.num_tracks, event.tracks.len());
    assert_eq!(output.diagnostics.noise_tracks, 0);
    assert_eq!(output.diagnostics.proto_vertices, 5);
}

#[test]
fn test_empty_input() {
    let tracks: Vec<Track> = Vec::new();
    let output = find_vertices(&tracks).expect("empty input is valid");
    assert_eq!(output.vertices.num_vertices(), 0);
    assert!(output.vertices.order().is_empty());
    assert!(output.vertices.track_vertices().is_empty());
}

#[test]
fn test_too_many_tracks() {
    let tracks = vec![Track::new(0.0, EZ2, 1.0); MAX_TRACKS + 1];
    let result = find_vertices(&tracks);
    assert!(matches!(result, Err(VertexError::TooManyTracks(n)) if n == MAX_TRACKS + 1));
}

#[test]
fn test_full_capacity_is_accepted() {
    // Spread evenly so neighbor lists stay short.
    let tracks: Vec<Track> = (0..MAX_TRACKS)
        .map(|i| Track::new(-12.0 + i as f32 * (24.0 / MAX_TRACKS as f32), EZ2, 1.0))
        .collect();
    let output = find_vertices(&tracks).expect("capacity is inclusive");
    assert_eq!(output.vertices.num_tracks(), MAX_TRACKS);
    assert!(zvertex::validation::validate(&tracks, &output.vertices).is_valid());
}

#[test]
fn test_soa_length_mismatch() {
    let mut finder = VertexFinder::new(VertexConfig::default()).unwrap();
    let result = finder.process_soa(&[0.0, 0.01], &[EZ2, EZ2], &[1.0]);
    assert_eq!(
        result,
        Err(VertexError::LengthMismatch {
            z: 2,
            ez2: 2,
            pt2: 1
        })
    );
}

#[test]
fn test_soa_matches_tracks() {
    let event = separated_vertices(4, 5, 0.5, 0.02, 7);
    let z: Vec<f32> = event.tracks.iter().map(|t| t.z).collect();
    let ez2: Vec<f32> = event.tracks.iter().map(|t| t.ez2).collect();
    let pt2: Vec<f32> = event.tracks.iter().map(|t| t.pt2).collect();

    let mut finder = VertexFinder::new(VertexConfig::default()).unwrap();
    finder.process_soa(&z, &ez2, &pt2).unwrap();
    let soa = finder.take_vertices();
    finder.process(&event.tracks).unwrap();

    assert_eq!(soa.track_vertices(), finder.vertices().track_vertices());
    assert_eq!(soa.weights(), finder.vertices().weights());
    assert_eq!(soa.order(), finder.vertices().order());
}

#[test]
fn test_invalid_config_rejected() {
    let config = VertexConfig {
        min_neighbors: 0,
        ..Default::default()
    };
    assert!(matches!(
        VertexFinder::new(config.clone()),
        Err(VertexError::InvalidConfig {
            field: "min_neighbors",
            ..
        })
    ));
    assert!(find_vertices_with(&at(&[0.0]), &config).is_err());
}

#[test]
fn test_invalid_origin() {
    let tracks = at(&[0.0, 0.01, 0.02]);
    let mut finder = VertexFinder::new(VertexConfig::default()).unwrap();

    let repeated = finder.process_with_origin(&tracks, &[0, 1, 1]);
    assert!(matches!(repeated, Err(VertexError::InvalidOrigin(_))));

    let short = finder.process_with_origin(&tracks, &[0, 1]);
    assert!(matches!(short, Err(VertexError::InvalidOrigin(_))));

    let out_of_range = finder.process_with_origin(&tracks, &[0, 1, 3]);
    assert!(matches!(out_of_range, Err(VertexError::InvalidOrigin(_))));
}

#[test]
fn test_origin_remaps_per_track_outputs() {
    init_logs();
    let upstream = separated_vertices(6, 5, 0.5, 0.02, 99).tracks;
    let n = upstream.len();
    let origin = permutation(n, 5);
    let working: Vec<Track> = origin.iter().map(|&o| upstream[o as usize]).collect();

    let mut finder = VertexFinder::new(VertexConfig::default()).unwrap();
    finder.process(&upstream).unwrap();
    let direct = finder.take_vertices();
    finder.process_with_origin(&working, &origin).unwrap();
    let remapped = finder.vertices();

    assert_eq!(remapped.num_tracks(), n);
    assert_eq!(remapped.num_vertices(), direct.num_vertices());
    assert_eq!(
        vertex_weight_per_track(remapped),
        vertex_weight_per_track(&direct)
    );
    for a in 0..n {
        for b in 0..n {
            assert_eq!(
                direct.vertex_of(a) == direct.vertex_of(b),
                remapped.vertex_of(a) == remapped.vertex_of(b),
                "tracks {} and {}",
                a,
                b
            );
        }
    }
    assert!(zvertex::validation::validate(&upstream, remapped).is_valid());
}

#[test]
fn test_finder_reuse_across_events() {
    let config = VertexConfig {
        dispatch: Dispatch::Serial,
        ..Default::default()
    };
    let mut finder = VertexFinder::new(config.clone()).unwrap();
    assert_eq!(finder.config(), &config);

    finder.process(&separated_vertices(8, 5, 0.5, 0.02, 1).tracks).unwrap();
    assert_eq!(finder.vertices().num_vertices(), 8);
    assert_eq!(finder.workspace().num_clusters(), 8);

    let small = at(&[3.0, 3.01, 3.02]);
    finder.process(&small).unwrap();
    assert_eq!(finder.vertices().num_vertices(), 1);
    assert_eq!(finder.vertices().num_tracks(), 3);
    assert_eq!(finder.vertices().track_vertices(), &[0, 0, 0]);
    assert_eq!(finder.workspace().num_tracks(), 3);
    assert_eq!(finder.workspace().num_clusters(), 1);

    finder.process(&at(&[])).unwrap();
    assert_eq!(finder.vertices().num_vertices(), 0);
    assert_eq!(finder.workspace().num_clusters(), 0);
    assert_eq!(finder.vertices().num_tracks(), 0);
}

#[test]
fn test_flat_buffer_input() {
    let flat = [0.0, EZ2, 1.0, 0.01, EZ2, 2.0, 0.02, EZ2, 3.0];
    let tracks = Track::slice_from_flat(&flat).expect("multiple of three floats");
    assert_eq!(tracks.len(), 3);

    let output = find_vertices(tracks).unwrap();
    assert_eq!(output.vertices.weights(), &[6.0]);

    assert!(matches!(
        Track::slice_from_flat(&flat[..4]),
        Err(VertexError::Layout(_))
    ));
}

#[test]
fn test_tuple_and_array_input() {
    let arrays = [[0.0, EZ2, 1.0], [0.01, EZ2, 1.0], [0.02, EZ2, 1.0]];
    let tuples: Vec<(f32, f32, f32)> = arrays.iter().map(|a| (a[0], a[1], a[2])).collect();
    let a = find_vertices(&arrays).unwrap();
    let b = find_vertices(&tuples).unwrap();
    assert_eq!(a.vertices.track_vertices(), b.vertices.track_vertices());
    assert_eq!(a.vertices.num_vertices(), 1);
}

#[test]
fn test_config_from_json() {
    let config = VertexConfig::from_json(r#"{ "min_neighbors": 1, "dispatch": "serial" }"#)
        .expect("partial document");
    assert_eq!(config.min_neighbors, 1);
    assert_eq!(config.dispatch, Dispatch::Serial);
    assert_eq!(config.eps, VertexConfig::default().eps);

    assert!(matches!(
        VertexConfig::from_json(r#"{ "eps": 0.5 }"#),
        Err(VertexError::InvalidConfig { field: "eps", .. })
    ));
    assert!(matches!(
        VertexConfig::from_json("{ not json"),
        Err(VertexError::Parse(_))
    ));
}

#[test]
fn test_vertex_views() {
    let tracks = vec![
        Track::new(-1.00, EZ2, 1.0),
        Track::new(-0.99, EZ2, 1.0),
        Track::new(-0.98, EZ2, 1.0),
        Track::new(2.00, EZ2, 5.0),
        Track::new(2.01, EZ2, 5.0),
        Track::new(2.02, EZ2, 5.0),
        Track::new(7.00, EZ2, 9.0),
    ];
    let output = find_vertices(&tracks).unwrap();
    let vertices = &output.vertices;
    assert_eq!(vertices.num_vertices(), 2);
    assert_eq!(vertices.vertex_of(6), None);
    assert_eq!(vertices.track_vertices()[6], NOISE);

    let heaviest = vertices.iter_by_weight_desc().next().unwrap();
    assert_eq!(heaviest.weight, 15.0);
    assert_eq!(heaviest.tracks().collect::<Vec<_>>(), vec![3, 4, 5]);

    let weights: Vec<f32> = vertices.iter_by_weight().map(|v| v.weight).collect();
    assert_eq!(weights, vec![3.0, 15.0]);
    assert_eq!(vertices.vertex(0).num_tracks(), 3);
}
