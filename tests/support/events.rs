#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use zvertex::Track;

/// Nominal squared z uncertainty for generated tracks.
pub const EZ2: f32 = 5e-5;

/// A generated event: tracks plus the vertex each one was drawn from
/// (`None` for pile-up noise).
pub struct Event {
    pub tracks: Vec<Track>,
    pub truth: Vec<Option<usize>>,
    pub centers: Vec<f32>,
}

/// Vertices spaced `spacing` apart around z = 0, each with
/// `tracks_per_vertex` tracks within `spread` of its center.
///
/// Weights are small integers so summed weights are exact in f32.
pub fn separated_vertices(
    vertices: usize,
    tracks_per_vertex: usize,
    spacing: f32,
    spread: f32,
    seed: u64,
) -> Event {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = -0.5 * spacing * (vertices.saturating_sub(1)) as f32;
    let centers: Vec<f32> = (0..vertices).map(|v| start + v as f32 * spacing).collect();

    let mut tracks = Vec::with_capacity(vertices * tracks_per_vertex);
    let mut truth = Vec::with_capacity(vertices * tracks_per_vertex);
    for (v, &c) in centers.iter().enumerate() {
        for _ in 0..tracks_per_vertex {
            let z = c + rng.gen_range(-spread..spread);
            let pt2 = rng.gen_range(1..=8) as f32;
            tracks.push(Track::new(z, EZ2, pt2));
            truth.push(Some(v));
        }
    }
    Event {
        tracks,
        truth,
        centers,
    }
}

/// Add `count` isolated tracks halfway between neighboring vertices.
pub fn add_isolated_noise(event: &mut Event, count: usize, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let gaps = event.centers.len().saturating_sub(1);
    for k in 0..count.min(gaps) {
        let z = 0.5 * (event.centers[k] + event.centers[k + 1]);
        event.tracks.push(Track::new(z, EZ2, rng.gen_range(1..=8) as f32));
        event.truth.push(None);
    }
}

/// Shuffle track order, keeping `truth` aligned.
pub fn shuffle(event: &mut Event, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in (1..event.tracks.len()).rev() {
        let j = rng.gen_range(0..=i);
        event.tracks.swap(i, j);
        event.truth.swap(i, j);
    }
}

/// Uniform pile-up over `[-span, span)` with integer weights.
pub fn uniform_tracks(n: usize, span: f32, seed: u64) -> Vec<Track> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Track::new(
                rng.gen_range(-span..span),
                rng.gen_range(1e-5..2e-4),
                rng.gen_range(1..=8) as f32,
            )
        })
        .collect()
}

/// Tracks exactly at the given positions, nominal error and unit weight.
pub fn at(zs: &[f32]) -> Vec<Track> {
    zs.iter().map(|&z| Track::new(z, EZ2, 1.0)).collect()
}

/// A random permutation of `0..n`.
pub fn permutation(n: usize, seed: u64) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut perm: Vec<u16> = (0..n as u16).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        perm.swap(i, j);
    }
    perm
}
