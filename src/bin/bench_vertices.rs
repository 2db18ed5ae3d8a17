//! Benchmark vertex finding on synthetic events.
//!
//! Run with: cargo run --release --bin bench_vertices
//!
//! Usage:
//!   bench_vertices                   Default event (10k tracks, 200 vertices)
//!   bench_vertices --tracks 30k      Larger events
//!   bench_vertices --serial          Run every pass on the calling thread
//!   bench_vertices --config cfg.json Clustering parameters from a JSON file
//!
//! Per-pass timing (logged at debug level) needs: --features timing
//! together with RUST_LOG=zvertex=debug.

use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use zvertex::{Dispatch, Track, VertexConfig, VertexFinder, MAX_TRACKS};

fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('k') {
        (stripped, 1_000)
    } else {
        (s.as_str(), 1)
    };

    num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("Invalid number '{}': {}", s, e))
}

#[derive(Parser)]
#[command(name = "bench_vertices")]
#[command(about = "Benchmark zvertex on synthetic pile-up events")]
struct Args {
    /// Tracks per event (e.g., 5000, 10k, 32k)
    #[arg(long, value_parser = parse_count, default_value = "10k")]
    tracks: usize,

    /// Number of generated vertices per event
    #[arg(long, default_value_t = 200)]
    vertices: usize,

    /// Number of timed events
    #[arg(short = 'n', long, default_value_t = 20)]
    samples: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Force serial dispatch
    #[arg(long)]
    serial: bool,

    /// JSON file with clustering parameters
    #[arg(long)]
    config: Option<String>,
}

/// Vertices spread uniformly over the luminous region, tracks smeared by
/// their own uncertainty, and a fraction of unassociated pile-up.
fn generate_event<R: Rng>(n_tracks: usize, n_vertices: usize, rng: &mut R) -> Vec<Track> {
    let centers: Vec<f32> = (0..n_vertices.max(1))
        .map(|_| rng.gen_range(-12.0..12.0))
        .collect();
    (0..n_tracks)
        .map(|_| {
            let ez: f32 = rng.gen_range(0.002..0.012);
            let pt2: f32 = rng.gen_range(0.5f32..10.0).powi(2);
            let z = if rng.gen_bool(0.1) {
                rng.gen_range(-12.5..12.5)
            } else {
                let c = centers[rng.gen_range(0..centers.len())];
                c + rng.gen_range(-2.0 * ez..2.0 * ez)
            };
            Track::new(z, ez * ez, pt2)
        })
        .collect()
}

struct Stats {
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

fn compute_stats(samples: &[f64]) -> Stats {
    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };
    Stats {
        mean,
        std_dev: variance.sqrt(),
        min: samples.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
        max: samples.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
    }
}

fn load_config(args: &Args) -> VertexConfig {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("failed to read {}: {}", path, e));
            VertexConfig::from_json(&text).unwrap_or_else(|e| panic!("{}: {}", path, e))
        }
        None => VertexConfig::default(),
    };
    if args.serial {
        config.dispatch = Dispatch::Serial;
    }
    config
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args);

    if args.tracks > MAX_TRACKS {
        eprintln!(
            "{} tracks exceed the capacity of {}",
            args.tracks, MAX_TRACKS
        );
        std::process::exit(2);
    }
    if args.samples == 0 {
        eprintln!("--samples must be at least 1");
        std::process::exit(2);
    }

    let num_threads = rayon::current_num_threads();
    println!(
        "Benchmarking {} tracks / {} vertices, {} samples, dispatch {:?} ({} threads)",
        args.tracks, args.vertices, args.samples, config.dispatch, num_threads
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut finder = VertexFinder::new(config).expect("valid config");

    // Warmup
    let warmup = generate_event(args.tracks, args.vertices, &mut rng);
    finder.process(&warmup).expect("within capacity");

    let mut times = Vec::with_capacity(args.samples);
    let mut found = Vec::with_capacity(args.samples);
    let mut noise = 0usize;
    for _ in 0..args.samples {
        let tracks = generate_event(args.tracks, args.vertices, &mut rng);

        let start = Instant::now();
        let diagnostics = finder.process(&tracks).expect("within capacity");
        times.push(start.elapsed().as_secs_f64() * 1000.0);

        found.push(finder.vertices().num_vertices());
        noise += diagnostics.noise_tracks;

        #[cfg(debug_assertions)]
        {
            let report = zvertex::validation::validate(&tracks, finder.vertices());
            if !report.is_valid() {
                eprintln!("WARNING: validation failed: {:?}", report);
            }
        }
    }

    let stats = compute_stats(&times);
    let mean_found = found.iter().sum::<usize>() as f64 / found.len() as f64;
    let tracks_per_sec = args.tracks as f64 / (stats.mean / 1000.0);

    println!(
        "{:>12} {:>10} {:>10} {:>10} {:>12}",
        "Mean (ms)", "StdDev", "Min", "Max", "Tracks/s"
    );
    println!("{}", "-".repeat(58));
    println!(
        "{:>12.3} {:>10.3} {:>10.3} {:>10.3} {:>11.1}M",
        stats.mean,
        stats.std_dev,
        stats.min,
        stats.max,
        tracks_per_sec / 1_000_000.0
    );
    println!();
    println!(
        "Vertices per event: {:.1}, noise fraction: {:.3}",
        mean_found,
        noise as f64 / (args.tracks * args.samples) as f64
    );
}
