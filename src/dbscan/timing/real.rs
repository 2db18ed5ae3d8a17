use super::Pass;
use std::time::{Duration, Instant};

/// Timer that tracks elapsed time when timing is enabled.
pub struct Timer(Instant);

impl Timer {
    #[inline]
    pub fn start() -> Self {
        Self(Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Wall time spent in each pass of one event.
#[derive(Debug, Clone, Default)]
pub struct PassTimings {
    pub index: Duration,
    pub neighbors: Duration,
    pub cores: Duration,
    pub chains: Duration,
    pub labels: Duration,
    pub edges: Duration,
    pub sort: Duration,
    pub verify: Duration,
}

impl PassTimings {
    pub fn total(&self) -> Duration {
        self.index
            + self.neighbors
            + self.cores
            + self.chains
            + self.labels
            + self.edges
            + self.sort
            + self.verify
    }

    pub fn report(&self, n_tracks: usize, n_vertices: usize) {
        let total = self.total();
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        let pct = |d: Duration| {
            if total.is_zero() {
                0.0
            } else {
                d.as_secs_f64() / total.as_secs_f64() * 100.0
            }
        };

        log::debug!(
            "timing tracks={} vertices={} total={:.3}ms",
            n_tracks,
            n_vertices,
            ms(total)
        );
        for (name, d) in [
            ("index", self.index),
            ("neighbors", self.neighbors),
            ("cores", self.cores),
            ("chains", self.chains),
            ("labels", self.labels),
            ("edges", self.edges),
            ("sort", self.sort),
            ("verify", self.verify),
        ] {
            log::debug!("  {:<10} {:7.3}ms ({:4.1}%)", name, ms(d), pct(d));
        }
    }
}

#[derive(Default)]
pub struct TimingBuilder {
    timings: PassTimings,
}

impl TimingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pass: Pass, d: Duration) {
        let slot = match pass {
            Pass::Index => &mut self.timings.index,
            Pass::Neighbors => &mut self.timings.neighbors,
            Pass::Cores => &mut self.timings.cores,
            Pass::Chains => &mut self.timings.chains,
            Pass::Labels => &mut self.timings.labels,
            Pass::Edges => &mut self.timings.edges,
            Pass::Sort => &mut self.timings.sort,
            Pass::Verify => &mut self.timings.verify,
        };
        *slot += d;
    }

    pub fn finish(self) -> PassTimings {
        self.timings
    }
}
