//! Zero-cost pass timing.
//!
//! With the `timing` feature, per-pass durations are collected and reported
//! through `log::debug!`. Without it, all types are zero-sized and every
//! method compiles away.

/// Pipeline pass being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Index,
    Neighbors,
    Cores,
    Chains,
    Labels,
    Edges,
    Sort,
    Verify,
}

#[cfg(feature = "timing")]
mod real;
#[cfg(not(feature = "timing"))]
mod stub;

#[cfg(feature = "timing")]
pub use real::*;
#[cfg(not(feature = "timing"))]
pub use stub::*;
