//! Discretised ratio axes and the candidate splits they produce.

use serde::{Deserialize, Serialize};

/// Slack allowed on `r1 + r2 <= 1` so boundary pairs survive floating-point rounding.
pub const RATIO_SUM_TOLERANCE: f64 = 1e-9;

/// Evenly spaced axis over `[start, stop]`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioGrid {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl Default for RatioGrid {
    fn default() -> Self {
        Self {
            start: 0.1,
            stop: 1.0,
            points: 100,
        }
    }
}

impl RatioGrid {
    /// Sample values along the axis. The final sample is exactly `stop`.
    pub fn axis(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.points)
    }

    /// All `(r1, r2, 1 - r1 - r2)` splits with `r1 + r2 <= 1`, in row-major axis order.
    pub fn candidates(&self) -> Vec<RatioCandidate> {
        let axis = self.axis();
        let mut out = Vec::new();
        for &r1 in &axis {
            for &r2 in &axis {
                if r1 + r2 > 1.0 + RATIO_SUM_TOLERANCE {
                    continue;
                }
                out.push(RatioCandidate {
                    r1,
                    r2,
                    r3: (1.0 - r1 - r2).max(0.0),
                });
            }
        }
        out
    }
}

/// Share of the total vehicle length given to each stage, first stage first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioCandidate {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
}

impl RatioCandidate {
    pub fn ratios(&self) -> [f64; 3] {
        [self.r1, self.r2, self.r3]
    }

    /// Absolute stage lengths for a vehicle of `total_length_m`.
    pub fn stage_lengths(&self, total_length_m: f64) -> [f64; 3] {
        self.ratios().map(|r| r * total_length_m)
    }
}

/// `points` evenly spaced samples over `[start, stop]`; the last sample is pinned to `stop`.
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
            values[points - 1] = stop;
            values
        }
    }
}
