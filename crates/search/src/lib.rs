//! Exhaustive length-ratio search for three-stage inline vehicles.
//!
//! The search enumerates every split of a fixed vehicle length on a discretised ratio grid,
//! sizes each split as a length-mode inline stack and ranks the splits by total delta-v.

pub mod envelope;
pub mod grid;

use std::cmp::Ordering;

use log::{debug, info};
use serde::Serialize;
use staging_core::PhysicalConstants;
use staging_vehicle::{StageResult, StagingLayout};
use thiserror::Error;

pub use envelope::{
    DEFAULT_ENVELOPE_SAMPLES, DEFAULT_STRUCTURAL_RANGES, FractionRange, LaunchWeight,
    MassFractionEnvelope, StageEnvelope, mass_fraction_envelope, reference_launch_weight,
};
pub use grid::{RatioCandidate, RatioGrid};

/// Vehicle dimensions and grid used by a ratio search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    pub grid: RatioGrid,
    pub total_length_m: f64,
    pub diameter_m: f64,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            grid: RatioGrid::default(),
            total_length_m: 10.0,
            diameter_m: 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("ratio grid needs at least two points, got {0}")]
    TooFewPoints(usize),
    #[error("ratio grid start {start} must be positive and below stop {stop}")]
    InvalidRange { start: f64, stop: f64 },
    #[error("vehicle {0} must be a positive finite number")]
    InvalidDimension(&'static str),
}

/// One evaluated split with its position in the ranking (1 = best).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate: RatioCandidate,
    pub stage_lengths_m: [f64; 3],
    pub result: StageResult,
}

impl RankedCandidate {
    pub fn is_feasible(&self) -> bool {
        self.result.is_feasible()
    }
}

/// All candidates of a search, best total delta-v first.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub ranked: Vec<RankedCandidate>,
}

impl SearchOutcome {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }

    /// The `n` best candidates (fewer if the search produced fewer).
    pub fn top(&self, n: usize) -> &[RankedCandidate] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn infeasible_count(&self) -> usize {
        self.ranked.iter().filter(|c| !c.is_feasible()).count()
    }
}

/// Enumerate, evaluate and rank every split on the request's grid.
///
/// Ties keep grid order. Candidates with a NaN total sort after every number.
pub fn run(
    constants: &PhysicalConstants,
    request: &SearchRequest,
) -> Result<SearchOutcome, SearchError> {
    validate(request)?;

    let candidates = request.grid.candidates();
    debug!(
        "evaluating {} ratio candidates on a {}-point grid",
        candidates.len(),
        request.grid.points
    );

    let mut evaluated: Vec<(RatioCandidate, [f64; 3], StageResult)> = candidates
        .into_iter()
        .map(|candidate| {
            let lengths = candidate.stage_lengths(request.total_length_m);
            let result = evaluate_lengths(constants, &lengths, request.diameter_m);
            (candidate, lengths, result)
        })
        .collect();

    evaluated.sort_by(|a, b| descending_delta_v(a.2.delta_v, b.2.delta_v));

    let ranked: Vec<RankedCandidate> = evaluated
        .into_iter()
        .enumerate()
        .map(|(idx, (candidate, stage_lengths_m, result))| RankedCandidate {
            rank: idx + 1,
            candidate,
            stage_lengths_m,
            result,
        })
        .collect();

    let outcome = SearchOutcome { ranked };
    if let Some(best) = outcome.best() {
        info!(
            "best split {:.4}/{:.4}/{:.4}: delta_v = {:.3} m/s ({} of {} candidates infeasible)",
            best.candidate.r1,
            best.candidate.r2,
            best.candidate.r3,
            best.result.delta_v,
            outcome.infeasible_count(),
            outcome.len()
        );
    }
    Ok(outcome)
}

fn evaluate_lengths(
    constants: &PhysicalConstants,
    lengths: &[f64; 3],
    diameter_m: f64,
) -> StageResult {
    let layout = StagingLayout::InlineStack;
    let weights: Vec<f64> = lengths
        .iter()
        .map(|l| constants.cylinder_weight_lbs(*l, diameter_m))
        .collect();
    let stages = staging_vehicle::stage_masses(constants, layout, &weights);
    staging_vehicle::evaluate(constants, layout, &stages)
}

fn descending_delta_v(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

fn validate(request: &SearchRequest) -> Result<(), SearchError> {
    let grid = &request.grid;
    if grid.points < 2 {
        return Err(SearchError::TooFewPoints(grid.points));
    }
    if !(grid.start > 0.0 && grid.start < grid.stop && grid.stop.is_finite()) {
        return Err(SearchError::InvalidRange {
            start: grid.start,
            stop: grid.stop,
        });
    }
    if !(request.total_length_m.is_finite() && request.total_length_m > 0.0) {
        return Err(SearchError::InvalidDimension("total length"));
    }
    if !(request.diameter_m.is_finite() && request.diameter_m > 0.0) {
        return Err(SearchError::InvalidDimension("diameter"));
    }
    Ok(())
}
