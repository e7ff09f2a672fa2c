//! Staging results and feasibility checks.

use serde::{Deserialize, Serialize};

use crate::StagingError;

/// Delta-v budget of a staged vehicle, outermost stage first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    /// Total delta-v (m/s).
    pub delta_v: f64,
    /// Per-burn delta-v (m/s); sums to `delta_v`.
    pub stage_delta_vs: Vec<f64>,
    /// Per-burn `m0 / mf`, parallel to `stage_delta_vs`.
    pub mass_fractions: Vec<f64>,
}

impl StageResult {
    /// True when every burn has a finite mass fraction above one.
    pub fn is_feasible(&self) -> bool {
        self.first_infeasible().is_none()
    }

    /// Reject physically infeasible results instead of clamping them.
    pub fn validate(&self) -> Result<(), StagingError> {
        match self.first_infeasible() {
            Some((stage, mass_fraction)) => Err(StagingError::Domain {
                stage: stage + 1,
                mass_fraction,
            }),
            None => Ok(()),
        }
    }

    fn first_infeasible(&self) -> Option<(usize, f64)> {
        self.mass_fractions
            .iter()
            .copied()
            .enumerate()
            .find(|(_, mf)| !mf.is_finite() || *mf <= 1.0)
    }
}
