//! Stage mass fractions and delta-v budgets for inline and pop-out vehicles.
//!
//! Every stage is sized either from a mass (kg) or from a length (m) at a 1 m diameter.
//! The resulting weights are grouped into burns according to a [`StagingLayout`] and fed
//! through the ideal rocket equation.

pub mod layout;
pub mod result;

use log::debug;
use serde::{Deserialize, Serialize};
use staging_core::PhysicalConstants;
use staging_core::constants::DEFAULT_DIAMETER_M;
use thiserror::Error;

pub use layout::{Burn, StageMass, StagingLayout};
pub use result::StageResult;

/// Errors raised by the staging calculator.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("invalid input `{field}`: {reason}")]
    Input { field: String, reason: String },
    #[error("stage {stage} is infeasible: mass fraction {mass_fraction} must exceed 1")]
    Domain { stage: usize, mass_fraction: f64 },
}

/// How per-stage magnitudes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Magnitudes are stage masses in kilograms.
    Mass,
    /// Magnitudes are stage lengths in metres at the default diameter.
    #[default]
    Length,
}

impl InputMode {
    /// Only the exact flag `"mass"` selects mass mode; anything else, including no flag, is length mode.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("mass") => InputMode::Mass,
            _ => InputMode::Length,
        }
    }
}

/// Propellant-sized weight (lb) of one stage before any payload is attached.
pub fn stage_weight_lbs(constants: &PhysicalConstants, magnitude: f64, mode: InputMode) -> f64 {
    match mode {
        InputMode::Mass => constants.mass_weight_lbs(magnitude),
        InputMode::Length => constants.cylinder_weight_lbs(magnitude, DEFAULT_DIAMETER_M),
    }
}

/// Launch weights and burnout masses for each stage of `layout`.
pub fn stage_masses(
    constants: &PhysicalConstants,
    layout: StagingLayout,
    weights_lbs: &[f64],
) -> Vec<StageMass> {
    weights_lbs
        .iter()
        .enumerate()
        .map(|(index, weight)| layout.stage_mass(constants, index, *weight))
        .collect()
}

/// Run the mass-fraction chain and rocket equation over already-sized stages.
///
/// The first burn is charged the fixed gravity loss. Infeasible burns are reported as-is
/// (negative or NaN delta-v); use [`StageResult::validate`] to turn them into errors.
pub fn evaluate(
    constants: &PhysicalConstants,
    layout: StagingLayout,
    stages: &[StageMass],
) -> StageResult {
    let v_eq = constants.exhaust_velocity();
    let mass_fractions: Vec<f64> = layout
        .burns(stages)
        .iter()
        .map(Burn::mass_fraction)
        .collect();
    let mut stage_delta_vs: Vec<f64> = mass_fractions.iter().map(|mf| mf.ln() * v_eq).collect();
    if let Some(first) = stage_delta_vs.first_mut() {
        *first -= constants.first_stage_burn_loss();
    }
    let delta_v = stage_delta_vs.iter().sum();

    StageResult {
        delta_v,
        stage_delta_vs,
        mass_fractions,
    }
}

/// Three-stage inline stack, `stages` ordered from the first stage to burn.
pub fn compute_three_stage(
    constants: &PhysicalConstants,
    stages: [f64; 3],
    mode: InputMode,
) -> Result<StageResult, StagingError> {
    check_magnitudes(&["stage1", "stage2", "stage3"], &stages)?;
    let result = compute(constants, StagingLayout::InlineStack, &stages, mode);
    debug!(
        "three-stage {:?} {:?}: delta_v = {:.3} m/s, mass fractions = {:?}",
        mode, stages, result.delta_v, result.mass_fractions
    );
    Ok(result)
}

/// Pop-out configuration: core plus two boosters, burning with all three attached first.
pub fn compute_pop_out(
    constants: &PhysicalConstants,
    core: f64,
    booster1: f64,
    booster2: f64,
    mode: InputMode,
) -> Result<StageResult, StagingError> {
    let stages = [core, booster1, booster2];
    check_magnitudes(&["core", "booster1", "booster2"], &stages)?;
    let result = compute(constants, StagingLayout::PopOut, &stages, mode);
    debug!(
        "pop-out {:?} {:?}: delta_v = {:.3} m/s, mass fractions = {:?}",
        mode, stages, result.delta_v, result.mass_fractions
    );
    Ok(result)
}

/// Pop-out configuration that omits absent (zero-sized) boosters from the burn sequence.
///
/// No boosters gives a single core burn, one booster gives core+booster then core, and two
/// boosters match [`compute_pop_out`].
pub fn compute_pop_out_adaptive(
    constants: &PhysicalConstants,
    core: f64,
    booster1: f64,
    booster2: f64,
    mode: InputMode,
) -> Result<StageResult, StagingError> {
    check_magnitudes(&["core", "booster1", "booster2"], &[core, booster1, booster2])?;
    let mut stages = vec![core];
    stages.extend([booster1, booster2].into_iter().filter(|b| *b > 0.0));
    let result = compute(constants, StagingLayout::PopOut, &stages, mode);
    debug!(
        "adaptive pop-out with {} booster(s): delta_v = {:.3} m/s",
        stages.len() - 1,
        result.delta_v
    );
    Ok(result)
}

fn compute(
    constants: &PhysicalConstants,
    layout: StagingLayout,
    magnitudes: &[f64],
    mode: InputMode,
) -> StageResult {
    let weights: Vec<f64> = magnitudes
        .iter()
        .map(|m| stage_weight_lbs(constants, *m, mode))
        .collect();
    let stages = stage_masses(constants, layout, &weights);
    evaluate(constants, layout, &stages)
}

fn check_magnitudes(names: &[&str], values: &[f64]) -> Result<(), StagingError> {
    for (name, value) in names.iter().zip(values) {
        if !value.is_finite() {
            return Err(StagingError::Input {
                field: (*name).to_string(),
                reason: format!("expected a finite number, got {value}"),
            });
        }
    }
    Ok(())
}
