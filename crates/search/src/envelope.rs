//! Upper bounds on stage performance from structural-fraction sweeps.

use serde::Serialize;
use staging_core::PhysicalConstants;
use staging_core::units::lbs_to_kg_rounded;

use crate::grid::linspace;

/// Samples per structural-fraction sweep.
pub const DEFAULT_ENVELOPE_SAMPLES: usize = 50;

/// Inclusive range of burnout-to-launch mass ratios (`mf / m0`) for one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionRange {
    pub low: f64,
    pub high: f64,
}

/// Reference sweeps for the first, second and third stage.
pub const DEFAULT_STRUCTURAL_RANGES: [FractionRange; 3] = [
    FractionRange {
        low: 0.04,
        high: 0.12,
    },
    FractionRange {
        low: 0.045,
        high: 0.17,
    },
    FractionRange {
        low: 0.08,
        high: 0.101,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageEnvelope {
    pub max_mass_fraction: f64,
    pub max_delta_v_m_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassFractionEnvelope {
    pub stages: Vec<StageEnvelope>,
    /// Sum of the per-stage maxima (m/s).
    pub total_max_delta_v_m_s: f64,
}

/// Best mass fraction and delta-v each stage could reach across its structural-fraction sweep.
pub fn mass_fraction_envelope(
    constants: &PhysicalConstants,
    ranges: &[FractionRange],
    samples: usize,
) -> MassFractionEnvelope {
    let v_eq = constants.exhaust_velocity();
    let stages: Vec<StageEnvelope> = ranges
        .iter()
        .map(|range| {
            let max_mass_fraction = linspace(range.low, range.high, samples)
                .into_iter()
                .map(|fraction| 1.0 / fraction)
                .fold(f64::NEG_INFINITY, f64::max);
            StageEnvelope {
                max_mass_fraction,
                max_delta_v_m_s: max_mass_fraction.ln() * v_eq,
            }
        })
        .collect();
    let total_max_delta_v_m_s = stages.iter().map(|s| s.max_delta_v_m_s).sum();

    MassFractionEnvelope {
        stages,
        total_max_delta_v_m_s,
    }
}

/// Launch weight of a whole vehicle of the given size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchWeight {
    pub lbs: f64,
    pub kg: f64,
}

/// Propellant-sized launch weight of a single cylinder spanning the whole vehicle.
pub fn reference_launch_weight(
    constants: &PhysicalConstants,
    total_length_m: f64,
    diameter_m: f64,
) -> LaunchWeight {
    let lbs = constants.cylinder_weight_lbs(total_length_m, diameter_m);
    LaunchWeight {
        lbs,
        kg: lbs_to_kg_rounded(lbs),
    }
}
