//! Stage layouts: where the payload rides and which masses leave at each separation.

use serde::{Deserialize, Serialize};
use staging_core::PhysicalConstants;
use staging_core::constants::STRUCTURAL_FRACTION;

/// Physical arrangement of the stages, outermost (first to burn) stage first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingLayout {
    /// Inline stack. Each separation drops the spent outer stage; every stage weight carries the payload.
    InlineStack,
    /// Core plus radially separating boosters. Only the core carries the payload and the
    /// burn sequence sheds the last listed booster first.
    PopOut,
}

/// Launch weight and burnout mass of one stage (lb).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageMass {
    pub launch_weight_lbs: f64,
    pub final_mass_lbs: f64,
}

/// Initial and final vehicle mass across one burn (lb).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burn {
    pub initial_lbs: f64,
    pub final_lbs: f64,
}

impl Burn {
    /// `m0 / mf` for this burn.
    #[inline]
    pub fn mass_fraction(&self) -> f64 {
        self.initial_lbs / self.final_lbs
    }
}

impl StagingLayout {
    /// Whether the stage at `index` carries the payload in its weight and burnout mass.
    pub fn carries_payload(&self, index: usize) -> bool {
        match self {
            StagingLayout::InlineStack => true,
            StagingLayout::PopOut => index == 0,
        }
    }

    /// Launch weight and burnout mass for a stage whose propellant-sized weight is `weight_lbs`.
    pub fn stage_mass(
        &self,
        constants: &PhysicalConstants,
        index: usize,
        weight_lbs: f64,
    ) -> StageMass {
        let payload = if self.carries_payload(index) {
            constants.payload_lbs
        } else {
            0.0
        };
        let launch_weight_lbs = weight_lbs + payload;
        StageMass {
            launch_weight_lbs,
            final_mass_lbs: launch_weight_lbs * STRUCTURAL_FRACTION + payload,
        }
    }

    /// Group stage masses into the burn sequence for this layout.
    pub fn burns(&self, stages: &[StageMass]) -> Vec<Burn> {
        match self {
            StagingLayout::InlineStack => (0..stages.len())
                .map(|k| {
                    let above: f64 = stages[k + 1..].iter().map(|s| s.launch_weight_lbs).sum();
                    Burn {
                        initial_lbs: stages[k].launch_weight_lbs + above,
                        final_lbs: stages[k].final_mass_lbs + above,
                    }
                })
                .collect(),
            StagingLayout::PopOut => (1..=stages.len())
                .rev()
                .map(|attached| {
                    let attached = &stages[..attached];
                    Burn {
                        initial_lbs: attached.iter().map(|s| s.launch_weight_lbs).sum(),
                        final_lbs: attached.iter().map(|s| s.final_mass_lbs).sum(),
                    }
                })
                .collect(),
        }
    }
}
