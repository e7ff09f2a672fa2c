//! Core units, constants, and shared primitives for the rocket staging workspace.

/// Physical and model constants. Lengths in metres, masses in kilograms unless stated otherwise.
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Inches per metre.
    pub const METERS_TO_INCHES: f64 = 39.370_078_740_2;
    /// Pounds per kilogram.
    pub const KG_TO_LBS: f64 = 2.20462;
    /// Rounded pounds-per-kilogram factor used when quoting whole-vehicle weights in kg.
    pub const LBS_PER_KG_ROUNDED: f64 = 2.205;
    /// Default propellant specific impulse (s).
    pub const DEFAULT_SPECIFIC_IMPULSE_S: f64 = 250.0;
    /// Default payload mass (kg).
    pub const DEFAULT_PAYLOAD_KG: f64 = 250.0;
    /// Propellant weight per cubic inch of stage volume (lb/in³).
    pub const PROPELLANT_DENSITY_LB_IN3: f64 = 0.04;
    /// Burnout mass as a share of launch weight.
    pub const STRUCTURAL_FRACTION: f64 = 0.22;
    /// First-stage burn duration charged as gravity loss (s).
    pub const FIRST_STAGE_BURN_S: f64 = 10.0;
    /// Stage diameter used whenever a caller supplies lengths only (m).
    pub const DEFAULT_DIAMETER_M: f64 = 1.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{KG_TO_LBS, LBS_PER_KG_ROUNDED, METERS_TO_INCHES};

    /// Convert metres to inches.
    #[inline]
    pub fn m_to_in(v: f64) -> f64 {
        v * METERS_TO_INCHES
    }

    /// Convert kilograms to pounds.
    #[inline]
    pub fn kg_to_lbs(v: f64) -> f64 {
        v * KG_TO_LBS
    }

    /// Convert pounds to kilograms with the rounded 2.205 factor.
    #[inline]
    pub fn lbs_to_kg_rounded(v: f64) -> f64 {
        v / LBS_PER_KG_ROUNDED
    }
}

use constants::{
    DEFAULT_PAYLOAD_KG, DEFAULT_SPECIFIC_IMPULSE_S, FIRST_STAGE_BURN_S, G0, KG_TO_LBS,
    METERS_TO_INCHES, PROPELLANT_DENSITY_LB_IN3,
};

/// Immutable constant set shared by every staging calculation.
///
/// Built once at startup and passed by reference; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub specific_impulse_s: f64,
    pub g: f64,
    pub meters_to_inches: f64,
    pub kg_to_lbs: f64,
    pub payload_lbs: f64,
}

impl PhysicalConstants {
    /// Constants for a given specific impulse and payload mass (kg).
    pub fn new(specific_impulse_s: f64, payload_kg: f64) -> Self {
        Self {
            specific_impulse_s,
            g: G0,
            meters_to_inches: METERS_TO_INCHES,
            kg_to_lbs: KG_TO_LBS,
            payload_lbs: payload_kg * KG_TO_LBS,
        }
    }

    /// Effective exhaust velocity `g × Isp` (m/s).
    #[inline]
    pub fn exhaust_velocity(&self) -> f64 {
        self.g * self.specific_impulse_s
    }

    /// Delta-v lost during the fixed first-stage burn (m/s).
    #[inline]
    pub fn first_stage_burn_loss(&self) -> f64 {
        self.g * FIRST_STAGE_BURN_S
    }

    /// Propellant weight (lb) of a cylindrical stage with a square-diameter cross section.
    pub fn cylinder_weight_lbs(&self, length_m: f64, diameter_m: f64) -> f64 {
        let diameter_in = diameter_m * self.meters_to_inches;
        PROPELLANT_DENSITY_LB_IN3 * (length_m * self.meters_to_inches) * diameter_in * diameter_in
    }

    /// Weight (lb) of a stage given directly as a mass (kg).
    #[inline]
    pub fn mass_weight_lbs(&self, mass_kg: f64) -> f64 {
        mass_kg * self.kg_to_lbs
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIFIC_IMPULSE_S, DEFAULT_PAYLOAD_KG)
    }
}
