//! Request/response contract of the `/optimize` endpoint.
//!
//! A request carries `mass1..mass6`, `length1..length6` and an optional `mode`. Fields 1-3
//! size the inline stack and fields 4-6 the pop-out core and boosters. Both configurations
//! are always computed, so all twelve numeric fields are required.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use staging_core::PhysicalConstants;
use staging_vehicle::{
    InputMode, StageResult, StagingError, compute_pop_out, compute_pop_out_adaptive,
    compute_three_stage,
};
use thiserror::Error;

/// Raw request body. Numeric fields accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeRequest {
    pub mass1: Option<Value>,
    pub mass2: Option<Value>,
    pub mass3: Option<Value>,
    pub mass4: Option<Value>,
    pub mass5: Option<Value>,
    pub mass6: Option<Value>,
    pub length1: Option<Value>,
    pub length2: Option<Value>,
    pub length3: Option<Value>,
    pub length4: Option<Value>,
    pub length5: Option<Value>,
    pub length6: Option<Value>,
    pub mode: Option<Value>,
}

const MASS_FIELDS: [&str; 6] = ["mass1", "mass2", "mass3", "mass4", "mass5", "mass6"];
const LENGTH_FIELDS: [&str; 6] = [
    "length1", "length2", "length3", "length4", "length5", "length6",
];
const STAGE_SLOTS: [&str; 6] = ["stage1", "stage2", "stage3", "core", "booster1", "booster2"];

/// Parsed request with every field checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagingInputs {
    pub masses_kg: [f64; 6],
    pub lengths_m: [f64; 6],
    pub mode: InputMode,
}

impl StagingInputs {
    /// Magnitudes selected by the mode, stages 1-6.
    pub fn magnitudes(&self) -> [f64; 6] {
        match self.mode {
            InputMode::Mass => self.masses_kg,
            InputMode::Length => self.lengths_m,
        }
    }

    /// Request field that feeds the calculator slot `slot` under the current mode.
    fn request_field(&self, slot: &str) -> Option<&'static str> {
        let index = STAGE_SLOTS.iter().position(|s| *s == slot)?;
        Some(match self.mode {
            InputMode::Mass => MASS_FIELDS[index],
            InputMode::Length => LENGTH_FIELDS[index],
        })
    }

    /// Rename calculator slots in input errors to the request fields the caller sent.
    fn with_request_field(&self, err: StagingError) -> StagingError {
        match err {
            StagingError::Input { field, reason } => StagingError::Input {
                field: self
                    .request_field(&field)
                    .map(str::to_string)
                    .unwrap_or(field),
                reason,
            },
            other => other,
        }
    }
}

/// Burn sequence used for the pop-out configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopOutSequence {
    /// Always three burns: all attached, core plus first booster, core alone.
    #[default]
    Full,
    /// Zero-sized boosters are left out of the sequence.
    Adaptive,
}

impl OptimizeRequest {
    /// Check presence and numeric form of every field.
    pub fn parse(&self) -> Result<StagingInputs, StagingError> {
        let masses_kg = [
            numeric_field("mass1", &self.mass1)?,
            numeric_field("mass2", &self.mass2)?,
            numeric_field("mass3", &self.mass3)?,
            numeric_field("mass4", &self.mass4)?,
            numeric_field("mass5", &self.mass5)?,
            numeric_field("mass6", &self.mass6)?,
        ];
        let lengths_m = [
            numeric_field("length1", &self.length1)?,
            numeric_field("length2", &self.length2)?,
            numeric_field("length3", &self.length3)?,
            numeric_field("length4", &self.length4)?,
            numeric_field("length5", &self.length5)?,
            numeric_field("length6", &self.length6)?,
        ];
        let mode = InputMode::from_flag(self.mode.as_ref().and_then(Value::as_str));
        Ok(StagingInputs {
            masses_kg,
            lengths_m,
            mode,
        })
    }
}

fn numeric_field(name: &str, value: &Option<Value>) -> Result<f64, StagingError> {
    let invalid = |reason: String| StagingError::Input {
        field: name.to_string(),
        reason,
    };
    let parsed = match value {
        None | Some(Value::Null) => return Err(invalid("required field is missing".to_string())),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(format!("expected a number, got {}", describe(value)))),
    }
}

fn describe(value: &Option<Value>) -> String {
    value
        .as_ref()
        .map(Value::to_string)
        .unwrap_or_else(|| "nothing".to_string())
}

/// One configuration's result plus an explicit feasibility flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    #[serde(flatten)]
    pub result: StageResult,
    pub feasible: bool,
}

impl From<StageResult> for StageReport {
    fn from(result: StageResult) -> Self {
        let feasible = result.is_feasible();
        Self { result, feasible }
    }
}

/// Response body: both configurations computed from the same request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub three_stage: StageReport,
    pub pop_out: StageReport,
}

impl OptimizeResponse {
    /// Fail with a domain error if either configuration is infeasible.
    pub fn require_feasible(&self) -> Result<(), StagingError> {
        self.three_stage.result.validate()?;
        self.pop_out.result.validate()
    }
}

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("malformed request body: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Staging(#[from] StagingError),
}

/// Compute both configurations for a parsed request.
pub fn optimize(
    constants: &PhysicalConstants,
    inputs: &StagingInputs,
) -> Result<OptimizeResponse, StagingError> {
    optimize_with(constants, inputs, PopOutSequence::Full)
}

/// Compute both configurations, choosing how the pop-out burns are grouped.
pub fn optimize_with(
    constants: &PhysicalConstants,
    inputs: &StagingInputs,
    sequence: PopOutSequence,
) -> Result<OptimizeResponse, StagingError> {
    let m = inputs.magnitudes();
    let three_stage = compute_three_stage(constants, [m[0], m[1], m[2]], inputs.mode)
        .map_err(|e| inputs.with_request_field(e))?;
    let pop_out = match sequence {
        PopOutSequence::Full => compute_pop_out(constants, m[3], m[4], m[5], inputs.mode),
        PopOutSequence::Adaptive => {
            compute_pop_out_adaptive(constants, m[3], m[4], m[5], inputs.mode)
        }
    }
    .map_err(|e| inputs.with_request_field(e))?;
    if !three_stage.is_feasible() || !pop_out.is_feasible() {
        log::warn!(
            "infeasible staging: three-stage mass fractions {:?}, pop-out mass fractions {:?}",
            three_stage.mass_fractions,
            pop_out.mass_fractions
        );
    }
    Ok(OptimizeResponse {
        three_stage: three_stage.into(),
        pop_out: pop_out.into(),
    })
}

/// Parse a JSON request body and compute the response.
pub fn optimize_json(
    constants: &PhysicalConstants,
    body: &str,
) -> Result<OptimizeResponse, OptimizeError> {
    optimize_json_with(constants, body, PopOutSequence::Full)
}

/// [`optimize_json`] with an explicit pop-out burn sequence.
pub fn optimize_json_with(
    constants: &PhysicalConstants,
    body: &str,
    sequence: PopOutSequence,
) -> Result<OptimizeResponse, OptimizeError> {
    let request: OptimizeRequest = serde_json::from_str(body)?;
    let inputs = request.parse()?;
    Ok(optimize_with(constants, &inputs, sequence)?)
}
