//! Rocket staging performance calculator.
//!
//! Mass fractions and delta-v budgets for inline three-stage stacks and pop-out booster
//! vehicles, plus an exhaustive length-ratio search. Keeping this logic in a library crate
//! lets multiple front-ends (CLI, web) share it.

pub mod optimize;

pub use staging_config as config;
pub use staging_core as physics;
pub use staging_export as export;
pub use staging_search as search;
pub use staging_vehicle as vehicle;

pub use optimize::{
    OptimizeError, OptimizeRequest, OptimizeResponse, PopOutSequence, StageReport, StagingInputs,
    optimize, optimize_json, optimize_json_with, optimize_with,
};
pub use staging_core::PhysicalConstants;
pub use staging_vehicle::{InputMode, StageResult, StagingError};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
