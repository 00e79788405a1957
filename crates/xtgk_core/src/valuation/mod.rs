//! # Valuation Module
//!
//! xT-GK value of a single goalkeeper action:
//!
//! ```text
//! action_value        = DV (passes only) + PEV + BC
//! risk_adjusted_value = action_value / risk_factor(start.x, under_pressure)
//! ```
//!
//! - `components` - distribution, pressure escape and build-up calculators
//! - `build_up` - pluggable build-up strategy and possession sequences
//! - `risk` - risk factor and adjustment
//! - `pipeline` - per-event orchestration over a shared zone grid

pub mod build_up;
pub mod components;
pub mod pipeline;
pub mod risk;

pub use build_up::{BaselineBuildUp, BuildUpStrategy, PossessionOutcome, PossessionSequence};
pub use components::{baseline_build_up, distribution_value, pressure_escape_value};
pub use pipeline::{ActionValue, ValuationPipeline, ValuedAction};
pub use risk::{risk_adjust, risk_factor};
