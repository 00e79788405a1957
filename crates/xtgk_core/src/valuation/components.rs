//! Component value calculators.
//!
//! Three independent pure functions whose sum is the raw action value:
//! distribution value (passes only), pressure escape value and build-up
//! contribution. Only distribution value reads the zone grid.

use crate::config::{BuildUpConfig, DistributionConfig, PressureEscapeConfig};
use crate::event::{Event, Location, PassDetail};
use crate::zone_grid::PitchZoneGrid;

/// Distribution value of a pass.
///
/// The zone gain is floored at zero *before* the outcome factor is applied,
/// so a failed pass that does not gain zone value scores exactly 0 rather
/// than a penalty. Only failed passes into higher-value zones go negative.
pub fn distribution_value(
    grid: &PitchZoneGrid,
    start: Location,
    pass: &PassDetail,
    under_pressure: bool,
    config: &DistributionConfig,
) -> f64 {
    let value_diff = grid.base_value(pass.end.x, pass.end.y) - grid.base_value(start.x, start.y);

    let progression_factor = if pass.end.x > start.x {
        config.forward_factor
    } else if pass.end.x < start.x {
        config.backward_factor
    } else {
        config.lateral_factor
    };

    let outcome_factor = if pass.outcome.is_failure() { config.failed_outcome_factor } else { 1.0 };
    let pressure_factor = if under_pressure { config.pressure_factor } else { 1.0 };

    value_diff.max(0.0) * progression_factor * outcome_factor * pressure_factor
}

/// Pressure escape value: zero without pressure, the base value otherwise,
/// except for passes that failed.
pub fn pressure_escape_value(event: &Event, config: &PressureEscapeConfig) -> f64 {
    if !event.under_pressure {
        return 0.0;
    }
    let success_factor = match event.pass_detail() {
        Some(pass) if pass.outcome.is_failure() => 0.0,
        _ => 1.0,
    };
    config.base_value * success_factor
}

/// Sequence-agnostic build-up contribution.
pub fn baseline_build_up(event: &Event, config: &BuildUpConfig) -> f64 {
    let event_type_factor = if event.is_pass() { config.pass_factor } else { config.other_factor };
    config.base_contribution * event_type_factor
}
