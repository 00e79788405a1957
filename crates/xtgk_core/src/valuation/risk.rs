//! Risk adjustment.
//!
//! Discounts the raw action value by how deep and how pressured the action
//! was. Division keeps zero at zero and preserves the sign of negative raw
//! values. With the default config the factor lies in `[1.0, 1.5]` without
//! pressure and `[1.2, 1.8]` with it.

use crate::config::RiskConfig;

/// Risk factor for an action starting at normalized `x`.
///
/// `x` is clamped to the unit pitch so off-pitch coordinates cannot push the
/// factor outside its documented range.
pub fn risk_factor(x: f64, under_pressure: bool, config: &RiskConfig) -> f64 {
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let depth = 1.0 + (1.0 - x) * config.depth_weight;
    if under_pressure {
        depth * config.pressure_multiplier
    } else {
        depth
    }
}

pub fn risk_adjust(action_value: f64, x: f64, under_pressure: bool, config: &RiskConfig) -> f64 {
    action_value / risk_factor(x, under_pressure, config)
}
