//! Per-event valuation: components, sum, risk adjustment.

use super::build_up::{BaselineBuildUp, BuildUpStrategy, PossessionSequence};
use super::components::{distribution_value, pressure_escape_value};
use super::risk::{risk_adjust, risk_factor};
use crate::config::ValuationConfig;
use crate::event::Event;
use crate::zone_grid::PitchZoneGrid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Decomposed value of one action. Built once and never modified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionValue {
    pub distribution_value: f64,
    pub pressure_escape_value: f64,
    pub build_up_contribution: f64,
    pub risk_factor: f64,
    pub risk_adjusted_value: f64,
}

impl ActionValue {
    /// Raw value before risk adjustment.
    pub fn action_value(&self) -> f64 {
        self.distribution_value + self.pressure_escape_value + self.build_up_contribution
    }
}

/// An event paired with its value, the unit consumed by aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedAction {
    pub event: Event,
    pub value: ActionValue,
}

/// Stateless valuation over a shared, read-only zone grid.
///
/// Cloning is cheap; clones share the grid and strategy, so a pipeline can be
/// handed to worker threads as-is.
#[derive(Clone)]
pub struct ValuationPipeline {
    grid: Arc<PitchZoneGrid>,
    config: ValuationConfig,
    strategy: Arc<dyn BuildUpStrategy>,
}

impl ValuationPipeline {
    pub fn new(config: ValuationConfig) -> Self {
        let grid = Arc::new(PitchZoneGrid::from_config(&config.grid));
        Self::with_grid(grid, config)
    }

    /// Use an existing grid, e.g. one shared with other pipelines.
    pub fn with_grid(grid: Arc<PitchZoneGrid>, config: ValuationConfig) -> Self {
        Self { grid, config, strategy: Arc::new(BaselineBuildUp) }
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn BuildUpStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn grid(&self) -> &Arc<PitchZoneGrid> {
        &self.grid
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn value_event(&self, event: &Event) -> ActionValue {
        self.evaluate(event, None)
    }

    pub fn value_event_in_sequence(&self, event: &Event, sequence: &PossessionSequence) -> ActionValue {
        self.evaluate(event, Some(sequence))
    }

    /// Value every event, preserving input order.
    pub fn value_batch(&self, events: Vec<Event>) -> Vec<ValuedAction> {
        events
            .into_iter()
            .map(|event| {
                let value = self.value_event(&event);
                ValuedAction { event, value }
            })
            .collect()
    }

    /// Parallel [`value_batch`](Self::value_batch). Output order matches input order.
    pub fn value_batch_par(&self, events: Vec<Event>) -> Vec<ValuedAction> {
        events
            .into_par_iter()
            .map(|event| {
                let value = self.value_event(&event);
                ValuedAction { event, value }
            })
            .collect()
    }

    fn evaluate(&self, event: &Event, sequence: Option<&PossessionSequence>) -> ActionValue {
        let dv = match event.pass_detail() {
            Some(pass) => distribution_value(
                &self.grid,
                event.start,
                pass,
                event.under_pressure,
                &self.config.distribution,
            ),
            None => 0.0,
        };
        let pev = pressure_escape_value(event, &self.config.pressure_escape);
        let bc = self.strategy.contribution(event, sequence, &self.config.build_up);

        let factor = risk_factor(event.start.x, event.under_pressure, &self.config.risk);
        let rav = risk_adjust(dv + pev + bc, event.start.x, event.under_pressure, &self.config.risk);

        trace!(event_id = %event.id, dv, pev, bc, rav, "Valued event");

        ActionValue {
            distribution_value: dv,
            pressure_escape_value: pev,
            build_up_contribution: bc,
            risk_factor: factor,
            risk_adjusted_value: rav,
        }
    }
}

impl Default for ValuationPipeline {
    fn default() -> Self {
        Self::new(ValuationConfig::default())
    }
}

impl fmt::Debug for ValuationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuationPipeline")
            .field("grid", &(self.grid.length_zones(), self.grid.width_zones()))
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
