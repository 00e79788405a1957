//! Build-up contribution strategies.
//!
//! [`BaselineBuildUp`] is the sequence-agnostic formula. Strategies that want
//! possession context receive an optional [`PossessionSequence`]; no
//! sequence-aware scoring ships with this crate, and any such strategy is an
//! extension beyond the reference model.

use super::components::baseline_build_up;
use crate::config::BuildUpConfig;
use crate::event::Event;
use serde::{Deserialize, Serialize};

/// How a possession ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PossessionOutcome {
    Shot,
    Goal,
    Loss,
    OutOfPlay,
    Foul,
    Other,
}

/// Ordered events of one continuous team possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionSequence {
    pub events: Vec<Event>,
    pub outcome: PossessionOutcome,
}

impl PossessionSequence {
    pub fn new(events: Vec<Event>, outcome: PossessionOutcome) -> Self {
        Self { events, outcome }
    }

    /// Position of `event_id` within the possession.
    pub fn position_of(&self, event_id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == event_id)
    }

    pub fn ends_in_shot(&self) -> bool {
        matches!(self.outcome, PossessionOutcome::Shot | PossessionOutcome::Goal)
    }
}

pub trait BuildUpStrategy: Send + Sync {
    fn contribution(
        &self,
        event: &Event,
        sequence: Option<&PossessionSequence>,
        config: &BuildUpConfig,
    ) -> f64;

    fn name(&self) -> &'static str;
}

/// `base_contribution * event_type_factor`, ignoring any sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineBuildUp;

impl BuildUpStrategy for BaselineBuildUp {
    fn contribution(
        &self,
        event: &Event,
        _sequence: Option<&PossessionSequence>,
        config: &BuildUpConfig,
    ) -> f64 {
        baseline_build_up(event, config)
    }

    fn name(&self) -> &'static str {
        "baseline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Location, PassOutcome};

    #[test]
    fn test_baseline_ignores_sequence() {
        let cfg = BuildUpConfig::default();
        let e = Event::pass("a", Location::new(0.05, 0.5), Location::new(0.4, 0.5), PassOutcome::Complete);
        let seq = PossessionSequence::new(vec![e.clone()], PossessionOutcome::Shot);

        let without = BaselineBuildUp.contribution(&e, None, &cfg);
        let with = BaselineBuildUp.contribution(&e, Some(&seq), &cfg);
        assert_eq!(without, with);
        assert!((with - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_sequence_helpers() {
        let a = Event::other("a", "Goal Keeper", Location::new(0.02, 0.5));
        let b = Event::pass("b", Location::new(0.05, 0.5), Location::new(0.4, 0.5), PassOutcome::Complete);
        let seq = PossessionSequence::new(vec![a, b], PossessionOutcome::Goal);
        assert_eq!(seq.position_of("b"), Some(1));
        assert_eq!(seq.position_of("z"), None);
        assert!(seq.ends_in_shot());
        assert!(!PossessionSequence::new(vec![], PossessionOutcome::Loss).ends_in_shot());
    }
}
