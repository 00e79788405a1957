//! # Aggregation Engine
//!
//! Folds valued actions into per-goalkeeper profiles.
//!
//! The per-player partial ([`ProfileAccumulator`]) is associative and
//! commutative, so the same result comes out of a sequential fold
//! ([`aggregate`]), a rayon map-reduce ([`aggregate_par`]) or a streaming
//! accumulation over chunks ([`ProfileAggregator`]). The one accepted source of
//! nondeterminism is floating-point summation order: `total_value` may differ
//! in the last bits between strategies, never by more.
//!
//! Display names come from the first action seen for a player id, where
//! "first" is the lowest input position, not arrival order. Names are not
//! checked for consistency across a player's actions.

use crate::error::AggregationKeyError;
use crate::event::UNKNOWN_NAME;
use crate::valuation::ValuedAction;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalkeeperProfile {
    pub player_id: u64,
    pub player_name: String,
    pub team_name: String,
    pub total_value: f64,
    pub average_value: f64,
    pub action_count: usize,
    /// Completed / total passes, 0 when the player made no pass
    pub pass_completion_rate: f64,
}

/// Partial aggregate for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileAccumulator {
    player_id: u64,
    /// Input position of the action the names were taken from
    first_seen: usize,
    player_name: String,
    team_name: String,
    total_value: f64,
    action_count: usize,
    passes: usize,
    completed_passes: usize,
}

impl ProfileAccumulator {
    fn empty(player_id: u64, position: usize, action: &ValuedAction) -> Self {
        let (player_name, team_name) = display_names(action);
        Self {
            player_id,
            first_seen: position,
            player_name,
            team_name,
            total_value: 0.0,
            action_count: 0,
            passes: 0,
            completed_passes: 0,
        }
    }

    fn observe(&mut self, position: usize, action: &ValuedAction) {
        if position < self.first_seen {
            let (player_name, team_name) = display_names(action);
            self.first_seen = position;
            self.player_name = player_name;
            self.team_name = team_name;
        }

        self.total_value += action.value.risk_adjusted_value;
        self.action_count += 1;
        if let Some(pass) = action.event.pass_detail() {
            self.passes += 1;
            if !pass.outcome.is_failure() {
                self.completed_passes += 1;
            }
        }
    }

    fn merge(&mut self, other: ProfileAccumulator) {
        if other.first_seen < self.first_seen {
            self.first_seen = other.first_seen;
            self.player_name = other.player_name;
            self.team_name = other.team_name;
        }
        self.total_value += other.total_value;
        self.action_count += other.action_count;
        self.passes += other.passes;
        self.completed_passes += other.completed_passes;
    }

    pub fn to_profile(&self) -> GoalkeeperProfile {
        let average_value =
            if self.action_count > 0 { self.total_value / self.action_count as f64 } else { 0.0 };
        let pass_completion_rate =
            if self.passes > 0 { self.completed_passes as f64 / self.passes as f64 } else { 0.0 };
        GoalkeeperProfile {
            player_id: self.player_id,
            player_name: self.player_name.clone(),
            team_name: self.team_name.clone(),
            total_value: self.total_value,
            average_value,
            action_count: self.action_count,
            pass_completion_rate,
        }
    }
}

fn display_names(action: &ValuedAction) -> (String, String) {
    let player = action
        .event
        .player
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let team = action
        .event
        .team
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());
    (player, team)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationOutcome {
    pub profiles: BTreeMap<u64, GoalkeeperProfile>,
    /// Actions excluded for lacking a player id, in input order
    pub unattributed: Vec<AggregationKeyError>,
}

impl AggregationOutcome {
    /// Number of actions that made it into a profile.
    pub fn attributed_actions(&self) -> usize {
        self.profiles.values().map(|p| p.action_count).sum()
    }
}

/// Streaming accumulator.
///
/// Feed it actions in any number of chunks with [`push`](Self::push) or
/// [`extend`](Self::extend); take partial snapshots with
/// [`profiles`](Self::profiles). Independent aggregators over disjoint
/// slices can be combined with [`merge`](Self::merge) as long as each was fed
/// the global input position via [`push_at`](Self::push_at).
#[derive(Debug, Clone, Default)]
pub struct ProfileAggregator {
    accumulators: BTreeMap<u64, ProfileAccumulator>,
    unattributed: Vec<(usize, AggregationKeyError)>,
    next_position: usize,
}

impl ProfileAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next action in input order.
    pub fn push(&mut self, action: &ValuedAction) {
        let position = self.next_position;
        self.push_at(position, action);
    }

    /// Add an action whose input position is known.
    pub fn push_at(&mut self, position: usize, action: &ValuedAction) {
        self.next_position = self.next_position.max(position + 1);

        let Some(player_id) = action.event.player_id() else {
            self.unattributed.push((position, AggregationKeyError { event_id: action.event.id.clone() }));
            return;
        };

        self.accumulators
            .entry(player_id)
            .or_insert_with(|| ProfileAccumulator::empty(player_id, position, action))
            .observe(position, action);
    }

    pub fn extend<'a, I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = &'a ValuedAction>,
    {
        for action in actions {
            self.push(action);
        }
    }

    pub fn merge(mut self, other: ProfileAggregator) -> Self {
        for (player_id, acc) in other.accumulators {
            match self.accumulators.get_mut(&player_id) {
                Some(existing) => existing.merge(acc),
                None => {
                    self.accumulators.insert(player_id, acc);
                }
            }
        }
        self.unattributed.extend(other.unattributed);
        self.next_position = self.next_position.max(other.next_position);
        self
    }

    pub fn profiles(&self) -> BTreeMap<u64, GoalkeeperProfile> {
        self.accumulators.iter().map(|(id, acc)| (*id, acc.to_profile())).collect()
    }

    pub fn unattributed_count(&self) -> usize {
        self.unattributed.len()
    }

    pub fn finish(mut self) -> AggregationOutcome {
        let profiles = self.profiles();
        self.unattributed.sort_by_key(|(position, _)| *position);
        AggregationOutcome {
            profiles,
            unattributed: self.unattributed.into_iter().map(|(_, err)| err).collect(),
        }
    }
}

pub fn aggregate(actions: &[ValuedAction]) -> AggregationOutcome {
    let mut aggregator = ProfileAggregator::new();
    aggregator.extend(actions);
    aggregator.finish()
}

pub fn aggregate_par(actions: &[ValuedAction]) -> AggregationOutcome {
    actions
        .par_iter()
        .enumerate()
        .fold(ProfileAggregator::new, |mut agg, (position, action)| {
            agg.push_at(position, action);
            agg
        })
        .reduce(ProfileAggregator::new, ProfileAggregator::merge)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, Location, PassOutcome};
    use crate::valuation::ActionValue;

    fn valued(event: Event, rav: f64) -> ValuedAction {
        ValuedAction {
            event,
            value: ActionValue {
                distribution_value: 0.0,
                pressure_escape_value: 0.0,
                build_up_contribution: 0.0,
                risk_factor: 1.0,
                risk_adjusted_value: rav,
            },
        }
    }

    fn pass(id: &str, outcome: PassOutcome) -> Event {
        Event::pass(id, Location::new(0.05, 0.5), Location::new(0.3, 0.4), outcome)
    }

    #[test]
    fn test_three_action_profile() {
        let actions = vec![
            valued(pass("a", PassOutcome::Complete).by_player(1, "Oblak").for_team(Some(218), "Atletico"), 0.02),
            valued(Event::other("b", "Goal Keeper", Location::new(0.02, 0.5)).by_player(1, "Oblak"), 0.03),
            valued(pass("c", PassOutcome::Incomplete).by_player(1, "Oblak"), -0.01),
        ];
        let outcome = aggregate(&actions);
        let p = &outcome.profiles[&1];
        assert_eq!(p.action_count, 3);
        assert!((p.total_value - 0.04).abs() < 1e-12);
        assert!((p.average_value - 0.04 / 3.0).abs() < 1e-12);
        assert!((p.pass_completion_rate - 0.5).abs() < 1e-12);
        assert_eq!(p.team_name, "Atletico");
    }

    #[test]
    fn test_no_passes_means_zero_completion() {
        let actions = vec![valued(Event::other("a", "Goal Keeper", Location::new(0.0, 0.5)).by_player(9, "K"), 0.01)];
        let outcome = aggregate(&actions);
        assert_eq!(outcome.profiles[&9].pass_completion_rate, 0.0);
        assert_eq!(outcome.profiles[&9].team_name, UNKNOWN_NAME);
    }

    #[test]
    fn test_first_seen_names_win() {
        let actions = vec![
            valued(pass("a", PassOutcome::Complete).by_player(4, "First"), 0.01),
            valued(pass("b", PassOutcome::Complete).by_player(4, "Second"), 0.01),
        ];
        assert_eq!(aggregate(&actions).profiles[&4].player_name, "First");

        // Feed positions out of arrival order
        let mut agg = ProfileAggregator::new();
        agg.push_at(1, &actions[1]);
        agg.push_at(0, &actions[0]);
        assert_eq!(agg.finish().profiles[&4].player_name, "First");
    }

    #[test]
    fn test_unattributed_actions_are_counted() {
        let actions = vec![
            valued(pass("a", PassOutcome::Complete).by_player(1, "A"), 0.01),
            valued(pass("b", PassOutcome::Complete), 0.5),
        ];
        let outcome = aggregate(&actions);
        assert_eq!(outcome.attributed_actions(), 1);
        assert_eq!(outcome.unattributed, vec![AggregationKeyError { event_id: "b".to_string() }]);
        assert!((outcome.profiles[&1].total_value - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_chunked_merge_matches_single_pass() {
        let actions: Vec<ValuedAction> = (0..30)
            .map(|i| {
                let outcome = if i % 4 == 0 { PassOutcome::Out } else { PassOutcome::Complete };
                let event = pass(&format!("e{}", i), outcome).by_player(i % 3, format!("P{}", i));
                valued(event, i as f64 * 0.001)
            })
            .collect();

        let whole = aggregate(&actions);

        let mut left = ProfileAggregator::new();
        let mut right = ProfileAggregator::new();
        for (i, a) in actions.iter().enumerate() {
            if i < 11 {
                left.push_at(i, a);
            } else {
                right.push_at(i, a);
            }
        }
        let merged = right.merge(left).finish();

        for (id, p) in &whole.profiles {
            let q = &merged.profiles[id];
            assert_eq!(p.action_count, q.action_count);
            assert_eq!(p.player_name, q.player_name);
            assert!((p.total_value - q.total_value).abs() < 1e-12);
            assert_eq!(p.pass_completion_rate, q.pass_completion_rate);
        }

        let par = aggregate_par(&actions);
        assert_eq!(par.profiles.keys().collect::<Vec<_>>(), whole.profiles.keys().collect::<Vec<_>>());
        assert_eq!(par.profiles[&0].player_name, "P0");
    }

    #[test]
    fn test_streaming_snapshot() {
        let a = valued(pass("a", PassOutcome::Complete).by_player(2, "K"), 0.02);
        let b = valued(pass("b", PassOutcome::Out).by_player(2, "K"), 0.0);
        let mut agg = ProfileAggregator::new();
        agg.push(&a);
        assert_eq!(agg.profiles()[&2].action_count, 1);
        agg.push(&b);
        let snapshot = agg.profiles();
        assert_eq!(snapshot[&2].action_count, 2);
        assert!((snapshot[&2].pass_completion_rate - 0.5).abs() < 1e-12);
    }
}
