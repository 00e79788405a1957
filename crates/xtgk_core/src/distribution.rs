//! # Distribution Summary
//!
//! Per-goalkeeper passing profile used by scouting and opposition reports:
//! volume, accuracy by length class, and how often the keeper distributes
//! under pressure.

use crate::classifier::{EventClassifier, PassLength};
use crate::event::{Event, UNKNOWN_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight of pass success in the distribution index.
const INDEX_SUCCESS_WEIGHT: f64 = 0.6;
/// Weight of pressure-free distribution in the distribution index.
const INDEX_CALM_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub player_id: u64,
    pub player_name: String,
    pub team_name: String,
    pub total_passes: usize,
    pub successful_passes: usize,
    pub success_rate: f64,
    pub short_passes: usize,
    pub long_passes: usize,
    pub short_pass_pct: f64,
    pub long_pass_pct: f64,
    /// Success rate over short passes
    pub short_accuracy: f64,
    /// Success rate over long passes
    pub long_accuracy: f64,
    pub under_pressure: usize,
    pub pressure_pct: f64,
    pub pressured_success_rate: f64,
    /// `success_rate * 0.6 + (1 - pressure_pct) * 0.4`
    pub estimated_index: f64,
}

#[derive(Debug, Default)]
struct Tally {
    player_name: String,
    team_name: String,
    passes: usize,
    successful: usize,
    short: usize,
    short_successful: usize,
    long: usize,
    long_successful: usize,
    pressured: usize,
    pressured_successful: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Summarize the passes in `events` per player. Non-pass events and events
/// without a player id are ignored.
pub fn summarize_distribution<'a, I>(
    events: I,
    classifier: &EventClassifier,
) -> BTreeMap<u64, DistributionSummary>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut tallies: BTreeMap<u64, Tally> = BTreeMap::new();

    for event in events {
        let (Some(player), Some(pass)) = (event.player.as_ref(), event.pass_detail()) else {
            continue;
        };

        let tally = tallies.entry(player.id).or_insert_with(|| Tally {
            player_name: player.name.clone(),
            team_name: event.team.as_ref().map_or_else(|| UNKNOWN_NAME.to_string(), |t| t.name.clone()),
            ..Tally::default()
        });

        let ok = pass.is_clean();
        tally.passes += 1;
        tally.successful += usize::from(ok);

        match classifier.classify_pass_length(pass.length) {
            PassLength::Short => {
                tally.short += 1;
                tally.short_successful += usize::from(ok);
            }
            PassLength::Long => {
                tally.long += 1;
                tally.long_successful += usize::from(ok);
            }
        }

        if event.under_pressure {
            tally.pressured += 1;
            tally.pressured_successful += usize::from(ok);
        }
    }

    tallies
        .into_iter()
        .map(|(player_id, t)| {
            let success_rate = ratio(t.successful, t.passes);
            let pressure_pct = ratio(t.pressured, t.passes);
            let summary = DistributionSummary {
                player_id,
                player_name: t.player_name,
                team_name: t.team_name,
                total_passes: t.passes,
                successful_passes: t.successful,
                success_rate,
                short_passes: t.short,
                long_passes: t.long,
                short_pass_pct: ratio(t.short, t.passes),
                long_pass_pct: ratio(t.long, t.passes),
                short_accuracy: ratio(t.short_successful, t.short),
                long_accuracy: ratio(t.long_successful, t.long),
                under_pressure: t.pressured,
                pressure_pct,
                pressured_success_rate: ratio(t.pressured_successful, t.pressured),
                estimated_index: success_rate * INDEX_SUCCESS_WEIGHT
                    + (1.0 - pressure_pct) * INDEX_CALM_WEIGHT,
            };
            (player_id, summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Location, PassOutcome};

    fn gk_pass(id: &str, end_x: f64, outcome: PassOutcome, pressure: bool) -> Event {
        Event::pass(id, Location::new(0.05, 0.5), Location::new(end_x, 0.5), outcome)
            .under_pressure(pressure)
            .by_player(5246, "Keylor Navas")
            .for_team(Some(217), "Real Madrid")
    }

    #[test]
    fn test_summary_counts() {
        // 0.15 * 105 = 15.75 units (short); 0.6 * 105 = 63 units (long)
        let events = vec![
            gk_pass("a", 0.2, PassOutcome::Complete, false),
            gk_pass("b", 0.2, PassOutcome::Incomplete, true),
            gk_pass("c", 0.65, PassOutcome::Complete, true),
            gk_pass("d", 0.65, PassOutcome::Out, false),
            Event::other("e", "Goal Keeper", Location::new(0.02, 0.5)).by_player(5246, "Keylor Navas"),
        ];
        let summaries = summarize_distribution(&events, &EventClassifier::default());
        let s = &summaries[&5246];

        assert_eq!(s.total_passes, 4);
        assert_eq!(s.successful_passes, 2);
        assert_eq!((s.short_passes, s.long_passes), (2, 2));
        assert!((s.short_accuracy - 0.5).abs() < 1e-12);
        assert!((s.long_accuracy - 0.5).abs() < 1e-12);
        assert_eq!(s.under_pressure, 2);
        assert!((s.pressured_success_rate - 0.5).abs() < 1e-12);
        assert!((s.estimated_index - (0.5 * 0.6 + 0.5 * 0.4)).abs() < 1e-12);
        assert_eq!(s.team_name, "Real Madrid");
    }

    #[test]
    fn test_offside_pass_is_not_successful() {
        use crate::config::ValuationConfig;
        use crate::event::ingest_json_values;
        use serde_json::json;

        let records = vec![json!({
            "id": "o1",
            "type": { "name": "Pass" },
            "location": [10.5, 34.0],
            "pass": { "end_location": [31.5, 34.0], "outcome": { "id": 76, "name": "Pass Offside" } },
            "player": { "id": 5246, "name": "Keylor Navas" },
            "position": { "name": "Goalkeeper" }
        })];
        let ingested = ingest_json_values(records, &ValuationConfig::default());
        let s = &summarize_distribution(&ingested.events, &EventClassifier::default())[&5246];

        assert_eq!(s.total_passes, 1);
        assert_eq!(s.successful_passes, 0);
        assert_eq!(s.success_rate, 0.0);
    }

    #[test]
    fn test_no_passes_no_summary() {
        let events = vec![Event::other("e", "Goal Keeper", Location::new(0.02, 0.5)).by_player(1, "K")];
        assert!(summarize_distribution(&events, &EventClassifier::default()).is_empty());
    }

    #[test]
    fn test_all_long_has_zero_short_accuracy() {
        let events = vec![gk_pass("a", 0.9, PassOutcome::Complete, false)];
        let s = &summarize_distribution(&events, &EventClassifier::default())[&5246];
        assert_eq!(s.short_passes, 0);
        assert_eq!(s.short_accuracy, 0.0);
        assert_eq!(s.long_accuracy, 1.0);
        assert_eq!(s.pressured_success_rate, 0.0);
        assert!((s.estimated_index - 1.0).abs() < 1e-12);
    }
}
