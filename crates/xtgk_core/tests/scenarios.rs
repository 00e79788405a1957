//! Worked examples of the xT-GK model end to end.

use xtgk_core::event::{ingest, RawNamed, RawPass};
use xtgk_core::{
    aggregate, analyze_batch, analyze_raw_batch, ActionValue, Event, Location, PassOutcome,
    RawEvent, ValuationConfig, ValuationPipeline, ValuedAction,
};

const EPS: f64 = 1e-9;

#[test]
fn forward_pass_without_pressure() {
    let pipeline = ValuationPipeline::default();
    let grid = pipeline.grid();

    assert!((grid.base_value(0.1, 0.5) - (0.01 + 0.1 / 12.0)).abs() < EPS);
    assert!((grid.base_value(0.3, 0.5) - 0.035).abs() < EPS);

    let event = Event::pass("a", Location::new(0.1, 0.5), Location::new(0.3, 0.5), PassOutcome::Complete);
    let v = pipeline.value_event(&event);

    assert!((v.distribution_value - 0.025).abs() < EPS);
    assert_eq!(v.pressure_escape_value, 0.0);
    assert!((v.build_up_contribution - 0.03).abs() < EPS);
    assert!((v.action_value() - 0.055).abs() < EPS);
    assert!((v.risk_factor - 1.45).abs() < EPS);
    assert!((v.risk_adjusted_value - 0.037_931_034_482_758_62).abs() < EPS);
}

#[test]
fn failed_backward_pass_under_pressure() {
    let pipeline = ValuationPipeline::default();
    let event = Event::pass("b", Location::new(0.3, 0.5), Location::new(0.1, 0.5), PassOutcome::Incomplete)
        .under_pressure(true);
    let v = pipeline.value_event(&event);

    assert_eq!(v.distribution_value, 0.0);
    assert_eq!(v.pressure_escape_value, 0.0);
    assert!((v.build_up_contribution - 0.03).abs() < EPS);
    assert!((v.risk_factor - 1.62).abs() < EPS);
    assert!((v.risk_adjusted_value - 0.03 / 1.62).abs() < EPS);
    assert!((v.risk_adjusted_value - 0.018_518_518_518_5).abs() < 1e-9);
}

fn with_value(event: Event, rav: f64) -> ValuedAction {
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

#[test]
fn three_actions_for_one_keeper() {
    let start = Location::new(0.05, 0.5);
    let end = Location::new(0.35, 0.5);
    let actions = vec![
        with_value(Event::pass("c1", start, end, PassOutcome::Complete).by_player(10, "Ter Stegen"), 0.02),
        with_value(Event::pass("c2", start, end, PassOutcome::Out).by_player(10, "Ter Stegen"), 0.03),
        with_value(Event::other("c3", "Goal Keeper", start).by_player(10, "Ter Stegen"), -0.01),
    ];

    let outcome = aggregate(&actions);
    let profile = &outcome.profiles[&10];
    assert_eq!(profile.action_count, 3);
    assert!((profile.total_value - 0.04).abs() < EPS);
    assert!((profile.average_value - 0.013_333_333_333).abs() < 1e-9);
    assert!((profile.pass_completion_rate - 0.5).abs() < EPS);
}

#[test]
fn batch_with_missing_player_ids() {
    let events: Vec<Event> = (0..10)
        .map(|i| {
            let e = Event::pass(
                format!("m{}", i),
                Location::new(0.05, 0.2 + i as f64 * 0.05),
                Location::new(0.4, 0.5),
                PassOutcome::Complete,
            );
            if i == 3 || i == 7 {
                e
            } else {
                e.by_player(1, "Keeper")
            }
        })
        .collect();

    let report = analyze_batch(events, &ValuationPipeline::default());

    assert_eq!(report.profiles[&1].action_count, 8);
    assert_eq!(report.summary.total_skipped(), 2);
    assert_eq!(report.summary.unattributed_event_ids, vec!["m3".to_string(), "m7".to_string()]);
}

fn raw_gk_pass(id: &str, player: Option<u64>) -> RawEvent {
    RawEvent {
        id: Some(id.to_string()),
        event_type: Some(RawNamed::named("Pass")),
        location: Some(vec![5.0, 34.0]),
        pass: Some(RawPass { end_location: Some(vec![45.0, 20.0]), length: None, outcome: None }),
        under_pressure: Some(false),
        player: player.map(|pid| RawNamed::identity(pid, "Keeper")),
        team: Some(RawNamed::identity(3, "Club")),
        position: Some(RawNamed::named("Goalkeeper")),
    }
}

#[test]
fn raw_batch_skips_malformed_and_keeps_going() {
    let mut records: Vec<RawEvent> = (0..8).map(|i| raw_gk_pass(&format!("r{}", i), Some(21))).collect();
    let mut no_location = raw_gk_pass("bad-1", Some(21));
    no_location.location = None;
    let mut no_type = raw_gk_pass("bad-2", Some(21));
    no_type.event_type = None;
    records.insert(2, no_location);
    records.push(no_type);

    let report = analyze_raw_batch(records, &ValuationPipeline::default());

    assert_eq!(report.summary.received, 10);
    assert_eq!(report.summary.skipped_malformed, 2);
    assert_eq!(report.summary.total_skipped(), 2);
    assert_eq!(report.action_values.len(), 8);
    assert_eq!(report.profiles[&21].action_count, 8);
    assert_eq!(report.summary.skipped[0].index, 2);
    assert_eq!(report.summary.skipped[1].event_id, "bad-2");
}

#[test]
fn ingest_normalizes_with_configured_pitch() {
    let mut config = ValuationConfig::default();
    config.pitch.length = 120.0;
    config.pitch.width = 80.0;

    let mut record = raw_gk_pass("p", Some(1));
    record.location = Some(vec![12.0, 40.0]);
    record.pass = Some(RawPass { end_location: Some(vec![36.0, 40.0]), length: None, outcome: None });

    let outcome = ingest(vec![record], &config);
    let event = &outcome.events[0];
    assert!((event.start.x - 0.1).abs() < EPS);
    assert!((event.start.y - 0.5).abs() < EPS);
    let pass = event.pass_detail().unwrap();
    assert!((pass.end.x - 0.3).abs() < EPS);
    assert!((pass.length - 24.0).abs() < EPS);

    // Same normalized pass as the forward-pass example
    let v = ValuationPipeline::new(config).value_event(event);
    assert!((v.risk_adjusted_value - 0.055 / 1.45).abs() < EPS);
}
