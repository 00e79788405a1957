//! Ingestion boundary for StatsBomb-style event records.
//!
//! Every field is optional here. [`RawEvent::into_event`] is the single place
//! where absence is either rejected or replaced by a documented default:
//!
//! | field                | when absent                                        |
//! |----------------------|----------------------------------------------------|
//! | `id`                 | malformed                                          |
//! | `type.name`          | malformed                                          |
//! | `location`           | malformed                                          |
//! | `pass.end_location`  | malformed (Pass only)                              |
//! | `pass.outcome`       | `Complete`                                         |
//! | `pass.length`        | start→end distance in pitch units                  |
//! | `under_pressure`     | `false`, or malformed under `require_pressure_flag`|
//! | `player` / its `id`  | kept with `player: None`                           |
//! | `player.name`        | `"Unknown"`                                        |
//! | `team`               | `None`                                             |
//! | `position`           | `ActorRole::Unknown`                               |

use super::{ActorRole, Event, EventKind, Location, PassDetail, PassOutcome, PlayerRef, TeamRef, UNKNOWN_NAME};
use crate::config::ValuationConfig;
use crate::error::EventError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PASS_TYPE: &str = "Pass";
const MISSING_ID: &str = "<missing id>";

/// `{ "id": .., "name": .. }` pair used for types, outcomes, players, teams
/// and positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNamed {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawNamed {
    pub fn named(name: &str) -> Self {
        Self { id: None, name: Some(name.to_string()) }
    }

    pub fn identity(id: u64, name: &str) -> Self {
        Self { id: Some(id), name: Some(name.to_string()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPass {
    #[serde(default)]
    pub end_location: Option<Vec<f64>>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub outcome: Option<RawNamed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: Option<RawNamed>,
    /// `[x, y]` in pitch units; extra elements (e.g. height) are ignored
    #[serde(default)]
    pub location: Option<Vec<f64>>,
    #[serde(default)]
    pub pass: Option<RawPass>,
    #[serde(default)]
    pub under_pressure: Option<bool>,
    #[serde(default)]
    pub player: Option<RawNamed>,
    #[serde(default)]
    pub team: Option<RawNamed>,
    #[serde(default)]
    pub position: Option<RawNamed>,
}

impl RawEvent {
    /// Validate and normalize into a typed [`Event`].
    pub fn into_event(self, config: &ValuationConfig) -> Result<Event, EventError> {
        let Some(id) = self.id else {
            return Err(malformed(MISSING_ID, "id"));
        };

        let type_name = self
            .event_type
            .and_then(|t| t.name)
            .ok_or_else(|| malformed(&id, "type"))?;

        let raw_start = point(&id, self.location.as_deref(), "location")?;
        let start = normalize(raw_start, config);

        let under_pressure = match self.under_pressure {
            Some(flag) => flag,
            None if config.ingest.require_pressure_flag => {
                return Err(malformed(&id, "under_pressure"));
            }
            None => false,
        };

        let kind = if type_name == PASS_TYPE {
            let pass = self.pass.unwrap_or_default();
            let raw_end = point(&id, pass.end_location.as_deref(), "pass.end_location")?;
            let outcome_recorded =
                pass.outcome.as_ref().is_some_and(|o| o.id.is_some() || o.name.is_some());
            let outcome_name = pass.outcome.and_then(|o| o.name);
            let outcome = PassOutcome::from_name(outcome_name.as_deref());
            if let Some(name) = outcome_name.as_deref() {
                if !outcome.is_failure() {
                    debug!(event_id = %id, outcome = name, "Pass outcome read as complete");
                }
            }
            let length = match pass.length {
                Some(l) if l.is_finite() => l,
                _ => {
                    let dx = raw_end.0 - raw_start.0;
                    let dy = raw_end.1 - raw_start.1;
                    (dx * dx + dy * dy).sqrt()
                }
            };
            EventKind::Pass(PassDetail {
                end: normalize(raw_end, config),
                length,
                outcome,
                outcome_recorded,
            })
        } else {
            EventKind::Other { name: type_name }
        };

        let player = self.player.and_then(|p| {
            p.id.map(|pid| PlayerRef { id: pid, name: p.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()) })
        });

        let team = self.team.map(|t| TeamRef {
            id: t.id,
            name: t.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        });

        let role = ActorRole::from_position_name(self.position.as_ref().and_then(|p| p.name.as_deref()));

        Ok(Event { id, kind, start, under_pressure, player, team, role })
    }
}

/// A record rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEvent {
    /// Position of the record in the input batch
    pub index: usize,
    pub event_id: String,
    pub reason: String,
}

impl SkippedEvent {
    fn new(index: usize, error: &EventError) -> Self {
        Self { index, event_id: error.event_id().to_string(), reason: error.to_string() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub events: Vec<Event>,
    pub skipped: Vec<SkippedEvent>,
}

/// Validate a batch of raw records. Bad records are skipped and reported.
pub fn ingest<I>(records: I, config: &ValuationConfig) -> IngestOutcome
where
    I: IntoIterator<Item = RawEvent>,
{
    let mut outcome = IngestOutcome::default();
    for (index, record) in records.into_iter().enumerate() {
        match record.into_event(config) {
            Ok(event) => outcome.events.push(event),
            Err(err) => {
                debug!(index, error = %err, "Skipping malformed event");
                outcome.skipped.push(SkippedEvent::new(index, &err));
            }
        }
    }
    outcome
}

/// Like [`ingest`], but starting from loosely typed JSON so that one record
/// with a wrongly typed field does not fail the whole batch.
pub fn ingest_json_values<I>(values: I, config: &ValuationConfig) -> IngestOutcome
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut outcome = IngestOutcome::default();
    for (index, value) in values.into_iter().enumerate() {
        let id = value.get("id").and_then(|v| v.as_str()).unwrap_or(MISSING_ID).to_string();
        let parsed = serde_json::from_value::<RawEvent>(value)
            .map_err(|_| malformed(&id, "record"))
            .and_then(|raw| raw.into_event(config));
        match parsed {
            Ok(event) => outcome.events.push(event),
            Err(err) => {
                debug!(index, error = %err, "Skipping malformed event");
                outcome.skipped.push(SkippedEvent::new(index, &err));
            }
        }
    }
    outcome
}

fn malformed(event_id: &str, field: &'static str) -> EventError {
    EventError::Malformed { event_id: event_id.to_string(), field }
}

fn point(event_id: &str, raw: Option<&[f64]>, field: &'static str) -> Result<(f64, f64), EventError> {
    match raw {
        Some([x, y, ..]) => {
            if x.is_finite() && y.is_finite() {
                Ok((*x, *y))
            } else {
                Err(EventError::InvalidCoordinate { event_id: event_id.to_string(), field })
            }
        }
        _ => Err(malformed(event_id, field)),
    }
}

fn normalize((x, y): (f64, f64), config: &ValuationConfig) -> Location {
    Location::new(x / config.pitch.length, y / config.pitch.width)
}
