//! # Event Model
//!
//! Typed goalkeeper action records. An [`Event`] carries a mandatory common
//! subset (id, kind, start location, pressure flag) and, for passes, a
//! [`PassDetail`] inside the [`EventKind::Pass`] variant. Records are
//! validated once at the ingestion boundary (see [`raw`]); everything
//! downstream receives these values and never looks at untyped input.
//!
//! Coordinates are normalized to the unit pitch: `x` runs from the
//! goalkeeper's own goal line (0.0) to the attacking goal line (1.0), `y`
//! from one touchline to the other.

pub mod raw;

pub use raw::{
    ingest, ingest_json_values, IngestOutcome, RawEvent, RawNamed, RawPass, SkippedEvent,
};

use crate::config::PitchDimensions;
use crate::zone_grid;
use serde::{Deserialize, Serialize};

/// Display name used when the source omits a player or team name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Normalized pitch position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_in_range(&self) -> bool {
        zone_grid::is_in_range(self.x, self.y)
    }

    /// Distance to `other` in pitch units.
    pub fn distance_in(&self, other: &Location, pitch: &PitchDimensions) -> f64 {
        let dx = (other.x - self.x) * pitch.length;
        let dy = (other.y - self.y) * pitch.width;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassOutcome {
    Complete,
    Incomplete,
    Out,
}

impl PassOutcome {
    /// Map a source outcome name. Absent names mean a completed pass; any name
    /// other than "Incomplete" or "Out" is also read as completed.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("Incomplete") => PassOutcome::Incomplete,
            Some("Out") => PassOutcome::Out,
            _ => PassOutcome::Complete,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, PassOutcome::Incomplete | PassOutcome::Out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassDetail {
    pub end: Location,
    /// Length in pitch units
    pub length: f64,
    pub outcome: PassOutcome,
    /// Whether the source named any outcome. Completed passes carry none;
    /// names such as "Pass Offside" map to `Complete` but leave this set.
    #[serde(default)]
    pub outcome_recorded: bool,
}

impl PassDetail {
    /// Success as scouting reports count it: no outcome recorded at all.
    pub fn is_clean(&self) -> bool {
        !self.outcome_recorded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Pass(PassDetail),
    Other { name: String },
}

/// Role of the acting player, as reported by the source's position metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorRole {
    Goalkeeper,
    Outfield,
    #[default]
    Unknown,
}

impl ActorRole {
    pub fn from_position_name(name: Option<&str>) -> Self {
        match name {
            Some("Goalkeeper") => ActorRole::Goalkeeper,
            Some(_) => ActorRole::Outfield,
            None => ActorRole::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: Option<u64>,
    pub name: String,
}

/// A single validated action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub start: Location,
    pub under_pressure: bool,
    /// `None` when the source carried no player id; such events are valued
    /// but cannot be attributed to a profile.
    pub player: Option<PlayerRef>,
    pub team: Option<TeamRef>,
    pub role: ActorRole,
}

impl Event {
    /// A pass with its length measured on the default 105x68 pitch. Use
    /// [`Event::pass_on`] when working on a configured pitch.
    pub fn pass(id: impl Into<String>, start: Location, end: Location, outcome: PassOutcome) -> Self {
        Self::pass_on(id, start, end, outcome, &PitchDimensions::default())
    }

    /// A pass with its length measured on `pitch`. `Complete` means no
    /// outcome was recorded.
    pub fn pass_on(
        id: impl Into<String>,
        start: Location,
        end: Location,
        outcome: PassOutcome,
        pitch: &PitchDimensions,
    ) -> Self {
        let length = start.distance_in(&end, pitch);
        let detail = PassDetail { end, length, outcome, outcome_recorded: outcome.is_failure() };
        Self::with_kind(id, EventKind::Pass(detail), start)
    }

    pub fn other(id: impl Into<String>, name: impl Into<String>, start: Location) -> Self {
        Self::with_kind(id, EventKind::Other { name: name.into() }, start)
    }

    fn with_kind(id: impl Into<String>, kind: EventKind, start: Location) -> Self {
        Self {
            id: id.into(),
            kind,
            start,
            under_pressure: false,
            player: None,
            team: None,
            role: ActorRole::Goalkeeper,
        }
    }

    pub fn under_pressure(mut self, under_pressure: bool) -> Self {
        self.under_pressure = under_pressure;
        self
    }

    pub fn by_player(mut self, id: u64, name: impl Into<String>) -> Self {
        self.player = Some(PlayerRef { id, name: name.into() });
        self
    }

    pub fn for_team(mut self, id: Option<u64>, name: impl Into<String>) -> Self {
        self.team = Some(TeamRef { id, name: name.into() });
        self
    }

    pub fn with_role(mut self, role: ActorRole) -> Self {
        self.role = role;
        self
    }

    pub fn is_pass(&self) -> bool {
        matches!(self.kind, EventKind::Pass(_))
    }

    pub fn pass_detail(&self) -> Option<&PassDetail> {
        match &self.kind {
            EventKind::Pass(detail) => Some(detail),
            EventKind::Other { .. } => None,
        }
    }

    pub fn player_id(&self) -> Option<u64> {
        self.player.as_ref().map(|p| p.id)
    }

    /// Whether the start or (for passes) end location lies off the unit pitch.
    pub fn has_out_of_range_location(&self) -> bool {
        !self.start.is_in_range() || self.pass_detail().is_some_and(|p| !p.end.is_in_range())
    }
}
