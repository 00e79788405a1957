//! # xtgk_core - Expected Threat for Goalkeepers
//!
//! Converts goalkeeper match events into a decomposed, risk-adjusted xT-GK
//! value per action and folds those values into per-goalkeeper profiles.
//!
//! ## Pipeline
//! 1. `event::raw` validates source records into typed [`Event`]s
//! 2. [`EventClassifier`] keeps goalkeeper actions
//! 3. [`ValuationPipeline`] scores each action over a shared [`PitchZoneGrid`]
//! 4. `aggregation` groups the scores into [`GoalkeeperProfile`]s
//!
//! Every stage is a pure function of its input. The zone grid is the only
//! shared state and it is read-only, so valuation parallelizes freely.

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod aggregation;
pub mod api;
pub mod classifier;
pub mod config;
pub mod distribution;
pub mod error;
pub mod event;
pub mod valuation;
pub mod zone_grid;
pub mod zone_map;

pub use aggregation::{
    aggregate, aggregate_par, AggregationOutcome, GoalkeeperProfile, ProfileAggregator,
};
pub use api::{
    analyze_batch, analyze_events_json, analyze_ingested, analyze_raw_batch, analyze_request, analyze_values, AnalyzeRequest,
    AnalyzeResponse, BatchReport, BatchSummary, SCHEMA_VERSION,
};
pub use classifier::{ClassifiedEvents, EventClassifier, PassLength};
pub use config::ValuationConfig;
pub use distribution::{summarize_distribution, DistributionSummary};
pub use error::{AggregationKeyError, ConfigError, EventError, Result, XtGkError};
pub use event::{
    ActorRole, Event, EventKind, Location, PassDetail, PassOutcome, PlayerRef, RawEvent, TeamRef,
};
pub use valuation::{
    ActionValue, BaselineBuildUp, BuildUpStrategy, PossessionOutcome, PossessionSequence,
    ValuationPipeline, ValuedAction,
};
pub use zone_grid::PitchZoneGrid;
pub use zone_map::ZoneValueMap;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
