//! Batch analysis API.
//!
//! `analyze_batch` runs classifier → valuation → aggregation over an already
//! typed batch; `analyze_raw_batch` adds the ingestion step; and
//! `analyze_events_json` is the JSON entry point for hosts that only speak
//! strings. None of them fail because of a single bad event: every skip is
//! counted in [`BatchSummary`].

use crate::aggregation::{aggregate, GoalkeeperProfile};
use crate::classifier::EventClassifier;
use crate::config::ValuationConfig;
use crate::distribution::{summarize_distribution, DistributionSummary};
use crate::error::{Result, XtGkError};
use crate::event::{ingest, ingest_json_values, Event, IngestOutcome, RawEvent, SkippedEvent};
use crate::valuation::{ValuationPipeline, ValuedAction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Records handed to the batch, including ones skipped at ingestion
    pub received: usize,
    pub goalkeeper_events: usize,
    pub non_goalkeeper_dropped: usize,
    pub skipped_malformed: usize,
    /// Valued actions left out of profiles for lacking a player id
    pub unattributed_actions: usize,
    /// Goalkeeper events with a location off the unit pitch (clamped)
    pub clamped_coordinates: usize,
    pub skipped: Vec<SkippedEvent>,
    pub unattributed_event_ids: Vec<String>,
}

impl BatchSummary {
    /// Malformed records plus unattributed actions.
    pub fn total_skipped(&self) -> usize {
        self.skipped_malformed + self.unattributed_actions
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    /// One entry per goalkeeper event, in input order
    pub action_values: Vec<ValuedAction>,
    pub profiles: BTreeMap<u64, GoalkeeperProfile>,
    pub distribution: BTreeMap<u64, DistributionSummary>,
}

/// Analyze a typed batch.
///
/// Valuation runs in parallel; aggregation folds sequentially in input order
/// so repeated runs produce bit-identical totals.
pub fn analyze_batch(events: Vec<Event>, pipeline: &ValuationPipeline) -> BatchReport {
    let received = events.len();
    let classifier = EventClassifier::new(pipeline.config().classifier);
    let classified = classifier.filter_goalkeeper_events(events);

    let clamped_coordinates =
        classified.goalkeeper_events.iter().filter(|e| e.has_out_of_range_location()).count();
    if clamped_coordinates > 0 {
        warn!(clamped_coordinates, "Events with off-pitch locations clamped to edge zones");
    }

    let goalkeeper_events = classified.goalkeeper_events.len();
    let action_values = pipeline.value_batch_par(classified.goalkeeper_events);
    let aggregation = aggregate(&action_values);
    let distribution = summarize_distribution(action_values.iter().map(|a| &a.event), &classifier);

    let summary = BatchSummary {
        received,
        goalkeeper_events,
        non_goalkeeper_dropped: classified.non_goalkeeper_dropped,
        skipped_malformed: 0,
        unattributed_actions: aggregation.unattributed.len(),
        clamped_coordinates,
        skipped: Vec::new(),
        unattributed_event_ids: aggregation.unattributed.into_iter().map(|e| e.event_id).collect(),
    };

    info!(
        received = summary.received,
        goalkeeper_events = summary.goalkeeper_events,
        profiles = aggregation.profiles.len(),
        unattributed = summary.unattributed_actions,
        "Batch analyzed"
    );

    BatchReport { summary, action_values, profiles: aggregation.profiles, distribution }
}

/// Ingest raw records, then analyze whatever survived validation.
pub fn analyze_raw_batch(records: Vec<RawEvent>, pipeline: &ValuationPipeline) -> BatchReport {
    let ingested = ingest(records, pipeline.config());
    analyze_ingested(ingested, pipeline)
}

/// Analyze the output of the ingestion step, folding its skips into the summary.
pub fn analyze_ingested(ingested: IngestOutcome, pipeline: &ValuationPipeline) -> BatchReport {
    let IngestOutcome { events, skipped } = ingested;
    if !skipped.is_empty() {
        warn!(skipped = skipped.len(), "Malformed events skipped");
    }

    let mut report = analyze_batch(events, pipeline);
    report.summary.received += skipped.len();
    report.summary.skipped_malformed = skipped.len();
    report.summary.skipped = skipped;
    report
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub schema_version: u8,
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub config: Option<ValuationConfig>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub strategy: &'static str,
    #[serde(flatten)]
    pub report: BatchReport,
}

pub fn analyze_request(request: AnalyzeRequest) -> Result<AnalyzeResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(XtGkError::UnsupportedSchema(request.schema_version));
    }

    analyze_values(request.events, request.config.unwrap_or_default())
}

/// Validate `config`, ingest loosely typed records and stamp the report.
pub fn analyze_values(records: Vec<serde_json::Value>, config: ValuationConfig) -> Result<AnalyzeResponse> {
    config.validate()?;

    let pipeline = ValuationPipeline::new(config);
    let ingested = ingest_json_values(records, pipeline.config());
    let report = analyze_ingested(ingested, &pipeline);

    Ok(AnalyzeResponse {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        strategy: pipeline.strategy_name(),
        report,
    })
}

/// JSON entry point: request string in, report string out.
pub fn analyze_events_json(request_json: &str) -> std::result::Result<String, String> {
    let request: AnalyzeRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    let response = analyze_request(request).map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize report: {}", e))
}
