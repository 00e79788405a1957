//! # Event Classifier
//!
//! Selects goalkeeper actions from a mixed event stream and tags passes as
//! short or long. The goalkeeper role comes from the source's position
//! metadata; nothing here infers it. Length classes are informational and
//! never feed the value formulas.

use crate::config::ClassifierConfig;
use crate::event::{ActorRole, Event};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassLength {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventClassifier {
    config: ClassifierConfig,
}

/// Result of filtering a batch down to goalkeeper actions.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedEvents {
    pub goalkeeper_events: Vec<Event>,
    /// Records dropped because the actor was not a goalkeeper
    pub non_goalkeeper_dropped: usize,
}

impl EventClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn is_goalkeeper_action(&self, event: &Event) -> bool {
        event.role == ActorRole::Goalkeeper
    }

    pub fn filter_goalkeeper_events<I>(&self, events: I) -> ClassifiedEvents
    where
        I: IntoIterator<Item = Event>,
    {
        let mut out = ClassifiedEvents::default();
        for event in events {
            if self.is_goalkeeper_action(&event) {
                out.goalkeeper_events.push(event);
            } else {
                out.non_goalkeeper_dropped += 1;
            }
        }
        out
    }

    /// `Short` below the threshold, `Long` at or above it.
    pub fn classify_pass_length(&self, length: f64) -> PassLength {
        if length < self.config.short_pass_threshold {
            PassLength::Short
        } else {
            PassLength::Long
        }
    }

    /// Length class of a pass event; `None` for anything else.
    pub fn pass_length_of(&self, event: &Event) -> Option<PassLength> {
        event.pass_detail().map(|p| self.classify_pass_length(p.length))
    }
}
