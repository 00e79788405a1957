use thiserror::Error;

/// Per-record failure raised while turning a raw event into a typed [`Event`].
///
/// None of these abort a batch. The caller records them and moves on.
///
/// [`Event`]: crate::event::Event
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Malformed event {event_id}: missing {field}")]
    Malformed { event_id: String, field: &'static str },

    #[error("Malformed event {event_id}: non-finite {field}")]
    InvalidCoordinate { event_id: String, field: &'static str },
}

impl EventError {
    pub fn event_id(&self) -> &str {
        match self {
            EventError::Malformed { event_id, .. } => event_id,
            EventError::InvalidCoordinate { event_id, .. } => event_id,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            EventError::Malformed { field, .. } => field,
            EventError::InvalidCoordinate { field, .. } => field,
        }
    }

    /// Every event-level failure is skip-and-continue.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// A valued action carried no player identity and cannot be grouped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Action {event_id} has no player identity")]
pub struct AggregationKeyError {
    pub event_id: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Config parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum XtGkError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    AggregationKey(#[from] AggregationKeyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, XtGkError>;
