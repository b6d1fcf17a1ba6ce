use thiserror::Error;

/// A read or write against the local document store failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// User input rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title is empty")]
    EmptyTitle,
    #[error("no time selected")]
    MissingHour,
    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidHour(String),
    #[error("invalid date `{0}`, expected DD/MM/YYYY")]
    InvalidDate(String),
    #[error("invalid color `{0}`, expected #RGB or #RRGGBB")]
    InvalidColor(String),
    #[error("no category selected")]
    MissingCategory,
    #[error("{date} {hour} is in the past")]
    InPast { date: String, hour: String },
    #[error("user name must be between 1 and 7 characters")]
    InvalidUserName,
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
