use thiserror::Error;

#[derive(Error, Debug)]
pub enum WayfarerError {
    /// An edge referenced an unknown screen. Recovered by dropping the edge
    /// during graph construction; surfaced only when a caller asks for strict
    /// validation.
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    /// Session source or target id not present in the graph. The only fatal
    /// precondition — checked before any session begins.
    #[error("Unknown screen id: {0}")]
    UnknownScreen(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
