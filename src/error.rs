use thiserror::Error;

/// Why a pipeline stage did not produce a usable result.
///
/// Every variant is recoverable: the session prints it and moves on.
#[derive(Debug, Error)]
pub enum Failure {
    /// Network error, timeout, non-success HTTP status or an undecodable body.
    #[error("request failed: {0}")]
    Request(String),

    /// The API answered with an empty result list.
    #[error("no country matched '{0}'")]
    NotFound(String),

    /// A required field is absent or has the wrong shape.
    #[error("unexpected record shape: {0}")]
    SchemaMismatch(String),

    /// Nothing to work on (no record, or an empty country name).
    #[error("missing input")]
    MissingInput,

    /// Writing the output log failed.
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Tag-only view of [`Failure`], handy for matching and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RequestError,
    NotFound,
    SchemaMismatch,
    MissingInput,
    IoError,
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Request(_) => FailureKind::RequestError,
            Failure::NotFound(_) => FailureKind::NotFound,
            Failure::SchemaMismatch(_) => FailureKind::SchemaMismatch,
            Failure::MissingInput => FailureKind::MissingInput,
            Failure::Io(_) => FailureKind::IoError,
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Failure::Request(format!("timed out: {e}"))
        } else {
            Failure::Request(e.to_string())
        }
    }
}
