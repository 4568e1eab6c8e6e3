use crate::store::StoreError;

/// Errors from one ingest run.
#[derive(Debug)]
pub enum IngestError {
    Http(String),
    Csv(String),
    Store(StoreError),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Http(msg) => write!(f, "upstream fetch failed: {msg}"),
            IngestError::Csv(msg) => write!(f, "FIRMS csv rejected: {msg}"),
            IngestError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        IngestError::Http(err.to_string())
    }
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        IngestError::Store(err)
    }
}
