use thiserror::Error;

/// Flat failure taxonomy for the ingest pipeline. Each stage maps every
/// internal failure onto its single kind; sub-causes only survive in the
/// carried message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("page could not be parsed: {0}")]
    ParsingFailed(String),
    #[error("summary failed: {0}")]
    SummaryFailed(String),
}
