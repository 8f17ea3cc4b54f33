//! Linkify engine: the link ingestion pipeline and its background engine loop.
mod engine;
mod error;
mod extract;
mod fetch;
mod pipeline;
mod summarize;

pub use engine::{EngineConfig, EngineHandle, IngestEvent, RecordId};
pub use error::IngestError;
pub use extract::{DomExtractor, Extractor, PageText, STRIPPED_TAGS};
pub use fetch::{Fetcher, ReqwestFetcher};
pub use pipeline::{IngestOutcome, IngestPipeline, IngestStage, NullStageSink, StageSink};
pub use summarize::{OllamaSummarizer, SummarizeSettings, Summarizer};
