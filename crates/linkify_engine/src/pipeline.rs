use std::sync::Arc;

use crate::{Extractor, Fetcher, IngestError, Summarizer};

/// Final outputs of a fully successful ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub url: String,
    pub title: String,
    pub content: String,
    pub summary: String,
}

/// Stage markers emitted as a pipeline advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Fetching,
    Extracting,
    Summarizing,
}

pub trait StageSink: Send + Sync {
    fn stage(&self, stage: IngestStage);
}

/// Sink that drops progress, for callers that only want the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStageSink;

impl StageSink for NullStageSink {
    fn stage(&self, _stage: IngestStage) {}
}

/// Runs fetch -> extract -> summarize strictly in sequence, stopping at
/// the first failing stage. Input normalization happens upstream at
/// submission time; the fetcher's URL check is the safety net for
/// malformed results.
pub struct IngestPipeline {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    summarizer: Arc<dyn Summarizer>,
}

impl IngestPipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summarizer,
        }
    }

    pub async fn run(
        &self,
        url: &str,
        sink: &dyn StageSink,
    ) -> Result<IngestOutcome, IngestError> {
        sink.stage(IngestStage::Fetching);
        let html = self.fetcher.fetch(url).await?;

        sink.stage(IngestStage::Extracting);
        let page = self.extractor.extract(&html)?;

        sink.stage(IngestStage::Summarizing);
        let summary = self.summarizer.summarize(&page.body, &page.title).await?;

        Ok(IngestOutcome {
            url: url.to_string(),
            title: page.title,
            content: page.body,
            summary,
        })
    }
}
