use std::sync::{mpsc, Arc};
use std::thread;

use linkify_logging::{link_error, link_info, link_warn};

use crate::pipeline::{IngestPipeline, IngestStage, StageSink};
use crate::{
    DomExtractor, IngestError, IngestOutcome, OllamaSummarizer, ReqwestFetcher, SummarizeSettings,
};

pub type RecordId = u64;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub summarize: SummarizeSettings,
}

enum EngineCommand {
    Enqueue { record_id: RecordId, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    StageChanged {
        record_id: RecordId,
        stage: IngestStage,
    },
    Completed {
        record_id: RecordId,
        result: Result<IngestOutcome, IngestError>,
    },
}

struct ChannelStageSink {
    record_id: RecordId,
    tx: mpsc::Sender<IngestEvent>,
}

impl StageSink for ChannelStageSink {
    fn stage(&self, stage: IngestStage) {
        let _ = self.tx.send(IngestEvent::StageChanged {
            record_id: self.record_id,
            stage,
        });
    }
}

/// Handle to the ingest engine running on a dedicated thread with its own
/// tokio runtime. Every enqueued record runs as one independently spawned
/// task; submissions never block each other and are never cancelled once
/// started.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> (Self, mpsc::Receiver<IngestEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = Arc::new(IngestPipeline::new(
            Arc::new(ReqwestFetcher::new()),
            Arc::new(DomExtractor),
            Arc::new(OllamaSummarizer::new(config.summarize)),
        ));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    link_error!("engine runtime failed to start: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let pipeline = pipeline.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&pipeline, command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn enqueue(&self, record_id: RecordId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Enqueue {
            record_id,
            url: url.into(),
        });
    }
}

async fn handle_command(
    pipeline: &IngestPipeline,
    command: EngineCommand,
    event_tx: mpsc::Sender<IngestEvent>,
) {
    match command {
        EngineCommand::Enqueue { record_id, url } => {
            link_info!("ingest start record_id={record_id} url={url}");
            let sink = ChannelStageSink {
                record_id,
                tx: event_tx.clone(),
            };
            let result = pipeline.run(&url, &sink).await;
            match &result {
                Ok(outcome) => link_info!(
                    "ingest done record_id={record_id} title_len={} content_len={}",
                    outcome.title.len(),
                    outcome.content.len()
                ),
                Err(err) => link_warn!("ingest failed record_id={record_id}: {err}"),
            }
            let _ = event_tx.send(IngestEvent::Completed { record_id, result });
        }
    }
}
