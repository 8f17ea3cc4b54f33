use crate::{LinkRecord, RecordId};

/// Stage outputs delivered when an ingest pipeline finishes successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSuccess {
    pub title: String,
    pub content: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current input. The platform supplies the clock
    /// reading so the core stays free of wall-time dependencies.
    LinkSubmitted { submitted_at_utc: String },
    /// Engine finished the ingest pipeline for a record, one way or the other.
    IngestFinished {
        record_id: RecordId,
        result: Result<IngestSuccess, String>,
    },
    /// User asked to delete a record.
    DeleteClicked { record_id: RecordId },
    /// Restore records loaded from the persisted store at startup.
    RestoreRecords(Vec<LinkRecord>),
    /// Fallback for placeholder wiring.
    NoOp,
}
