use crate::{LinkRecord, RecordId};

/// Side effects requested by `update`, applied by the platform on the
/// owning thread: store mutations and pipeline launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    InsertRecord(LinkRecord),
    UpdateRecord(LinkRecord),
    DeleteRecord(RecordId),
    EnqueueIngest { record_id: RecordId, url: String },
}
