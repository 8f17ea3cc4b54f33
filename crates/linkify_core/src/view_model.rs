use crate::{LinkRecord, LinkStatus, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub rows: Vec<RecordRowView>,
    /// Ephemeral error line from the most recent failure; cleared by the
    /// next user action.
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    pub record_id: RecordId,
    /// Title when one is known, otherwise the URL itself.
    pub label: String,
    pub status: LinkStatus,
    pub created_at: String,
}

impl RecordRowView {
    pub(crate) fn from_record(record: &LinkRecord) -> Self {
        let label = if record.title.is_empty() {
            record.url.clone()
        } else {
            record.title.clone()
        };
        Self {
            record_id: record.id,
            label,
            status: record.status,
            created_at: record.created_at.clone(),
        }
    }
}
