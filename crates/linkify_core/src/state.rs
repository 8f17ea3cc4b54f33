use crate::msg::IngestSuccess;
use crate::view_model::{AppViewModel, RecordRowView};
use crate::{LinkRecord, LinkStatus, RecordId, FAILURE_TITLE};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    records: Vec<LinkRecord>,
    next_id: RecordId,
    last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            rows: self.records.iter().map(RecordRowView::from_record).collect(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    /// Consumes the current input for submission. Returns `None` when the
    /// trimmed input is empty, leaving the state untouched.
    pub(crate) fn take_submission(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let raw = trimmed.to_string();
        self.input.clear();
        Some(raw)
    }

    pub(crate) fn create_record(&mut self, url: String, created_at: String) -> LinkRecord {
        let record = LinkRecord::new(self.next_id, url, created_at);
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    /// Applies a pipeline outcome to the owning record as one atomic
    /// field-group write. Returns the updated record, or `None` when the
    /// record was deleted while its pipeline was in flight.
    pub(crate) fn apply_finished(
        &mut self,
        record_id: RecordId,
        result: Result<IngestSuccess, String>,
    ) -> Option<LinkRecord> {
        let record = self.records.iter_mut().find(|r| r.id == record_id)?;
        match result {
            Ok(success) => {
                record.title = success.title;
                record.content = success.content;
                record.summary = success.summary;
                record.status = LinkStatus::Done;
            }
            Err(message) => {
                record.title = FAILURE_TITLE.to_string();
                record.summary = format!("Error: {message}");
                record.status = LinkStatus::Failed;
                self.last_error = Some(format!("Error: {message}"));
            }
        }
        Some(record.clone())
    }

    pub(crate) fn remove_record(&mut self, record_id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != record_id);
        self.records.len() != before
    }

    pub(crate) fn restore(&mut self, records: Vec<LinkRecord>) {
        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.records = records;
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }
}
