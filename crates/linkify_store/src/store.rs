use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use linkify_core::{LinkRecord, LinkStatus, RecordId, FAILURE_TITLE};
use linkify_logging::{link_error, link_info, link_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persist::write_atomic;

/// Summary written into records found still `Processing` at load time,
/// i.e. pipelines cut short by a previous shutdown.
const INTERRUPTED_SUMMARY: &str = "Error: interrupted before completion";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file unreadable: {0}")]
    Unreadable(String),
    #[error("store file corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum PersistedStatus {
    Pending,
    Processing,
    Done,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedRecord {
    id: RecordId,
    url: String,
    title: String,
    content: String,
    summary: String,
    created_at: String,
    status: PersistedStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedStore {
    records: Vec<PersistedRecord>,
}

/// Record table backing the UI: an in-memory list in insertion order,
/// mirrored to a RON file after every mutation.
///
/// All mutation happens on the owning thread; subscribers on other
/// threads only ever see complete snapshots, so a record mid-update is
/// never observable.
pub struct LinkStore {
    path: PathBuf,
    records: Vec<LinkRecord>,
    subscribers: Vec<mpsc::Sender<Vec<LinkRecord>>>,
}

impl LinkStore {
    /// Opens (or creates) the store at `path`. An unreadable or corrupt
    /// file is an error; callers treat that as fatal at startup rather
    /// than running against state they cannot trust.
    ///
    /// Records still `Processing` in the file belong to pipelines that
    /// never finished before the last shutdown; they are marked `Failed`
    /// here so stale progress is never shown.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                link_info!("no store file at {path:?}, starting empty");
                return Ok(Self {
                    path: path.to_path_buf(),
                    records: Vec::new(),
                    subscribers: Vec::new(),
                });
            }
            Err(err) => return Err(StoreError::Unreadable(err.to_string())),
        };

        let persisted: PersistedStore =
            ron::from_str(&content).map_err(|err| StoreError::Corrupt(err.to_string()))?;

        let mut interrupted = 0usize;
        let records: Vec<LinkRecord> = persisted
            .records
            .into_iter()
            .map(|record| {
                let mut record = restore_record(record);
                if record.status == LinkStatus::Processing {
                    record.status = LinkStatus::Failed;
                    record.title = FAILURE_TITLE.to_string();
                    record.summary = INTERRUPTED_SUMMARY.to_string();
                    interrupted += 1;
                }
                record
            })
            .collect();

        let store = Self {
            path: path.to_path_buf(),
            records,
            subscribers: Vec::new(),
        };
        if interrupted > 0 {
            link_warn!("marked {interrupted} interrupted record(s) as failed");
            store.persist();
        }
        link_info!("loaded {} record(s) from {path:?}", store.records.len());
        Ok(store)
    }

    pub fn insert(&mut self, record: LinkRecord) {
        self.records.push(record);
        self.persist();
        self.notify();
    }

    /// Replaces the stored record with the same id. Unknown ids are
    /// dropped silently; the record was deleted while its pipeline ran.
    pub fn update(&mut self, record: LinkRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => return,
        }
        self.persist();
        self.notify();
    }

    pub fn delete(&mut self, record_id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != record_id);
        if self.records.len() == before {
            return false;
        }
        self.persist();
        self.notify();
        true
    }

    pub fn query_all(&self) -> Vec<LinkRecord> {
        self.records.clone()
    }

    /// Registers a subscriber that receives the full record snapshot
    /// after every mutation. Dropped receivers are pruned on the next
    /// notification.
    pub fn subscribe(&mut self) -> mpsc::Receiver<Vec<LinkRecord>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self) {
        let snapshot = self.records.clone();
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }

    /// Mirrors the table to disk. Write failures are logged, not raised:
    /// the in-memory state stays authoritative for the session and a
    /// user mutation must not fail on a persistence hiccup.
    fn persist(&self) {
        let state = PersistedStore {
            records: self.records.iter().map(persist_record).collect(),
        };
        let content = match ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new()) {
            Ok(text) => text,
            Err(err) => {
                link_error!("failed to serialize store: {err}");
                return;
            }
        };
        if let Err(err) = write_atomic(&self.path, &content) {
            link_error!("failed to write store to {:?}: {err}", self.path);
        }
    }
}

fn persist_record(record: &LinkRecord) -> PersistedRecord {
    PersistedRecord {
        id: record.id,
        url: record.url.clone(),
        title: record.title.clone(),
        content: record.content.clone(),
        summary: record.summary.clone(),
        created_at: record.created_at.clone(),
        status: match record.status {
            LinkStatus::Pending => PersistedStatus::Pending,
            LinkStatus::Processing => PersistedStatus::Processing,
            LinkStatus::Done => PersistedStatus::Done,
            LinkStatus::Failed => PersistedStatus::Failed,
        },
    }
}

fn restore_record(record: PersistedRecord) -> LinkRecord {
    LinkRecord {
        id: record.id,
        url: record.url,
        title: record.title,
        content: record.content,
        summary: record.summary,
        created_at: record.created_at,
        status: match record.status {
            PersistedStatus::Pending => LinkStatus::Pending,
            PersistedStatus::Processing => LinkStatus::Processing,
            PersistedStatus::Done => LinkStatus::Done,
            PersistedStatus::Failed => LinkStatus::Failed,
        },
    }
}
