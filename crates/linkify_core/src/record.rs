use std::fmt;

pub type RecordId = u64;

/// Title written into a record when its ingest pipeline fails.
pub const FAILURE_TITLE: &str = "Failed to process";

/// Processing state of a submitted link.
///
/// `Pending` is part of the vocabulary but never observed in practice:
/// records enter the store already `Processing` because the pipeline is
/// enqueued in the same update step that creates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    #[default]
    Pending,
    Processing,
    Done,
    Failed,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LinkStatus::Pending => "pending",
            LinkStatus::Processing => "processing",
            LinkStatus::Done => "done",
            LinkStatus::Failed => "failed",
        })
    }
}

/// One submitted link and everything derived from it.
///
/// `status` is the single source of truth for whether `title`, `content`
/// and `summary` are trustworthy; while it is `Processing` they hold
/// their creation-time empty values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: RecordId,
    pub url: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub created_at: String,
    pub status: LinkStatus,
}

impl LinkRecord {
    /// Creates a fresh record for a normalized URL, already `Processing`.
    pub fn new(id: RecordId, url: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: String::new(),
            content: String::new(),
            summary: String::new(),
            created_at: created_at.into(),
            status: LinkStatus::Processing,
        }
    }
}

/// Pure input normalization: inputs without a scheme separator get
/// `https://` prepended, everything else passes through unchanged.
/// No validation happens here; garbage is caught later by the fetcher.
pub fn normalize_input(raw: &str) -> String {
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}
