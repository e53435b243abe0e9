//! The append-only journal of mutations and TODO notes.
//!
//! Every applied mutation and every recorded TODO becomes one JSON line in a
//! single journal file. Entries are stamped with a server-assigned timestamp
//! and identifier at append time; nothing ever updates or deletes a line.
//! Append order is the total order.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cr_core::MutationRequest;

use crate::error::{StoreError, StoreResult};

/// A development TODO noted by the game master (or the AI running the table).
///
/// TODOs are the degenerate mutation: they only ever reach the journal and
/// never touch a campaign document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoNote {
    /// One-line summary.
    pub summary: String,
    /// Longer description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Freeform tags for later triage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// The campaign this TODO concerns, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    /// The character this TODO concerns, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_id: Option<String>,
}

impl TodoNote {
    /// Create a TODO with just a summary.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            details: None,
            tags: Vec::new(),
            campaign_id: None,
            char_id: None,
        }
    }

    /// Attach a longer description.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Scope the TODO to a campaign.
    pub fn for_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }
}

/// The payload of a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogPayload {
    /// An applied mutation, recorded verbatim.
    Mutation(MutationRequest),
    /// A TODO note.
    Todo(TodoNote),
}

impl LogPayload {
    /// The campaign this entry concerns, if any.
    pub fn campaign_id(&self) -> Option<&str> {
        match self {
            Self::Mutation(request) => Some(&request.campaign_id),
            Self::Todo(note) => note.campaign_id.as_deref(),
        }
    }
}

/// Which payload variants to keep when reading the journal back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Applied mutations.
    Mutation,
    /// TODO notes.
    Todo,
}

/// One immutable journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Identifier assigned at append time.
    pub id: Uuid,
    /// Timestamp assigned at append time.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// What happened.
    #[serde(flatten)]
    pub payload: LogPayload,
}

impl LogEntry {
    /// The kind of this entry.
    pub fn kind(&self) -> LogKind {
        match self.payload {
            LogPayload::Mutation(_) => LogKind::Mutation,
            LogPayload::Todo(_) => LogKind::Todo,
        }
    }
}

/// A JSON-lines journal file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Create a log backed by the given file. The file and its parent
    /// directories are created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The journal file this log appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, stamping it with the current time and a fresh
    /// identifier. Returns the entry as written.
    ///
    /// Failures are reported to the caller and never retried here — whether
    /// the owning operation still counts as committed is the caller's call.
    pub fn append(&self, payload: LogPayload) -> StoreResult<LogEntry> {
        let entry = LogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        };
        let mut line = serde_json::to_string(&entry).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Storage {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Storage {
                path: self.path.clone(),
                source,
            })?;
        // One write per entry: appends from different campaigns must not
        // interleave partial lines.
        file.write_all(line.as_bytes())
            .map_err(|source| StoreError::Storage {
                path: self.path.clone(),
                source,
            })?;

        Ok(entry)
    }

    /// Read the last `limit` entries, newest first, optionally filtered by
    /// kind.
    ///
    /// Lines that do not decode as entries are skipped: the journal tolerates
    /// foreign lines on read, while campaign documents do not.
    pub fn recent(&self, limit: usize, kind: Option<LogKind>) -> StoreResult<Vec<LogEntry>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Storage {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut entries: Vec<LogEntry> = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .filter(|entry: &LogEntry| kind.is_none_or(|k| entry.kind() == k))
            .collect();

        let start = entries.len().saturating_sub(limit);
        entries.drain(..start);
        entries.reverse();
        Ok(entries)
    }
}
