//! The mutation pipeline and read-only query layer.
//!
//! [`Ledger`] is the one entry point for changing campaign state: it loads
//! the current snapshot, validates the request against it, applies the
//! transition, persists the new document, and appends the journal record —
//! all while holding that campaign's lock, so concurrent mutations against
//! one campaign can never interleave their read-modify-write cycles.
//! Mutations against different campaigns share nothing and proceed in
//! parallel.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use cr_core::{Campaign, Character, CoreError, MutationRequest, apply, validate};

use crate::error::{StoreError, StoreResult};
use crate::log::{EventLog, LogEntry, LogKind, LogPayload, TodoNote};
use crate::store::{CampaignStore, CampaignSummary};

/// The campaign ledger: validated mutations in, audited state out.
#[derive(Debug)]
pub struct Ledger {
    store: CampaignStore,
    log: EventLog,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Ledger {
    /// Open a ledger rooted at a directory: campaign documents live under
    /// `<root>/campaigns/`, the journal at `<root>/logs.jsonl`.
    pub fn open(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(
            CampaignStore::new(root.join("campaigns")),
            EventLog::new(root.join("logs.jsonl")),
        )
    }

    /// Build a ledger from its parts.
    pub fn new(store: CampaignStore, log: EventLog) -> Self {
        Self {
            store,
            log,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying campaign store.
    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    /// The underlying event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The lock guarding one campaign's read-modify-write cycle.
    fn campaign_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id.to_string()).or_default())
    }

    /// Run one mutation to completion: load, validate, apply, save, log.
    ///
    /// Returns the new campaign document. On any failure before the save,
    /// disk state is untouched and nothing is logged. If the journal append
    /// itself fails after a successful save, the error is surfaced and the
    /// caller decides whether the mutation counts as committed.
    pub fn mutate(&self, request: MutationRequest) -> StoreResult<Campaign> {
        let lock = self.campaign_lock(&request.campaign_id);
        let _held = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let snapshot = self.store.load(&request.campaign_id)?;
        let validated = validate(&snapshot, &request)?;
        let next = apply(&snapshot, &validated);
        self.store.save(&next)?;
        self.log.append(LogPayload::Mutation(request))?;
        Ok(next)
    }

    /// Record a TODO note in the journal. Never touches a campaign document.
    pub fn todo(&self, note: TodoNote) -> StoreResult<LogEntry> {
        self.log.append(LogPayload::Todo(note))
    }

    /// Persist a brand-new campaign document.
    pub fn create_campaign(&self, campaign: &Campaign) -> StoreResult<()> {
        let lock = self.campaign_lock(&campaign.id);
        let _held = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.create(campaign)
    }

    /// List all campaigns.
    pub fn campaigns(&self) -> StoreResult<Vec<CampaignSummary>> {
        self.store.list()
    }

    /// Fetch the latest persisted document for one campaign.
    pub fn campaign(&self, id: &str) -> StoreResult<Campaign> {
        self.store.load(id)
    }

    /// Fetch a single character.
    pub fn character(&self, campaign_id: &str, char_id: &str) -> StoreResult<Character> {
        let campaign = self.store.load(campaign_id)?;
        campaign
            .character(char_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Core(CoreError::CharacterNotFound {
                    campaign: campaign_id.to_string(),
                    character: char_id.to_string(),
                })
            })
    }

    /// Read the last `limit` journal entries, newest first, optionally
    /// filtered by kind.
    pub fn recent_log(&self, limit: usize, kind: Option<LogKind>) -> StoreResult<Vec<LogEntry>> {
        self.log.recent(limit, kind)
    }
}
