//! Persistence for Chronist: campaign store, event log, and the ledger.
//!
//! This crate owns everything that touches disk. [`CampaignStore`] keeps one
//! JSON document per campaign and replaces it atomically on save.
//! [`EventLog`] appends one JSON line per record and never rewrites history.
//! [`Ledger`] ties the two together with the mutation engine from `cr-core`,
//! serializing all mutations against one campaign behind a per-campaign lock.

/// Error types used throughout the crate.
pub mod error;
/// The mutation pipeline and read-only query layer.
pub mod ledger;
/// The append-only journal of mutations and TODO notes.
pub mod log;
/// Durable storage of campaign documents.
pub mod store;

/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export the ledger facade.
pub use ledger::Ledger;
/// Re-export event log types.
pub use log::{EventLog, LogEntry, LogKind, LogPayload, TodoNote};
/// Re-export campaign storage types.
pub use store::{CampaignStore, CampaignSummary};
