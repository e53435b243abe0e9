//! Core types for Chronist: campaign documents and the mutation engine.
//!
//! This crate defines the campaign data model and the pure half of the
//! ledger: typed mutation requests, validation against a campaign snapshot,
//! and deterministic application. It performs no I/O — persistence and the
//! append-only event log live in `cr-store`.

/// State-transition logic: compute the next campaign document.
pub mod apply;
/// The campaign document: day counter, characters, quests, factions, notes.
pub mod campaign;
/// Characters and their resources (gold, hit points, experience, inventory).
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Typed mutation requests and their kind-specific parameters.
pub mod mutation;
/// Quests and their status lifecycle.
pub mod quest;
/// Precondition checks run before any state change.
pub mod validate;

/// Re-export the applier entry point.
pub use apply::apply;
/// Re-export campaign document types.
pub use campaign::{Campaign, Faction};
/// Re-export character types.
pub use character::{Character, HitPoints, ItemStack};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export mutation request types.
pub use mutation::{MutationKind, MutationRequest};
/// Re-export quest types.
pub use quest::{Quest, QuestStatus};
/// Re-export validation types.
pub use validate::{ValidatedRequest, validate};
