//! Typed mutation requests.
//!
//! Every state change to a campaign travels as a [`MutationRequest`]: the
//! target campaign, an optional target character, one kind-specific parameter
//! set, and an optional human-readable reason. The kind is a closed tagged
//! union so validation can be exhaustive; on the wire the request stays flat:
//!
//! ```json
//! {"campaign_id": "embers", "char_id": "h1", "kind": "gold_delta",
//!  "amount": -15, "reason": "bribed the gate captain"}
//! ```

use serde::{Deserialize, Serialize};

use crate::quest::QuestStatus;

/// Kind-specific parameters of a mutation. One variant per mutation kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationKind {
    /// Add to (or subtract from) a character's gold.
    GoldDelta {
        /// Signed change. The resulting gold must stay >= 0.
        amount: i64,
    },
    /// Damage or heal a character.
    HpDelta {
        /// Signed change. The resulting hp must stay within [0, max].
        amount: i32,
    },
    /// Award experience to a character.
    XpDelta {
        /// Change. Must be >= 0 — experience is never taken away.
        amount: i64,
    },
    /// Add items to a character's inventory, merging by item name.
    InventoryAdd {
        /// Item name.
        item: String,
        /// How many to add. Must be >= 1.
        quantity: u32,
    },
    /// Remove items from a character's inventory.
    InventoryRemove {
        /// Item name.
        item: String,
        /// How many to remove. Must be >= 1 and covered by the stack.
        quantity: u32,
    },
    /// Create a quest, or update matching fields of an existing one.
    QuestUpsert {
        /// Quest identifier. Created on first reference.
        quest_id: String,
        /// New title. On create, defaults to the quest identifier.
        #[serde(default)]
        title: Option<String>,
        /// New status. On create, defaults to `active`.
        #[serde(default)]
        status: Option<QuestStatus>,
        /// New description/progress notes.
        #[serde(default)]
        notes: Option<String>,
    },
    /// Advance the campaign's day counter.
    AdvanceDay {
        /// How many days pass. Must be >= 1.
        days: u64,
    },
    /// Set the campaign's day counter to an absolute value.
    SetDay {
        /// The new day.
        day: u64,
    },
    /// Set the party's current location.
    SetLocation {
        /// Location description. Must be non-empty.
        location: String,
    },
    /// Append a note to a character (with `char_id`) or the campaign.
    NoteAppend {
        /// Note text. Must be non-empty.
        text: String,
    },
    /// Shift the party's reputation with a faction, creating it on first
    /// reference.
    FactionRepDelta {
        /// Faction identifier.
        faction_id: String,
        /// Display name. On create, defaults to the faction identifier.
        #[serde(default)]
        name: Option<String>,
        /// Signed reputation change.
        amount: i64,
    },
    /// Set (or replace) a freeform world-state flag.
    WorldFlagSet {
        /// Flag key. Must be non-empty.
        key: String,
        /// Flag value, any JSON.
        value: serde_json::Value,
    },
}

impl MutationKind {
    /// The wire name of this kind, as it appears in requests and the log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoldDelta { .. } => "gold_delta",
            Self::HpDelta { .. } => "hp_delta",
            Self::XpDelta { .. } => "xp_delta",
            Self::InventoryAdd { .. } => "inventory_add",
            Self::InventoryRemove { .. } => "inventory_remove",
            Self::QuestUpsert { .. } => "quest_upsert",
            Self::AdvanceDay { .. } => "advance_day",
            Self::SetDay { .. } => "set_day",
            Self::SetLocation { .. } => "set_location",
            Self::NoteAppend { .. } => "note_append",
            Self::FactionRepDelta { .. } => "faction_rep_delta",
            Self::WorldFlagSet { .. } => "world_flag_set",
        }
    }

    /// Returns true if this kind operates on a character and therefore
    /// requires `char_id` on the request.
    pub fn requires_character(&self) -> bool {
        matches!(
            self,
            Self::GoldDelta { .. }
                | Self::HpDelta { .. }
                | Self::XpDelta { .. }
                | Self::InventoryAdd { .. }
                | Self::InventoryRemove { .. }
        )
    }
}

/// A request to mutate one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    /// The target campaign.
    pub campaign_id: String,
    /// The target character, for character-scoped kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_id: Option<String>,
    /// What to change, and by how much.
    #[serde(flatten)]
    pub kind: MutationKind,
    /// Why, in the game master's words. Recorded in the log, never
    /// interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MutationRequest {
    /// Create a campaign-scoped request.
    pub fn new(campaign_id: impl Into<String>, kind: MutationKind) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            char_id: None,
            kind,
            reason: None,
        }
    }

    /// Create a character-scoped request.
    pub fn for_character(
        campaign_id: impl Into<String>,
        char_id: impl Into<String>,
        kind: MutationKind,
    ) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            char_id: Some(char_id.into()),
            kind,
            reason: None,
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
