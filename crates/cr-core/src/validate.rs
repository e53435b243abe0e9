//! Precondition checks for mutation requests.
//!
//! Validation is pure: it inspects one campaign snapshot and one request and
//! either rejects the request or returns a [`ValidatedRequest`] carrying the
//! positions it resolved along the way. Every bound is enforced here — the
//! applier never clamps and never re-checks.

use crate::campaign::Campaign;
use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::mutation::{MutationKind, MutationRequest};

/// A request that passed validation against a specific campaign snapshot.
///
/// Holds the resolved character/quest/faction/item positions so that
/// [`apply`](crate::apply::apply) is total. Only meaningful for the snapshot
/// it was validated against.
#[derive(Debug)]
pub struct ValidatedRequest<'a> {
    pub(crate) request: &'a MutationRequest,
    pub(crate) character: Option<usize>,
    pub(crate) quest: Option<usize>,
    pub(crate) faction: Option<usize>,
    pub(crate) item: Option<usize>,
}

impl ValidatedRequest<'_> {
    /// The underlying request.
    pub fn request(&self) -> &MutationRequest {
        self.request
    }
}

/// Check a mutation request against the current campaign snapshot.
///
/// Returns [`CoreError::CharacterNotFound`] when the request references a
/// character the campaign does not have, and [`CoreError::InvalidState`] when
/// a kind-specific precondition is violated (negative resulting gold, hp
/// outside its bounds, removing more items than held, ...). Never mutates
/// the snapshot.
pub fn validate<'a>(
    campaign: &Campaign,
    request: &'a MutationRequest,
) -> CoreResult<ValidatedRequest<'a>> {
    let character = match &request.char_id {
        Some(id) => Some(campaign.character_index(id).ok_or_else(|| {
            CoreError::CharacterNotFound {
                campaign: campaign.id.clone(),
                character: id.clone(),
            }
        })?),
        None => None,
    };

    let mut validated = ValidatedRequest {
        request,
        character,
        quest: None,
        faction: None,
        item: None,
    };

    match &request.kind {
        MutationKind::GoldDelta { amount } => {
            let ch = target_character(campaign, character, &request.kind)?;
            let next = ch
                .gold
                .checked_add(*amount)
                .ok_or_else(|| invalid(&request.kind, format!("gold change {amount} overflows")))?;
            if next < 0 {
                return Err(invalid(
                    &request.kind,
                    format!("gold for \"{}\" would drop to {next}", ch.id),
                ));
            }
        }

        MutationKind::HpDelta { amount } => {
            let ch = target_character(campaign, character, &request.kind)?;
            let next = ch
                .hp
                .current
                .checked_add(*amount)
                .ok_or_else(|| invalid(&request.kind, format!("hp change {amount} overflows")))?;
            if next < 0 || next > ch.hp.max {
                return Err(invalid(
                    &request.kind,
                    format!(
                        "hp for \"{}\" would become {next}, outside [0, {}]",
                        ch.id, ch.hp.max
                    ),
                ));
            }
        }

        MutationKind::XpDelta { amount } => {
            let ch = target_character(campaign, character, &request.kind)?;
            if *amount < 0 {
                return Err(invalid(
                    &request.kind,
                    format!("xp change {amount} is negative; experience is never taken away"),
                ));
            }
            ch.xp
                .checked_add(*amount as u64)
                .ok_or_else(|| invalid(&request.kind, format!("xp change {amount} overflows")))?;
        }

        MutationKind::InventoryAdd { item, quantity } => {
            let ch = target_character(campaign, character, &request.kind)?;
            if *quantity == 0 {
                return Err(invalid(&request.kind, "quantity must be at least 1"));
            }
            validated.item = ch.inventory.iter().position(|s| s.name == *item);
            if let Some(i) = validated.item {
                ch.inventory[i].quantity.checked_add(*quantity).ok_or_else(|| {
                    invalid(
                        &request.kind,
                        format!("stack of \"{item}\" overflows adding {quantity}"),
                    )
                })?;
            }
        }

        MutationKind::InventoryRemove { item, quantity } => {
            let ch = target_character(campaign, character, &request.kind)?;
            if *quantity == 0 {
                return Err(invalid(&request.kind, "quantity must be at least 1"));
            }
            let index = ch
                .inventory
                .iter()
                .position(|s| s.name == *item)
                .ok_or_else(|| {
                    invalid(
                        &request.kind,
                        format!("\"{}\" carries no \"{item}\"", ch.id),
                    )
                })?;
            let held = ch.inventory[index].quantity;
            if held < *quantity {
                return Err(invalid(
                    &request.kind,
                    format!("\"{}\" holds {held} of \"{item}\", cannot remove {quantity}", ch.id),
                ));
            }
            validated.item = Some(index);
        }

        MutationKind::QuestUpsert { quest_id, .. } => {
            if quest_id.trim().is_empty() {
                return Err(invalid(&request.kind, "quest_id must not be empty"));
            }
            validated.quest = campaign.quest_index(quest_id);
        }

        MutationKind::AdvanceDay { days } => {
            if *days == 0 {
                return Err(invalid(&request.kind, "days must be at least 1"));
            }
            campaign.day.checked_add(*days).ok_or_else(|| {
                invalid(&request.kind, format!("day counter overflows advancing {days}"))
            })?;
        }

        MutationKind::SetDay { .. } => {}

        MutationKind::SetLocation { location } => {
            if location.trim().is_empty() {
                return Err(invalid(&request.kind, "location must not be empty"));
            }
        }

        MutationKind::NoteAppend { text } => {
            if text.trim().is_empty() {
                return Err(invalid(&request.kind, "text must not be empty"));
            }
        }

        MutationKind::FactionRepDelta {
            faction_id, amount, ..
        } => {
            if faction_id.trim().is_empty() {
                return Err(invalid(&request.kind, "faction_id must not be empty"));
            }
            validated.faction = campaign.faction_index(faction_id);
            if let Some(i) = validated.faction {
                campaign.factions[i].reputation.checked_add(*amount).ok_or_else(|| {
                    invalid(
                        &request.kind,
                        format!("reputation change {amount} overflows"),
                    )
                })?;
            }
        }

        MutationKind::WorldFlagSet { key, .. } => {
            if key.trim().is_empty() {
                return Err(invalid(&request.kind, "key must not be empty"));
            }
        }
    }

    Ok(validated)
}

/// Resolve the character a character-scoped kind operates on.
fn target_character<'c>(
    campaign: &'c Campaign,
    index: Option<usize>,
    kind: &MutationKind,
) -> CoreResult<&'c Character> {
    index
        .map(|i| &campaign.characters[i])
        .ok_or_else(|| invalid(kind, "char_id is required"))
}

fn invalid(kind: &MutationKind, detail: impl Into<String>) -> CoreError {
    CoreError::InvalidState {
        mutation: kind.name(),
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ItemStack;
    use crate::quest::Quest;

    fn test_campaign() -> Campaign {
        let mut campaign = Campaign::new("embers", "The Ember Road");
        let mut brynn = Character::new("h1", "Brynn Oakshield", 10);
        brynn.gold = 10;
        brynn.hp.current = 5;
        brynn.inventory.push(ItemStack::new("torch", 2));
        campaign.characters.push(brynn);
        campaign.quests.push(Quest::new("q1", "Reach Duskhaven"));
        campaign
    }

    fn gold(amount: i64) -> MutationRequest {
        MutationRequest::for_character("embers", "h1", MutationKind::GoldDelta { amount })
    }

    #[test]
    fn gold_within_bounds_passes() {
        let campaign = test_campaign();
        assert!(validate(&campaign, &gold(-10)).is_ok());
        assert!(validate(&campaign, &gold(100)).is_ok());
    }

    #[test]
    fn gold_overdraw_rejected() {
        let campaign = test_campaign();
        let err = validate(&campaign, &gold(-15)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { mutation: "gold_delta", .. }));
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn unknown_character_is_not_found() {
        let campaign = test_campaign();
        let request =
            MutationRequest::for_character("embers", "h9", MutationKind::GoldDelta { amount: 1 });
        let err = validate(&campaign, &request).unwrap_err();
        assert!(matches!(err, CoreError::CharacterNotFound { .. }));
        assert!(err.to_string().contains("h9"));
        assert!(err.to_string().contains("embers"));
    }

    #[test]
    fn missing_char_id_rejected_for_character_kinds() {
        let campaign = test_campaign();
        let request = MutationRequest::new("embers", MutationKind::HpDelta { amount: 1 });
        let err = validate(&campaign, &request).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { mutation: "hp_delta", .. }));
        assert!(err.to_string().contains("char_id"));
    }

    #[test]
    fn hp_stays_within_bounds() {
        let campaign = test_campaign();
        let heal =
            MutationRequest::for_character("embers", "h1", MutationKind::HpDelta { amount: 5 });
        assert!(validate(&campaign, &heal).is_ok());

        let overheal =
            MutationRequest::for_character("embers", "h1", MutationKind::HpDelta { amount: 6 });
        assert!(validate(&campaign, &overheal).is_err());

        let overkill =
            MutationRequest::for_character("embers", "h1", MutationKind::HpDelta { amount: -6 });
        let err = validate(&campaign, &overkill).unwrap_err();
        assert!(err.to_string().contains("outside [0, 10]"));
    }

    #[test]
    fn negative_xp_rejected() {
        let campaign = test_campaign();
        let request =
            MutationRequest::for_character("embers", "h1", MutationKind::XpDelta { amount: -5 });
        let err = validate(&campaign, &request).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { mutation: "xp_delta", .. }));
    }

    #[test]
    fn inventory_add_zero_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::for_character(
            "embers",
            "h1",
            MutationKind::InventoryAdd {
                item: "rope".to_string(),
                quantity: 0,
            },
        );
        assert!(validate(&campaign, &request).is_err());
    }

    #[test]
    fn inventory_remove_missing_item_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::for_character(
            "embers",
            "h1",
            MutationKind::InventoryRemove {
                item: "rope".to_string(),
                quantity: 1,
            },
        );
        let err = validate(&campaign, &request).unwrap_err();
        assert!(err.to_string().contains("rope"));
    }

    #[test]
    fn inventory_remove_overdraw_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::for_character(
            "embers",
            "h1",
            MutationKind::InventoryRemove {
                item: "torch".to_string(),
                quantity: 3,
            },
        );
        let err = validate(&campaign, &request).unwrap_err();
        assert!(err.to_string().contains("holds 2"));
    }

    #[test]
    fn inventory_remove_resolves_stack() {
        let campaign = test_campaign();
        let request = MutationRequest::for_character(
            "embers",
            "h1",
            MutationKind::InventoryRemove {
                item: "torch".to_string(),
                quantity: 2,
            },
        );
        let validated = validate(&campaign, &request).unwrap();
        assert_eq!(validated.item, Some(0));
    }

    #[test]
    fn quest_upsert_resolves_existing() {
        let campaign = test_campaign();
        let request = MutationRequest::new(
            "embers",
            MutationKind::QuestUpsert {
                quest_id: "q1".to_string(),
                title: None,
                status: None,
                notes: None,
            },
        );
        let validated = validate(&campaign, &request).unwrap();
        assert_eq!(validated.quest, Some(0));
    }

    #[test]
    fn quest_upsert_new_id_passes_unresolved() {
        let campaign = test_campaign();
        let request = MutationRequest::new(
            "embers",
            MutationKind::QuestUpsert {
                quest_id: "q2".to_string(),
                title: Some("Cross the Weeping Pass".to_string()),
                status: None,
                notes: None,
            },
        );
        let validated = validate(&campaign, &request).unwrap();
        assert_eq!(validated.quest, None);
    }

    #[test]
    fn advance_day_zero_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::new("embers", MutationKind::AdvanceDay { days: 0 });
        assert!(validate(&campaign, &request).is_err());
    }

    #[test]
    fn empty_note_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::new(
            "embers",
            MutationKind::NoteAppend {
                text: "   ".to_string(),
            },
        );
        let err = validate(&campaign, &request).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { mutation: "note_append", .. }));
    }

    #[test]
    fn note_with_unknown_character_is_not_found() {
        // char_id is optional for note_append, but a present reference must
        // still resolve.
        let campaign = test_campaign();
        let request = MutationRequest::for_character(
            "embers",
            "h9",
            MutationKind::NoteAppend {
                text: "lost in the pass".to_string(),
            },
        );
        let err = validate(&campaign, &request).unwrap_err();
        assert!(matches!(err, CoreError::CharacterNotFound { .. }));
    }

    #[test]
    fn empty_location_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::new(
            "embers",
            MutationKind::SetLocation {
                location: String::new(),
            },
        );
        assert!(validate(&campaign, &request).is_err());
    }

    #[test]
    fn empty_flag_key_rejected() {
        let campaign = test_campaign();
        let request = MutationRequest::new(
            "embers",
            MutationKind::WorldFlagSet {
                key: String::new(),
                value: serde_json::Value::Bool(true),
            },
        );
        assert!(validate(&campaign, &request).is_err());
    }

    #[test]
    fn gold_overflow_rejected() {
        let mut campaign = test_campaign();
        campaign.characters[0].gold = i64::MAX;
        let err = validate(&campaign, &gold(1)).unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn validation_never_mutates_the_snapshot() {
        let campaign = test_campaign();
        let before = campaign.clone();
        let _ = validate(&campaign, &gold(-15));
        let _ = validate(&campaign, &gold(3));
        assert_eq!(campaign, before);
    }
}
