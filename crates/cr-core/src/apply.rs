//! State-transition logic: compute the next campaign document.
//!
//! [`apply`] is the only place campaign state changes. It is a pure,
//! deterministic function of the snapshot and a validated request — no
//! clock, no randomness, integer arithmetic only. Because every bound was
//! checked by [`validate`](crate::validate::validate), application is total:
//! it cannot fail and cannot produce a document that violates the standing
//! invariants.

use crate::campaign::{Campaign, Faction};
use crate::character::ItemStack;
use crate::mutation::MutationKind;
use crate::quest::{Quest, QuestStatus};
use crate::validate::ValidatedRequest;

/// Apply a validated mutation to the snapshot it was validated against,
/// returning the next campaign document.
///
/// The snapshot must be the same one `validate` saw; the resolved positions
/// inside the [`ValidatedRequest`] are only meaningful for it.
pub fn apply(campaign: &Campaign, validated: &ValidatedRequest<'_>) -> Campaign {
    let mut next = campaign.clone();
    let request = validated.request();

    match &request.kind {
        MutationKind::GoldDelta { amount } => {
            if let Some(i) = validated.character {
                next.characters[i].gold += amount;
            }
        }

        MutationKind::HpDelta { amount } => {
            if let Some(i) = validated.character {
                next.characters[i].hp.current += amount;
            }
        }

        MutationKind::XpDelta { amount } => {
            if let Some(i) = validated.character {
                next.characters[i].xp += *amount as u64;
            }
        }

        MutationKind::InventoryAdd { item, quantity } => {
            if let Some(c) = validated.character {
                match validated.item {
                    Some(i) => next.characters[c].inventory[i].quantity += quantity,
                    None => next.characters[c]
                        .inventory
                        .push(ItemStack::new(item.clone(), *quantity)),
                }
            }
        }

        MutationKind::InventoryRemove { quantity, .. } => {
            if let (Some(c), Some(i)) = (validated.character, validated.item) {
                if next.characters[c].inventory[i].quantity == *quantity {
                    // Removing the full stack removes the entry entirely.
                    next.characters[c].inventory.remove(i);
                } else {
                    next.characters[c].inventory[i].quantity -= quantity;
                }
            }
        }

        MutationKind::QuestUpsert {
            quest_id,
            title,
            status,
            notes,
        } => match validated.quest {
            Some(i) => {
                let quest = &mut next.quests[i];
                if let Some(title) = title {
                    quest.title = title.clone();
                }
                if let Some(status) = status {
                    quest.status = *status;
                }
                if let Some(notes) = notes {
                    quest.notes = Some(notes.clone());
                }
            }
            None => {
                let mut quest = Quest::new(
                    quest_id.clone(),
                    title.clone().unwrap_or_else(|| quest_id.clone()),
                );
                quest.status = status.unwrap_or(QuestStatus::Active);
                quest.notes = notes.clone();
                next.quests.push(quest);
            }
        },

        MutationKind::AdvanceDay { days } => {
            next.day += days;
        }

        MutationKind::SetDay { day } => {
            next.day = *day;
        }

        MutationKind::SetLocation { location } => {
            next.location = Some(location.clone());
        }

        MutationKind::NoteAppend { text } => match validated.character {
            Some(i) => next.characters[i].notes.push(text.clone()),
            None => next.notes.push(text.clone()),
        },

        MutationKind::FactionRepDelta {
            faction_id,
            name,
            amount,
        } => match validated.faction {
            Some(i) => {
                let faction = &mut next.factions[i];
                faction.reputation += amount;
                if let Some(name) = name {
                    faction.name = name.clone();
                }
            }
            None => {
                let mut faction = Faction::new(
                    faction_id.clone(),
                    name.clone().unwrap_or_else(|| faction_id.clone()),
                );
                faction.reputation = *amount;
                next.factions.push(faction);
            }
        },

        MutationKind::WorldFlagSet { key, value } => {
            next.world_flags.insert(key.clone(), value.clone());
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::error::CoreError;
    use crate::mutation::MutationRequest;
    use crate::validate::validate;

    fn test_campaign() -> Campaign {
        let mut campaign = Campaign::new("embers", "The Ember Road");
        let mut brynn = Character::new("h1", "Brynn Oakshield", 10);
        brynn.gold = 10;
        brynn.hp.current = 5;
        campaign.characters.push(brynn);
        campaign
    }

    /// Validate and apply, panicking on rejection. Test helper only.
    fn run(campaign: &Campaign, request: &MutationRequest) -> Campaign {
        let validated = validate(campaign, request).unwrap();
        apply(campaign, &validated)
    }

    #[test]
    fn gold_delta_applies() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::for_character("embers", "h1", MutationKind::GoldDelta { amount: -4 }),
        );
        assert_eq!(next.characters[0].gold, 6);
        // The snapshot is untouched.
        assert_eq!(campaign.characters[0].gold, 10);
    }

    #[test]
    fn gold_round_trip_restores_prior_value() {
        let campaign = test_campaign();
        let there = run(
            &campaign,
            &MutationRequest::for_character("embers", "h1", MutationKind::GoldDelta { amount: 7 }),
        );
        let back = run(
            &there,
            &MutationRequest::for_character("embers", "h1", MutationKind::GoldDelta { amount: -7 }),
        );
        assert_eq!(back.characters[0].gold, campaign.characters[0].gold);
    }

    #[test]
    fn gold_inverse_that_would_overdraw_fails_cleanly() {
        let campaign = test_campaign();
        let spent = run(
            &campaign,
            &MutationRequest::for_character(
                "embers",
                "h1",
                MutationKind::GoldDelta { amount: -8 },
            ),
        );
        // gold is now 2; the "inverse of a gain" of 8 would go negative.
        let inverse =
            MutationRequest::for_character("embers", "h1", MutationKind::GoldDelta { amount: -8 });
        let err = validate(&spent, &inverse).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { .. }));
        assert_eq!(spent.characters[0].gold, 2);
    }

    #[test]
    fn hp_delta_heals() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::for_character("embers", "h1", MutationKind::HpDelta { amount: 3 }),
        );
        assert_eq!(next.characters[0].hp.to_string(), "8/10");
    }

    #[test]
    fn xp_accumulates() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::for_character("embers", "h1", MutationKind::XpDelta { amount: 250 }),
        );
        assert_eq!(next.characters[0].xp, 250);
    }

    #[test]
    fn inventory_add_merges_by_name() {
        let campaign = test_campaign();
        let torch = |quantity| {
            MutationRequest::for_character(
                "embers",
                "h1",
                MutationKind::InventoryAdd {
                    item: "torch".to_string(),
                    quantity,
                },
            )
        };
        let next = run(&run(&campaign, &torch(2)), &torch(3));
        assert_eq!(next.characters[0].inventory.len(), 1);
        assert_eq!(next.characters[0].item("torch").map(|s| s.quantity), Some(5));
    }

    #[test]
    fn inventory_remove_full_stack_removes_entry() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::for_character(
                "embers",
                "h1",
                MutationKind::InventoryAdd {
                    item: "torch".to_string(),
                    quantity: 2,
                },
            ),
        );
        let next = run(
            &next,
            &MutationRequest::for_character(
                "embers",
                "h1",
                MutationKind::InventoryRemove {
                    item: "torch".to_string(),
                    quantity: 2,
                },
            ),
        );
        assert!(next.characters[0].item("torch").is_none());
        assert!(next.characters[0].inventory.is_empty());
    }

    #[test]
    fn inventory_remove_partial_keeps_stack() {
        let mut campaign = test_campaign();
        campaign.characters[0]
            .inventory
            .push(ItemStack::new("arrow", 20));
        let next = run(
            &campaign,
            &MutationRequest::for_character(
                "embers",
                "h1",
                MutationKind::InventoryRemove {
                    item: "arrow".to_string(),
                    quantity: 6,
                },
            ),
        );
        assert_eq!(next.characters[0].item("arrow").map(|s| s.quantity), Some(14));
    }

    #[test]
    fn quest_upsert_creates_with_defaults() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::new(
                "embers",
                MutationKind::QuestUpsert {
                    quest_id: "q1".to_string(),
                    title: None,
                    status: None,
                    notes: None,
                },
            ),
        );
        let quest = next.quest("q1").unwrap();
        assert_eq!(quest.title, "q1");
        assert_eq!(quest.status, QuestStatus::Active);
    }

    #[test]
    fn quest_upsert_updates_in_place() {
        let campaign = test_campaign();
        let create = MutationRequest::new(
            "embers",
            MutationKind::QuestUpsert {
                quest_id: "q1".to_string(),
                title: Some("Reach Duskhaven".to_string()),
                status: None,
                notes: None,
            },
        );
        let update = MutationRequest::new(
            "embers",
            MutationKind::QuestUpsert {
                quest_id: "q1".to_string(),
                title: None,
                status: Some(QuestStatus::Completed),
                notes: None,
            },
        );
        let next = run(&run(&campaign, &create), &update);
        assert_eq!(next.quests.len(), 1);
        let quest = next.quest("q1").unwrap();
        // Absent fields leave existing values untouched.
        assert_eq!(quest.title, "Reach Duskhaven");
        assert_eq!(quest.status, QuestStatus::Completed);
    }

    #[test]
    fn quest_upsert_is_idempotent() {
        let campaign = test_campaign();
        let request = MutationRequest::new(
            "embers",
            MutationKind::QuestUpsert {
                quest_id: "q1".to_string(),
                title: Some("Reach Duskhaven".to_string()),
                status: Some(QuestStatus::Active),
                notes: Some("Take the coast road.".to_string()),
            },
        );
        let once = run(&campaign, &request);
        let twice = run(&once, &request);
        assert_eq!(once, twice);
    }

    #[test]
    fn days_advance_and_set() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::new("embers", MutationKind::AdvanceDay { days: 3 }),
        );
        assert_eq!(next.day, 3);
        let next = run(
            &next,
            &MutationRequest::new("embers", MutationKind::SetDay { day: 1 }),
        );
        assert_eq!(next.day, 1);
    }

    #[test]
    fn location_set() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::new(
                "embers",
                MutationKind::SetLocation {
                    location: "the Weeping Pass".to_string(),
                },
            ),
        );
        assert_eq!(next.location.as_deref(), Some("the Weeping Pass"));
    }

    #[test]
    fn note_append_targets_character_or_campaign() {
        let campaign = test_campaign();
        let next = run(
            &campaign,
            &MutationRequest::for_character(
                "embers",
                "h1",
                MutationKind::NoteAppend {
                    text: "Owes the innkeeper a favor.".to_string(),
                },
            ),
        );
        let next = run(
            &next,
            &MutationRequest::new(
                "embers",
                MutationKind::NoteAppend {
                    text: "The bridge is out.".to_string(),
                },
            ),
        );
        assert_eq!(next.characters[0].notes, ["Owes the innkeeper a favor."]);
        assert_eq!(next.notes, ["The bridge is out."]);
    }

    #[test]
    fn faction_rep_creates_then_accumulates() {
        let campaign = test_campaign();
        let first = MutationRequest::new(
            "embers",
            MutationKind::FactionRepDelta {
                faction_id: "ashguard".to_string(),
                name: Some("The Ashguard".to_string()),
                amount: 2,
            },
        );
        let second = MutationRequest::new(
            "embers",
            MutationKind::FactionRepDelta {
                faction_id: "ashguard".to_string(),
                name: None,
                amount: -5,
            },
        );
        let next = run(&run(&campaign, &first), &second);
        assert_eq!(next.factions.len(), 1);
        assert_eq!(next.factions[0].name, "The Ashguard");
        assert_eq!(next.factions[0].reputation, -3);
    }

    #[test]
    fn world_flag_set_replaces() {
        let campaign = test_campaign();
        let flag = |value: serde_json::Value| {
            MutationRequest::new(
                "embers",
                MutationKind::WorldFlagSet {
                    key: "gate_opened".to_string(),
                    value,
                },
            )
        };
        let next = run(&campaign, &flag(serde_json::Value::Bool(false)));
        let next = run(&next, &flag(serde_json::Value::Bool(true)));
        assert_eq!(next.world_flags.len(), 1);
        assert_eq!(next.world_flags["gate_opened"], serde_json::Value::Bool(true));
    }

    #[test]
    fn apply_is_deterministic() {
        let campaign = test_campaign();
        let request =
            MutationRequest::for_character("embers", "h1", MutationKind::GoldDelta { amount: -3 });
        assert_eq!(run(&campaign, &request), run(&campaign, &request));
    }

    mod invariants {
        use proptest::prelude::*;

        use crate::apply::apply;
        use crate::campaign::Campaign;
        use crate::character::{Character, ItemStack};
        use crate::mutation::{MutationKind, MutationRequest};
        use crate::quest::QuestStatus;
        use crate::validate::validate;

        fn seed_campaign() -> Campaign {
            let mut campaign = Campaign::new("embers", "The Ember Road");
            let mut brynn = Character::new("h1", "Brynn Oakshield", 10);
            brynn.gold = 10;
            brynn.hp.current = 5;
            brynn.inventory.push(ItemStack::new("torch", 2));
            campaign.characters.push(brynn);
            campaign
                .characters
                .push(Character::new("h2", "Maren of the Vale", 8));
            campaign
        }

        /// Arbitrary requests, valid and invalid mixed: character references may
        /// dangle, deltas may overdraw, quantities may be zero.
        fn arb_request() -> impl Strategy<Value = MutationRequest> {
            let char_id = prop_oneof![
                3 => Just(Some("h1".to_string())),
                2 => Just(Some("h2".to_string())),
                1 => Just(Some("nobody".to_string())),
                1 => Just(None),
            ];
            let kind = prop_oneof![
                (-25i64..25).prop_map(|amount| MutationKind::GoldDelta { amount }),
                (-15i32..15).prop_map(|amount| MutationKind::HpDelta { amount }),
                (-5i64..50).prop_map(|amount| MutationKind::XpDelta { amount }),
                ("(torch|rope|arrow)", 0u32..4).prop_map(|(item, quantity)| {
                    MutationKind::InventoryAdd { item, quantity }
                }),
                ("(torch|rope|arrow)", 0u32..4).prop_map(|(item, quantity)| {
                    MutationKind::InventoryRemove { item, quantity }
                }),
                ("(q1|q2)", prop::option::of(prop_oneof![
                    Just(QuestStatus::Active),
                    Just(QuestStatus::Completed),
                    Just(QuestStatus::Failed),
                ]))
                .prop_map(|(quest_id, status)| MutationKind::QuestUpsert {
                    quest_id,
                    title: None,
                    status,
                    notes: None,
                }),
                (0u64..3).prop_map(|days| MutationKind::AdvanceDay { days }),
                ".{0,12}".prop_map(|text| MutationKind::NoteAppend { text }),
            ];
            (char_id, kind).prop_map(|(char_id, kind)| MutationRequest {
                campaign_id: "embers".to_string(),
                char_id,
                kind,
                reason: None,
            })
        }

        proptest! {
            #[test]
            fn invariants_hold_after_any_request_sequence(
                requests in prop::collection::vec(arb_request(), 1..40)
            ) {
                let mut campaign = seed_campaign();
                for request in &requests {
                    if let Ok(validated) = validate(&campaign, request) {
                        campaign = apply(&campaign, &validated);
                    }
                    for ch in &campaign.characters {
                        prop_assert!(ch.gold >= 0, "negative gold on \"{}\"", ch.id);
                        prop_assert!(
                            ch.hp.current >= 0 && ch.hp.current <= ch.hp.max,
                            "hp {} outside [0, {}] on \"{}\"", ch.hp.current, ch.hp.max, ch.id
                        );
                        prop_assert!(
                            ch.inventory.iter().all(|s| s.quantity >= 1),
                            "zero-quantity stack on \"{}\"", ch.id
                        );
                    }
                }
            }

            #[test]
            fn xp_never_decreases(requests in prop::collection::vec(arb_request(), 1..40)) {
                let mut campaign = seed_campaign();
                for request in &requests {
                    let before: Vec<u64> = campaign.characters.iter().map(|c| c.xp).collect();
                    if let Ok(validated) = validate(&campaign, request) {
                        campaign = apply(&campaign, &validated);
                    }
                    for (ch, prior) in campaign.characters.iter().zip(before) {
                        prop_assert!(ch.xp >= prior);
                    }
                }
            }

            #[test]
            fn rejected_requests_change_nothing(
                requests in prop::collection::vec(arb_request(), 1..40)
            ) {
                let mut campaign = seed_campaign();
                for request in &requests {
                    let before = campaign.clone();
                    match validate(&campaign, request) {
                        Ok(validated) => campaign = apply(&campaign, &validated),
                        Err(_) => prop_assert_eq!(&campaign, &before),
                    }
                }
            }
        }
    }
}
