use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::quest::Quest;

/// A faction the party has standing with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    /// Identifier, unique within the owning campaign.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Party reputation with this faction. Unbounded in either direction.
    #[serde(default)]
    pub reputation: i64,
}

impl Faction {
    /// Create a faction with neutral reputation.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reputation: 0,
        }
    }
}

/// One campaign's persistent state: the document the mutation engine reads,
/// transforms, and persists as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Stable, caller-supplied identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// In-world day counter.
    #[serde(default)]
    pub day: u64,
    /// Where the party currently is, if tracked.
    #[serde(default)]
    pub location: Option<String>,
    /// Characters, in creation order.
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Quests, in creation order.
    #[serde(default)]
    pub quests: Vec<Quest>,
    /// Factions the party has encountered, in first-contact order.
    #[serde(default)]
    pub factions: Vec<Faction>,
    /// Campaign-level notes, in append order.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Freeform world-state flags (doors opened, villains unmasked, ...).
    #[serde(default)]
    pub world_flags: BTreeMap<String, serde_json::Value>,
}

impl Campaign {
    /// Create an empty campaign on day 0.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            day: 0,
            location: None,
            characters: Vec::new(),
            quests: Vec::new(),
            factions: Vec::new(),
            notes: Vec::new(),
            world_flags: BTreeMap::new(),
        }
    }

    /// Find a character by identifier.
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Find a character's position by identifier.
    pub fn character_index(&self, id: &str) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    /// Find a quest by identifier.
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Find a quest's position by identifier.
    pub fn quest_index(&self, id: &str) -> Option<usize> {
        self.quests.iter().position(|q| q.id == id)
    }

    /// Find a faction's position by identifier.
    pub fn faction_index(&self, id: &str) -> Option<usize> {
        self.factions.iter().position(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_campaign() -> Campaign {
        let mut campaign = Campaign::new("embers", "The Ember Road");
        campaign
            .characters
            .push(Character::new("h1", "Brynn Oakshield", 10));
        campaign.quests.push(Quest::new("q1", "Reach Duskhaven"));
        campaign
    }

    #[test]
    fn new_campaign_is_empty() {
        let c = Campaign::new("embers", "The Ember Road");
        assert_eq!(c.day, 0);
        assert!(c.location.is_none());
        assert!(c.characters.is_empty());
        assert!(c.quests.is_empty());
        assert!(c.world_flags.is_empty());
    }

    #[test]
    fn character_lookup() {
        let c = test_campaign();
        assert_eq!(c.character("h1").map(|ch| ch.name.as_str()), Some("Brynn Oakshield"));
        assert!(c.character("nobody").is_none());
        assert_eq!(c.character_index("h1"), Some(0));
    }

    #[test]
    fn quest_lookup() {
        let c = test_campaign();
        assert!(c.quest("q1").is_some());
        assert_eq!(c.quest_index("q2"), None);
    }

    #[test]
    fn document_serde_roundtrip() {
        let mut c = test_campaign();
        c.day = 12;
        c.location = Some("the Weeping Pass".to_string());
        c.notes.push("The bridge is out.".to_string());
        c.world_flags
            .insert("gate_opened".to_string(), serde_json::Value::Bool(true));

        let json = serde_json::to_string_pretty(&c).unwrap();
        let back: Campaign = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn minimal_document_fills_defaults() {
        // Hand-authored documents may omit every collection.
        let c: Campaign =
            serde_json::from_str(r#"{"id": "embers", "name": "The Ember Road"}"#).unwrap();
        assert_eq!(c.day, 0);
        assert!(c.characters.is_empty());
        assert!(c.notes.is_empty());
    }
}
