use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a quest. A closed set — anything else is rejected at
/// the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// The quest is ongoing.
    Active,
    /// The quest was finished successfully.
    Completed,
    /// The quest ended in failure.
    Failed,
}

impl QuestStatus {
    /// Try to parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A quest tracked by a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    /// Identifier, unique within the owning campaign.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Lifecycle status.
    pub status: QuestStatus,
    /// Freeform description or progress notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Quest {
    /// Create a new active quest.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: QuestStatus::Active,
            notes: None,
        }
    }
}
