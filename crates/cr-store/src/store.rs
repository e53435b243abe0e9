//! Durable storage of campaign documents.
//!
//! One pretty-printed JSON document per campaign, keyed by a path-safe form
//! of the campaign identifier. Saves go through a temporary file and an
//! atomic rename, so a failed write never corrupts the previous document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cr_core::Campaign;

use crate::error::{StoreError, StoreResult};

/// Identifier and display name of a stored campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    /// Stable campaign identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A directory of campaign documents.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    dir: PathBuf,
}

impl CampaignStore {
    /// Create a store rooted at the given directory. The directory is created
    /// lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The document path for a campaign identifier.
    fn campaign_path(&self, id: &str) -> PathBuf {
        // Keep identifiers path-safe; everything else is dropped.
        let safe: String = id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// Load the latest saved document for a campaign.
    pub fn load(&self, id: &str) -> StoreResult<Campaign> {
        let path = self.campaign_path(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::CampaignNotFound(id.to_string()));
            }
            Err(source) => return Err(StoreError::Storage { path, source }),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Persist a campaign document, fully replacing any previous version.
    ///
    /// Writes to `<path>.tmp` and renames over the target, so on failure the
    /// previously saved document is still intact.
    pub fn save(&self, campaign: &Campaign) -> StoreResult<()> {
        let path = self.campaign_path(&campaign.id);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Storage {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(campaign)
            .map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Storage {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Storage { path, source })
    }

    /// Persist a campaign for the first time. Fails if a document for the
    /// identifier already exists.
    pub fn create(&self, campaign: &Campaign) -> StoreResult<()> {
        if self.campaign_path(&campaign.id).exists() {
            return Err(StoreError::CampaignExists(campaign.id.clone()));
        }
        self.save(campaign)
    }

    /// List all stored campaigns, sorted by identifier.
    ///
    /// Unreadable or undecodable entries are skipped — a damaged document
    /// should not hide every other campaign from the listing.
    pub fn list(&self) -> StoreResult<Vec<CampaignSummary>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Storage {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut campaigns = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Ok(raw) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(campaign) = serde_json::from_str::<Campaign>(&raw) else {
                continue;
            };
            campaigns.push(CampaignSummary {
                id: campaign.id,
                name: campaign.name,
            });
        }
        campaigns.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(campaigns)
    }
}
