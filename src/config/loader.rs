//! Roster rule loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading stored team
//! rule records from a directory of YAML or JSON files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::raw::RawRosterRules;

/// Loads and provides access to stored team roster rules.
///
/// # Directory Structure
///
/// Each file holds one team's persisted rule record and must carry a
/// `team_id` (or `teamId`):
/// ```text
/// config/teams/
/// ├── platform-ops.yaml
/// └── service-desk.json
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/teams").unwrap();
/// let raw = loader.rules_for("platform-ops").unwrap();
/// println!("Dedicated on-call: {:?}", raw.dedicated_on_call_member);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    teams: BTreeMap<String, RawRosterRules>,
}

impl ConfigLoader {
    /// Loads every rule file from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory does not exist or contains no rule files
    /// - Any file contains invalid YAML or JSON
    /// - Any file has no team id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            let is_rule_file = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json");
            if is_rule_file {
                files.push(path);
            }
        }
        // Sorted, so a team id declared twice resolves to the last file by name.
        files.sort();

        let mut loader = Self::default();
        for file in &files {
            let raw = Self::load_file(file)?;
            let team_id = raw
                .resolved_team_id()
                .ok_or_else(|| EngineError::ConfigParseError {
                    path: file.display().to_string(),
                    message: "missing team_id".to_string(),
                })?
                .to_string();
            debug!(team_id = %team_id, path = %file.display(), "Loaded team rules");
            loader.teams.insert(team_id, raw);
        }

        if loader.teams.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", dir_str),
            });
        }

        info!(teams = loader.teams.len(), path = %dir_str, "Roster rules loaded");
        Ok(loader)
    }

    /// Builds a loader from records already in memory.
    pub fn from_rules(rules: impl IntoIterator<Item = RawRosterRules>) -> Self {
        let teams = rules
            .into_iter()
            .filter_map(|raw| {
                let team_id = raw.resolved_team_id()?.to_string();
                Some((team_id, raw))
            })
            .collect();
        Self { teams }
    }

    /// Loads and parses one rule file, choosing the parser by extension.
    fn load_file(path: &Path) -> EngineResult<RawRosterRules> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Gets the stored rule record for a team.
    ///
    /// # Returns
    ///
    /// Returns the raw record, or `TeamNotFound` if no file declared the team.
    pub fn rules_for(&self, team_id: &str) -> EngineResult<&RawRosterRules> {
        self.teams
            .get(team_id)
            .ok_or_else(|| EngineError::TeamNotFound {
                team_id: team_id.to_string(),
            })
    }

    /// Returns the ids of all loaded teams, sorted.
    pub fn team_ids(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }
}
