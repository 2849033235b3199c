//! Configuration for the development assistant

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sessionstore::SavePolicy;

fn default_max_turns() -> u32 {
    20
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devagent")
        .join("sessions")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding persisted session records
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// When to snapshot the session to the store
    #[serde(default)]
    pub save_policy: SavePolicy,

    /// Conversation turn ceiling per session
    #[serde(default = "default_max_turns")]
    pub max_conversation_turns: u32,

    /// Log level used when the CLI does not override it
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            save_policy: SavePolicy::default(),
            max_conversation_turns: default_max_turns(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("devagent").join("config.yml")),
            Some(PathBuf::from("devagent.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_conversation_turns, 20);
        assert_eq!(config.save_policy, SavePolicy::EveryTurn);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("store_path: /tmp/sessions\n").unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/sessions"));
        assert_eq!(config.max_conversation_turns, 20);
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yml");

        let mut config = Config::default();
        config.max_conversation_turns = 5;
        config.save_policy = SavePolicy::Manual;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.max_conversation_turns, 5);
        assert_eq!(loaded.save_policy, SavePolicy::Manual);
    }
}
