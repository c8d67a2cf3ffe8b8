use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::core::{Lang, PantryError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PantryConfig {
    pub language: Lang,
    /// Owner of favorites; generated on first run.
    pub session_id: String,
    pub page_size: usize,
}

// Default configuration if file is missing
impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            language: Lang::En,
            session_id: Uuid::new_v4().to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join("config.toml"),
        }
    }

    // Load config or create default if missing
    pub async fn load(&self) -> Result<PantryConfig, PantryError> {
        if !self.path.exists() {
            let default_config = PantryConfig::default();
            self.save(&default_config).await?;
            info!("Created default config at {}", self.path.display());
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.path).await?;
        let mut config: PantryConfig = toml::from_str(&content)?;

        // A missing session id is generated once and written back
        let table: toml::Table = toml::from_str(&content)?;
        let has_session = table
            .get("session_id")
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.trim().is_empty());
        if !has_session {
            config.session_id = Uuid::new_v4().to_string();
            self.save(&config).await?;
            info!("Stored new session id in {}", self.path.display());
        }
        Ok(config)
    }

    pub async fn save(&self, config: &PantryConfig) -> Result<(), PantryError> {
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_default_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(dir.path());

        let first = manager.load().await.unwrap();
        assert!(dir.path().join("config.toml").exists());
        assert_eq!(first.language, Lang::En);
        assert_eq!(first.page_size, DEFAULT_PAGE_SIZE);

        // The session id is stable across runs
        let second = manager.load().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_and_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(dir.path());

        let mut config = manager.load().await.unwrap();
        config.language = Lang::It;
        manager.save(&config).await.unwrap();
        assert_eq!(manager.load().await.unwrap().language, Lang::It);

        tokio::fs::write(dir.path().join("config.toml"), "language = \"it\"\n")
            .await
            .unwrap();
        let partial = manager.load().await.unwrap();
        assert_eq!(partial.language, Lang::It);
        assert_eq!(partial.page_size, DEFAULT_PAGE_SIZE);
        assert!(!partial.session_id.is_empty());
    }

    #[tokio::test]
    async fn test_generated_session_persists() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(dir.path());
        let path = dir.path().join("config.toml");

        tokio::fs::write(&path, "language = \"it\"\n").await.unwrap();
        let first = manager.load().await.unwrap();
        let second = manager.load().await.unwrap();
        assert_eq!(first.session_id, second.session_id);
        assert_eq!(second.language, Lang::It);

        tokio::fs::write(&path, "session_id = \"\"\n").await.unwrap();
        let blank = manager.load().await.unwrap();
        assert!(!blank.session_id.is_empty());
        assert_eq!(manager.load().await.unwrap().session_id, blank.session_id);
    }
}
