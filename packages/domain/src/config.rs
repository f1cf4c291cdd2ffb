//! # Client configuration — `questbox.toml`
//!
//! Compiled into the web build and read once at start-up. Every section and key is
//! optional; a missing or empty file is the default configuration.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3001"
//!
//! [listing]
//! page_size = 10          # rows per page on the quest board
//! time_column = "sentAt"  # or "time"
//!
//! [registration]
//! minimum_age = 14
//! ```

use serde::{Deserialize, Serialize};

use crate::listing::{TimeColumn, DEFAULT_PAGE_SIZE};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestBoxConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub time_column: TimeColumn,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default = "default_minimum_age")]
    pub minimum_age: u32,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_minimum_age() -> u32 {
    14
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            time_column: TimeColumn::default(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
        }
    }
}

impl QuestBoxConfig {
    pub fn filename() -> &'static str {
        "questbox.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse `s`, falling back to defaults (with a warning) if it is malformed.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!("Invalid {}: {}", Self::filename(), e);
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let config = QuestBoxConfig::from_toml("").unwrap();
        assert_eq!(config, QuestBoxConfig::default());
        assert_eq!(config.listing.page_size, 10);
        assert_eq!(config.registration.minimum_age, 14);
        assert_eq!(config.api.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_partial_sections() {
        let config = QuestBoxConfig::from_toml(
            r#"
            [listing]
            time_column = "time"
            "#,
        )
        .unwrap();
        assert_eq!(config.listing.time_column, TimeColumn::AvailableAt);
        assert_eq!(config.listing.page_size, 10);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = QuestBoxConfig::default();
        config.listing.page_size = 25;
        config.api.base_url = "https://quests.example.com".into();
        let parsed = QuestBoxConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_falls_back() {
        let config = QuestBoxConfig::from_toml_or_default("[listing]\npage_size = \"ten\"");
        assert_eq!(config, QuestBoxConfig::default());
    }
}
