use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const SEARCH_URL: &str = "https://www.lumify.ai/api/v1/search.php";
pub const LAST30DAYS_URL: &str = "https://lumify.ai/api/v1/skills/last30days";
pub const BASE_URL: &str = "https://lumify.ai/api/v1";

/// Remote endpoints, one per operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub search: String,
    pub last30days: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search: SEARCH_URL.to_string(),
            last30days: LAST30DAYS_URL.to_string(),
        }
    }
}

/// How schema-declared defaults reach option collections during parameter resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPolicy {
    /// Only values the user configured are resolved.
    ExplicitOnly,
    /// An unconfigured collection takes the collection's declared default.
    #[default]
    CollectionDefaults,
    /// Every absent collection option takes its own declared default.
    AllDeclared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub timeout_secs: Option<u64>,
    pub defaults: DefaultPolicy,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn load_config_from_yaml(file_path: impl AsRef<Path>) -> Result<Config> {
    let file_path = file_path.as_ref();
    let yaml_content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read config file from {}", file_path.display()))?;

    let config: Config = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to deserialize config from {}", file_path.display()))?;

    Ok(config)
}
