//! Consent component configuration persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Store keys and timings for the consent component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentConfig {
    /// Store key holding the structured consent record (JSON).
    #[serde(default = "default_consent_key")]
    pub consent_key: String,
    /// Store key holding the legacy flat flag.
    #[serde(default = "default_cookies_key")]
    pub cookies_key: String,
    /// Days before a stored record counts as expired.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,
    /// Delay before the first-visit banner is offered.
    #[serde(default = "default_banner_delay_ms")]
    pub banner_delay_ms: u64,
    /// Path to config file (not serialized).
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_consent_key() -> String {
    "ad-consent".into()
}
fn default_cookies_key() -> String {
    "cookies-accepted".into()
}
fn default_expiry_days() -> i64 {
    30
}
fn default_banner_delay_ms() -> u64 {
    2000
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            consent_key: default_consent_key(),
            cookies_key: default_cookies_key(),
            expiry_days: default_expiry_days(),
            banner_delay_ms: default_banner_delay_ms(),
            config_path: PathBuf::new(),
        }
    }
}

impl ConsentConfig {
    /// Load config from a JSON file in `config_dir`, or return defaults.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join("consent-config.json");
        let mut config: ConsentConfig = std::fs::read_to_string(&config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        config.config_path = config_path;
        config
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.config_path, json)
    }

    pub fn banner_delay(&self) -> Duration {
        Duration::from_millis(self.banner_delay_ms)
    }
}
