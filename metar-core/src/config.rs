use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

const DEFAULT_USER_AGENT: &str = concat!("metar-core/", env!("CARGO_PKG_VERSION"));

/// Settings stored on disk.
///
/// Example TOML:
/// ```toml
/// default_station = "EDDH"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Station used when none is given on the command line.
    pub default_station: Option<String>,

    /// Data server base URL, if not the public aviation weather service.
    pub endpoint: Option<String>,

    /// Whole-request timeout applied by the HTTP client.
    pub timeout_secs: Option<u64>,

    pub user_agent: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "metar", "metar-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The configured default station, or an error with a hint.
    pub fn default_station(&self) -> Result<&str> {
        self.default_station.as_deref().ok_or_else(|| {
            anyhow!(
                "No station given and no default station configured.\n\
                 Hint: pass a station code (e.g. `metar show EDDH`) or run `metar configure`."
            )
        })
    }

    pub fn set_default_station(&mut self, station: &str) {
        self.default_station = Some(station.trim().to_string());
    }

    /// Parsed endpoint override, if one is configured.
    pub fn endpoint_url(&self) -> Result<Option<Url>> {
        self.endpoint
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("Invalid endpoint URL '{raw}'")))
            .transpose()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
