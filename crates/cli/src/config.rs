use anyhow::{bail, Context as AnyhowContext, Result};
use holonet_fetch::TransportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://swapi.dev/api";
pub const DEFAULT_IMAGE_BASE: &str = "https://starwars-visualguide.com/assets/img/characters";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const ENV_API_BASE: &str = "HOLONET_API_BASE";
const ENV_IMAGE_BASE: &str = "HOLONET_IMAGE_BASE";
const ENV_TIMEOUT_MS: &str = "HOLONET_TIMEOUT_MS";

/// Runtime settings for the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HolonetConfig {
    pub api_base: String,
    pub image_base: String,
    pub request_timeout_ms: u64,
    /// Overrides the default `holonet/<version>` user agent
    pub user_agent: Option<String>,
}

impl Default for HolonetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub image_base: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl HolonetConfig {
    /// Defaults, then `path`, then `HOLONET_*` environment variables, then `overrides`.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Apply environment values returned by `lookup`. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(base) = get(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(base) = get(ENV_IMAGE_BASE) {
            self.image_base = base;
        }
        if let Some(raw) = get(ENV_TIMEOUT_MS) {
            self.request_timeout_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_MS} must be a number, got {raw:?}"))?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(base) = &overrides.api_base {
            self.api_base.clone_from(base);
        }
        if let Some(base) = &overrides.image_base {
            self.image_base.clone_from(base);
        }
        if let Some(ms) = overrides.timeout_ms {
            self.request_timeout_ms = ms;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            bail!("api_base must not be empty");
        }
        if self.image_base.trim().is_empty() {
            bail!("image_base must not be empty");
        }
        if self.request_timeout_ms == 0 {
            bail!("request_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        let mut transport = TransportConfig {
            timeout: self.timeout(),
            ..TransportConfig::default()
        };
        if let Some(agent) = &self.user_agent {
            transport.user_agent.clone_from(agent);
        }
        transport
    }
}
