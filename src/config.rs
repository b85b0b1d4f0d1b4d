//! Sidecar settings.
//!
//! Sources, highest priority last:
//! 1. built-in defaults
//! 2. the JSON file named by `TRACKERD_CONFIG`, if set
//! 3. `TRACKERD_*` environment variables, `__` between nested keys
//!    (`TRACKERD_NOTICES__ENABLED=false` sets `notices.enabled`)

use anyhow::Context;
use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "TRACKERD_CONFIG";
pub const ENV_PREFIX: &str = "TRACKERD_";

const fn default_top_performers() -> usize {
    5
}

fn default_signature() -> String {
    "Student Performance Tracker System".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_signature")]
    pub signature: String,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            signature: default_signature(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// How many students `reports.topPerformers` returns when the caller
    /// does not say.
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,
    #[serde(default)]
    pub notices: NoticeConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            top_performers: default_top_performers(),
            notices: NoticeConfig::default(),
        }
    }
}

impl TrackerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config: Self = Self::figment()?
            .extract()
            .context("failed to read trackerd configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment() -> anyhow::Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
            if !path.exists() {
                anyhow::bail!("{} points at a missing file: {}", CONFIG_PATH_ENV, path.display());
            }
            figment = figment.merge(Json::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["log", "config"]).split("__")))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.top_performers == 0 {
            anyhow::bail!("top_performers must be at least 1");
        }
        Ok(())
    }
}
