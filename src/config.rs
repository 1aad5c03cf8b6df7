//! YAML configuration for the contact pipeline.
//!
//! ```yaml
//! site: nova
//! sink:
//!   kind: rest
//!   endpoint: https://club.example.edu/api/contact
//! mirror:
//!   webhook_url: https://hooks.example.com/sheet
//! timeout_ms: 10000
//! success_display_ms: 5000
//! ```

use crate::sink::{MirroredSink, RecordingSink, RelaySink, RestSink, SubmissionSink};
use crate::state::controller::{ControllerOptions, SINK_TIMEOUT, SUCCESS_DISPLAY};
use crate::ui::profile::SiteProfile;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown site preset '{0}' (expected eternotes or nova)")]
    UnknownSite(String),

    #[error("invalid config value '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SinkConfig {
    Rest { endpoint: String },
    Relay { webhook_url: String },
    /// Accepts everything without sending it anywhere.
    DryRun,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::DryRun
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorConfig {
    pub webhook_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SiteConfig {
    Preset(String),
    Custom(SiteProfile),
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::Custom(SiteProfile::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub sink: SinkConfig,
    pub mirror: Option<MirrorConfig>,
    pub timeout_ms: u64,
    pub success_display_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            sink: SinkConfig::default(),
            mirror: None,
            timeout_ms: SINK_TIMEOUT.as_millis() as u64,
            success_display_ms: SUCCESS_DISPLAY.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        match &self.sink {
            SinkConfig::Rest { endpoint } => check_url("sink.endpoint", endpoint)?,
            SinkConfig::Relay { webhook_url } => check_url("sink.webhook_url", webhook_url)?,
            SinkConfig::DryRun => {}
        }
        if let Some(mirror) = &self.mirror {
            check_url("mirror.webhook_url", &mirror.webhook_url)?;
        }
        self.site_profile().map(|_| ())
    }

    pub fn site_profile(&self) -> ConfigResult<SiteProfile> {
        match &self.site {
            SiteConfig::Preset(name) => {
                SiteProfile::preset(name).ok_or_else(|| ConfigError::UnknownSite(name.clone()))
            }
            SiteConfig::Custom(profile) => Ok(profile.clone()),
        }
    }

    pub fn sink_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            success_display: Duration::from_millis(self.success_display_ms),
            sink_timeout: self.sink_timeout(),
        }
    }

    pub fn build_sink(&self) -> Arc<dyn SubmissionSink> {
        let timeout = self.sink_timeout();
        let primary: Arc<dyn SubmissionSink> = match &self.sink {
            SinkConfig::Rest { endpoint } => Arc::new(RestSink::new(endpoint.clone(), timeout)),
            SinkConfig::Relay { webhook_url } => {
                Arc::new(RelaySink::new(webhook_url.clone(), timeout))
            }
            SinkConfig::DryRun => Arc::new(RecordingSink::accepting()),
        };

        match &self.mirror {
            Some(mirror) => Arc::new(MirroredSink::new(
                primary,
                Arc::new(RelaySink::new(mirror.webhook_url.clone(), timeout)),
            )),
            None => primary,
        }
    }
}

fn check_url(field: &'static str, value: &str) -> ConfigResult<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("expected an http(s) url, got '{value}'"),
        })
    }
}
