/*
[INPUT]:  YAML configuration file, environment overrides
[OUTPUT]: Parsed and validated board configuration
[POS]:    Configuration layer - API endpoint, subject, refresh and UI settings
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use taskboard_adapter::{ClientConfig, Credentials, DEFAULT_BASE_URL, TaskClient};

/// Environment variable that overrides `api.token`
pub const TOKEN_ENV_VAR: &str = "TASKBOARD_API_TOKEN";

/// Top-level configuration for the task board
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Subject whose tasks are fetched; empty fetches every visible task
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote task API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Automatic refresh; off unless an interval is set
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefreshConfig {
    #[serde(default)]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// How long a fetch failure stays on screen
    #[serde(default = "default_error_display_millis")]
    pub error_display_millis: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            error_display_millis: default_error_display_millis(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_error_display_millis() -> u64 {
    2750
}

impl BoardConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse config yaml")?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/taskboard/config.yaml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("config.yaml"))
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                self.api.token = Some(token);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url is not a valid url: {}", self.api.base_url))?;
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        if self.api.connect_timeout_secs == 0 {
            bail!("api.connect_timeout_secs must be greater than zero");
        }
        if self.refresh.interval_secs == Some(0) {
            bail!("refresh.interval_secs must be greater than zero when set");
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh.interval_secs.map(Duration::from_secs)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.ui.error_display_millis)
    }

    /// Build the HTTP task client described by `api`
    pub fn build_client(&self) -> Result<TaskClient> {
        let client_config = ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        };
        let mut client = TaskClient::with_config_and_base_url(client_config, &self.api.base_url)
            .context("create task client")?;
        if let Some(token) = self.api.token.as_ref() {
            client.set_credentials(Credentials {
                token: token.clone(),
            });
        }
        Ok(client)
    }
}
