/// Server configuration
use crate::error::{Result, ServerError};
use duet_assistant::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for `/tracks/*` and the web UI
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// How chat turns are arbitrated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    /// Tool-calling language model
    #[default]
    Model,
    /// Exact phrase matching, no network
    Local,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantSettings {
    #[serde(default)]
    pub mode: AssistantMode,

    /// Overrides `GEMINI_API_KEY` when set
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Reply "Done." with the decided action when only the confirmation round fails
    #[serde(default)]
    pub fallback_on_confirmation_failure: bool,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` if given (it must exist), otherwise `config.toml` when present.
    /// Environment variables override the file: `DUET_` followed by the section,
    /// a double underscore, then the key, e.g. `DUET_SERVER__PORT` or
    /// `DUET_ASSISTANT__REQUEST_TIMEOUT_SECS`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with DUET_)
        settings = settings.add_source(environment);

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.assistant.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "assistant.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.assistant.max_output_tokens == 0 {
            return Err(ServerError::Config(
                "assistant.max_output_tokens must be greater than zero".to_string(),
            ));
        }

        if let Some(dir) = &self.server.static_dir {
            if !dir.is_dir() {
                return Err(ServerError::Config(format!(
                    "Static directory not found at {:?}",
                    dir
                )));
            }
        }

        Ok(())
    }
}

impl AssistantSettings {
    /// Credential from `api_key`, else from `GEMINI_API_KEY`; blank counts as missing
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Transport settings, or `None` when no credential is available
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let api_key = self.resolve_api_key()?;
        Some(GeminiConfig {
            api_key,
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            max_output_tokens: self.max_output_tokens,
            timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}

// Single underscores stay inside key names such as `api_key`
fn environment() -> config::Environment {
    config::Environment::with_prefix("DUET")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            mode: AssistantMode::default(),
            api_key: None,
            model: default_model(),
            api_base: default_api_base(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback_on_confirmation_failure: false,
        }
    }
}
