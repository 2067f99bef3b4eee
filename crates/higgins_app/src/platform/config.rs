use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use higgins_engine::{InvokeSettings, API_VERSION};
use higgins_logging::{higgins_info, higgins_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;
use super::logging::LoggingConfig;

const DEFAULT_CONFIG_PATH: &str = "./higgins.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Scripts answering in-process instead of the remote function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalScriptConfig {
    pub core: PathBuf,
    #[serde(default)]
    pub addons: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub function_name: String,
    /// Invoke API base url; the regional host is used when absent.
    pub endpoint: Option<String>,
    pub region: String,
    pub api_version: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub local: Option<LocalScriptConfig>,
    /// Script delegate name to function name.
    pub delegates: BTreeMap<String, String>,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let invoke = InvokeSettings::default();
        Self {
            function_name: "HigginsV2".to_string(),
            endpoint: None,
            region: invoke.region,
            api_version: API_VERSION.to_string(),
            connect_timeout_ms: invoke.connect_timeout.as_millis() as u64,
            request_timeout_ms: invoke.request_timeout.as_millis() as u64,
            max_response_bytes: invoke.max_bytes,
            local: None,
            delegates: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `./higgins.ron`. A missing default file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
                higgins_warn!("Config {:?} not found, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        higgins_info!("Config loaded from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        if let Some(function) = &cli.function {
            self.function_name = function.clone();
        }
        if let Some(core) = &cli.local_script {
            self.local = Some(LocalScriptConfig {
                core: core.clone(),
                addons: cli.addons.clone(),
            });
        }
    }

    pub fn invoke_settings(&self) -> InvokeSettings {
        InvokeSettings {
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            api_version: self.api_version.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn delegate_map(&self) -> HashMap<String, String> {
        self.delegates
            .iter()
            .map(|(name, function)| (name.clone(), function.clone()))
            .collect()
    }
}
