//! Bot configuration: an optional RON file plus the token from the environment.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scout_core::DEFAULT_SEARCH_URL;
use scout_engine::{DocumentFormat, FetchSettings, TemplateSource, UserAgentPool};
use serde::Deserialize;

use crate::logging::LogDestination;

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "SCOUT_CONFIG";
/// Environment variable holding the bot token.
pub const TOKEN_VAR: &str = "TG_BOT_TOKEN";
pub const DEFAULT_CONFIG_PATH: &str = "./scout_bot.ron";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("parsing config: {0}")]
    Parse(String),
    #[error("TG_BOT_TOKEN is not set")]
    MissingToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub telegram_api_url: String,
    pub search_url: String,
    /// Directory holding `vacancies.html`; the built-in template when unset.
    pub templates_dir: Option<PathBuf>,
    pub document_format: DocumentFormat,
    pub poll_timeout_secs: u64,
    pub session_ttl_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Replaces the built-in user agent pool when non-empty.
    pub user_agents: Vec<String>,
    pub log_destination: LogDestination,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            templates_dir: None,
            document_format: DocumentFormat::default(),
            poll_timeout_secs: 30,
            session_ttl_secs: 60 * 60,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            user_agents: Vec::new(),
            log_destination: LogDestination::Terminal,
        }
    }
}

impl BotConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text)
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads `path`, or the default path when `None`.
    ///
    /// A missing file at the default path yields the defaults; an explicitly
    /// named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::from_ron(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    /// Loads the file named by `SCOUT_CONFIG`, falling back to the default path.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load(path.as_deref())
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn template_source(&self) -> TemplateSource {
        match &self.templates_dir {
            Some(dir) => TemplateSource::Directory(dir.clone()),
            None => TemplateSource::Builtin,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            user_agents: UserAgentPool::new(self.user_agents.clone()),
            ..FetchSettings::default()
        }
    }
}

/// Reads the bot token through `lookup`, rejecting blank values.
pub fn bot_token(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    lookup(TOKEN_VAR)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingToken)
}

pub fn bot_token_from_env() -> Result<String, ConfigError> {
    bot_token(|name| std::env::var(name).ok())
}
