use crate::consts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Settings for `snake-scores serve`
    pub(crate) server: ServerConfig,

    /// Settings for `snake-scores play`
    pub(crate) client: ClientConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snake-scores").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read the configuration file given on the command line, or else the
    /// one at the default path if it exists
    pub(crate) fn discover(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::load(p, false),
            None => Config::load(&Config::default_path()?, true),
        }
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Let the process environment override values from the file
    pub(crate) fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    fn apply_env_with<F: Fn(&str) -> Option<String>>(&mut self, getenv: F) {
        if let Some(url) = getenv(consts::DATABASE_URL_VAR).filter(|s| !s.is_empty()) {
            self.server.database_url = Some(url);
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct ServerConfig {
    /// PostgreSQL connection URL, including any `sslmode` parameter
    pub(crate) database_url: Option<String>,

    /// Address & port to listen on
    pub(crate) listen: String,

    /// Upper limit on the size of the database connection pool
    pub(crate) max_connections: u32,
}

impl ServerConfig {
    pub(crate) fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            database_url: None,
            listen: String::from(consts::DEFAULT_LISTEN_ADDR),
            max_connections: consts::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct ClientConfig {
    /// Base URL of the score server
    pub(crate) server_url: String,

    /// Name to prefill on the name entry screen
    pub(crate) player_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig {
            server_url: String::from(consts::DEFAULT_SERVER_URL),
            player_name: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("no database URL configured; set {var} or server.database-url", var = consts::DATABASE_URL_VAR)]
    MissingDatabaseUrl,
}
