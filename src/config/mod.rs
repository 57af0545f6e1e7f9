mod parser;
mod secrets;

use crate::cli::Cli;
use crate::constants::{
    DEFAULT_API_URL, DEFAULT_CREDENTIALS_FILE, DEFAULT_PORT, EMAIL_SECRET, PASSWORD_SECRET,
};
use crate::errors::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use parser::load_config_file;
pub use secrets::read_secret;

/// Optional YAML configuration file
///
/// Every field is optional; command line and environment values win.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub ip_filter: Option<String>,
    #[serde(default)]
    pub default_list: Option<String>,
    #[serde(default)]
    pub credentials_file: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Fully resolved server configuration
#[derive(Clone, PartialEq)]
pub struct ServerConfig {
    /// Port the HTTP server binds on all interfaces
    pub port: u16,
    pub email: String,
    pub password: String,
    /// Required prefix of the peer address
    pub ip_filter: Option<String>,
    /// List used when a request names none
    pub default_list: Option<String>,
    /// Upstream token cache
    pub credentials_file: Option<PathBuf>,
    pub api_url: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("email", &self.email)
            .field("password", &"***")
            .field("ip_filter", &self.ip_filter)
            .field("default_list", &self.default_list)
            .field("credentials_file", &self.credentials_file)
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CREDENTIALS_FILE))
}

impl ServerConfig {
    /// Resolves the configuration from the command line (which already carries
    /// environment fallbacks), the optional YAML file and the secrets directory.
    ///
    /// Secret files take precedence over every other source for the email and
    /// password.
    ///
    /// # Errors
    ///
    /// * The config file cannot be read or parsed
    /// * No email or password is available from any source
    pub fn resolve(cli: &Cli) -> Result<Self, Error> {
        let file = match cli.config.as_deref() {
            Some(path) => load_config_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file, Path::new(&cli.secrets_dir))
    }

    fn merge(cli: &Cli, file: FileConfig, secrets_dir: &Path) -> Result<Self, Error> {
        let email = read_secret(secrets_dir, EMAIL_SECRET)
            .or_else(|| non_empty(cli.email.clone()))
            .or_else(|| non_empty(file.email))
            .ok_or(Error::MissingCredentials("email"))?;
        let password = read_secret(secrets_dir, PASSWORD_SECRET)
            .or_else(|| non_empty(cli.password.clone()))
            .or_else(|| non_empty(file.password))
            .ok_or(Error::MissingCredentials("password"))?;

        let api_url = non_empty(cli.api_url.clone())
            .or_else(|| non_empty(file.api_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url::Url::parse(&api_url)
            .map_err(|e| Error::InvalidConfig(format!("api url '{}': {}", api_url, e)))?;

        let credentials_file = non_empty(cli.credentials_file.clone())
            .or_else(|| non_empty(file.credentials_file))
            .map(PathBuf::from)
            .or_else(default_credentials_file);

        let config = ServerConfig {
            port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            email,
            password,
            ip_filter: non_empty(cli.ip_filter.clone()).or_else(|| non_empty(file.ip_filter)),
            default_list: non_empty(cli.default_list.clone())
                .or_else(|| non_empty(file.default_list)),
            credentials_file,
            api_url,
        };
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
