use clap::Parser;

/// Command line interface for the REST server
///
/// Every option falls back to an environment variable. Values left unset here
/// may still come from the YAML config file or a secret file.
#[derive(Parser, Debug, Default)]
#[command(name = "anylist-rest", version, about)]
pub struct Cli {
    /// Port to listen on (default 8080)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// AnyList account email
    #[arg(long, env = "EMAIL")]
    pub email: Option<String>,

    /// AnyList account password
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Only accept requests whose peer address starts with this prefix
    #[arg(long, env = "IP_FILTER")]
    pub ip_filter: Option<String>,

    /// List used when a request does not name one
    #[arg(long, env = "DEFAULT_LIST")]
    pub default_list: Option<String>,

    /// Where the upstream session tokens are cached (default ~/.anylist_credentials)
    #[arg(long, env = "CREDENTIALS_FILE")]
    pub credentials_file: Option<String>,

    /// Base URL of the AnyList API
    #[arg(long, env = "ANYLIST_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the anylist_email and anylist_password secret files
    #[arg(long, env = "SECRETS_DIR", default_value = "/run/secrets")]
    pub secrets_dir: String,

    /// Optional YAML configuration file
    #[arg(long = "config", env = "ANYLIST_CONFIG")]
    pub config: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long, env = "LOG_LEVEL", default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file in this directory
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,
}
