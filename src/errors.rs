use crate::anylist::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Missing {0}: set it on the command line, in the environment, in the config file or as a secret")]
    MissingCredentials(&'static str),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("AnyList error: {0}")]
    Upstream(#[from] UpstreamError),
}
