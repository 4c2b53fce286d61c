use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read photo {}: {source}", path.display())]
    PhotoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid credentials configured. Set PETFRIENDS_EMAIL and PETFRIENDS_PASSWORD")]
    MissingCredentials,

    #[error("Unknown scenario '{0}'. Run: petfriends-negative list")]
    UnknownScenario(String),

    #[error("Failed to read config: {0}")]
    ConfigRead(std::io::Error),

    #[error("Failed to write config: {0}")]
    ConfigWrite(std::io::Error),

    #[error("Invalid config format: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),
}

impl SuiteError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// True for errors that originate in the HTTP transport rather than in
    /// local setup (files, config).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
