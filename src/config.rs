use crate::cli::OutputFormat;
use crate::error::SuiteError;
use crate::types::Credentials;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Build-time default injected via build.rs
const DEFAULT_BASE_URL: &str = env!("PETFRIENDS_URL");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub valid_email: Option<String>,
    pub valid_password: Option<String>,

    /// Directory holding the photos attached by the scenarios.
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/images"))
}

impl Config {
    pub fn load() -> Result<Self, SuiteError> {
        Self::load_from_path(&Self::path()?)
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, SuiteError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(SuiteError::ConfigRead)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), SuiteError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SuiteError::ConfigWrite)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(SuiteError::ConfigWrite)?;
        Ok(())
    }

    pub fn path() -> Result<PathBuf, SuiteError> {
        let dirs = ProjectDirs::from("ru", "petfriends", "petfriends-negative")
            .ok_or_else(|| SuiteError::other("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            valid_email: None,
            valid_password: None,
            images_dir: default_images_dir(),
        }
    }
}

/// Runtime context: file config layered under environment and CLI overrides.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    config_path: Option<PathBuf>,
    base_url_override: Option<String>,
    format_override: Option<OutputFormat>,
    no_color: bool,
}

impl Context {
    /// Load from `path` when given, otherwise from the platform config dir.
    pub fn load(path: Option<&Path>) -> Result<Self, SuiteError> {
        let config = match path {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        Ok(Self {
            config_path: path.map(Path::to_path_buf),
            ..Self::with_config(config)
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            config_path: None,
            base_url_override: None,
            format_override: None,
            no_color: false,
        }
    }

    pub fn override_base_url(&mut self, base_url: String) {
        self.base_url_override = Some(base_url);
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format_override = Some(format);
    }

    pub fn set_no_color(&mut self, no_color: bool) {
        self.no_color = no_color;
    }

    /// Where the config was loaded from, and where it is saved.
    pub fn config_path(&self) -> Result<PathBuf, SuiteError> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::path(),
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url_override
            .clone()
            .or_else(|| std::env::var("PETFRIENDS_URL").ok())
            .unwrap_or_else(|| self.config.base_url.clone())
    }

    /// The account the suite treats as valid. Both halves must be known.
    pub fn credentials(&self) -> Result<Credentials, SuiteError> {
        match (self.email(), self.password()) {
            (Some(email), Some(password)) => Ok(Credentials::new(email, password)),
            _ => Err(SuiteError::MissingCredentials),
        }
    }

    pub fn email(&self) -> Option<String> {
        std::env::var("PETFRIENDS_EMAIL")
            .ok()
            .or_else(|| self.config.valid_email.clone())
    }

    pub fn password(&self) -> Option<String> {
        std::env::var("PETFRIENDS_PASSWORD")
            .ok()
            .or_else(|| self.config.valid_password.clone())
    }

    pub fn images_dir(&self) -> PathBuf {
        std::env::var_os("PETFRIENDS_IMAGES")
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.images_dir.clone())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format_override.unwrap_or_default()
    }

    pub fn no_color(&self) -> bool {
        self.no_color
    }
}
