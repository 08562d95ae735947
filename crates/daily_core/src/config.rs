//! Storage root configuration.
//!
//! # Responsibility
//! - Load the optional `~/.daily/config.toml` file.
//! - Resolve the storage root from override, config file and default.
//!
//! # Invariants
//! - Resolution is pure; callers pass the home directory explicitly.
//! - Priority is override > config file > `<home>/.daily/dailies`.
//! - An absent config file is not an error.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding config, logs and dailies.
pub const CONFIG_DIR_NAME: &str = ".daily";
pub const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_DAILIES_DIR_NAME: &str = "dailies";
const LOG_DIR_NAME: &str = "logs";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading/writing failure.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Toml { path: PathBuf, source: toml::de::Error },
    Encode { path: PathBuf, source: toml::ser::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Toml { path, source } => {
                write!(f, "invalid config file `{}`: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "failed to encode config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Toml { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyConfig {
    /// Storage root; `~` is expanded against the home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dailies_dir: Option<PathBuf>,
}

/// Which input decided the storage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Override,
    ConfigFile,
    Default,
}

impl RootSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::ConfigFile => "config_file",
            Self::Default => "default",
        }
    }
}

pub fn config_dir(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR_NAME)
}

pub fn config_path(home: &Path) -> PathBuf {
    config_dir(home).join(CONFIG_FILE_NAME)
}

pub fn default_dailies_dir(home: &Path) -> PathBuf {
    config_dir(home).join(DEFAULT_DAILIES_DIR_NAME)
}

pub fn default_log_dir(home: &Path) -> PathBuf {
    config_dir(home).join(LOG_DIR_NAME)
}

/// Loads the config file at `path`; `Ok(None)` when it does not exist.
pub fn load_config(path: &Path) -> ConfigResult<Option<DailyConfig>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|err| ConfigError::Toml {
            path: path.to_path_buf(),
            source: err,
        })
}

/// Resolves the storage root.
pub fn resolve_storage_root(
    override_dir: Option<&Path>,
    config: Option<&DailyConfig>,
    home: &Path,
) -> (PathBuf, RootSource) {
    if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return (expand_home(dir, home), RootSource::Override);
    }
    if let Some(dir) = config
        .and_then(|config| config.dailies_dir.as_deref())
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        return (expand_home(dir, home), RootSource::ConfigFile);
    }
    (default_dailies_dir(home), RootSource::Default)
}

/// Expands a leading `~` component to `home`.
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Writes a commented default config unless one already exists.
///
/// Returns `true` when a file was created.
pub fn write_default_config(home: &Path) -> ConfigResult<bool> {
    let path = config_path(home);
    if path.exists() {
        return Ok(false);
    }
    let io_err = |source: io::Error| ConfigError::Io {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(config_dir(home)).map_err(io_err)?;

    let config = DailyConfig {
        dailies_dir: Some(default_dailies_dir(home)),
    };
    let body = toml::to_string(&config).map_err(|source| ConfigError::Encode {
        path: path.clone(),
        source,
    })?;
    let template = format!(
        "# daily configuration\n\n\
# Directory where daily notes are stored.\n\
# `~` expands to your home directory.\n\
{body}"
    );
    fs::write(&path, template).map_err(io_err)?;
    Ok(true)
}
