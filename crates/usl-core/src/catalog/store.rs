//! Config file lookup and loading for the catalog.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::{Catalog, CatalogConfig};

/// Default location of the configuration file (`<config dir>/usl/usl.toml`).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("usl").join("usl.toml"))
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Catalog {
    /// Build the catalog for a process.
    ///
    /// An explicit path must be readable. Without one, the default config
    /// path is used when the file exists and the built-in catalog otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading catalog config");
            return Ok(Self::from_config(&load_config(path)?));
        }

        match config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading default catalog config");
                Ok(Self::from_config(&load_config(&path)?))
            }
            _ => Ok(Self::builtin()),
        }
    }
}
