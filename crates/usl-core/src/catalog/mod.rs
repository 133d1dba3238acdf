//! Lookup sets consulted while classifying and deriving locators.
//!
//! A [`Catalog`] is built once (usually at process start) and then only
//! borrowed. Schemes and classes are fixed; providers can be extended through
//! the configuration file handled by [`store`].

pub mod store;

use serde::Deserialize;
use tracing::debug;

pub use store::{config_path, load_config};

/// Schemes accepted after an explicit `://`.
pub const SUPPORTED_SCHEMES: &[&str] = &[
    "https", "http", "ssh", "git", "git+ssh", "ftp", "ftps", "file",
];

/// Hosting domains eligible for `org/repo` inference.
pub const DEFAULT_PROVIDERS: &[&str] = &[
    "bitbucket.com",
    "github.com",
    "gitlab.com",
    "salsa.debian.org",
];

/// Archive and VCS suffixes that delimit a resource inside a path.
pub const SUPPORTED_CLASSES: &[&str] = &["git", "tar.bz2", "tar.gz", "tar.xz", "tgz", "zip"];

/// Scheme used when a locator has neither a scheme nor a shorthand form.
pub const FALLBACK_SCHEME: &str = "https";

/// Immutable lookup data for the classifier and the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    providers: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The catalog with the built-in provider list.
    pub fn builtin() -> Self {
        Self {
            providers: DEFAULT_PROVIDERS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Built-in catalog extended with the providers of a configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::builtin().with_providers(&config.providers.extra)
    }

    /// Add providers, normalised to lower case. Blank and duplicate entries
    /// are ignored.
    pub fn with_providers(mut self, extra: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        for provider in extra {
            let provider = provider.as_ref().trim().to_ascii_lowercase();
            if provider.is_empty() || self.providers.contains(&provider) {
                continue;
            }
            debug!(%provider, "registering extra provider");
            self.providers.push(provider);
        }
        self
    }

    pub fn supports_scheme(&self, scheme: &str) -> bool {
        SUPPORTED_SCHEMES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }

    pub fn is_provider(&self, host: &str) -> bool {
        self.providers.iter().any(|p| p == host)
    }

    /// Providers in registration order (built-ins first).
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(String::as_str)
    }

    pub fn classes(&self) -> impl Iterator<Item = &'static str> {
        SUPPORTED_CLASSES.iter().copied()
    }
}

/// On-disk configuration (`usl.toml`).
///
/// ```toml
/// [providers]
/// extra = ["git.example.org"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Hosts treated like the built-in providers.
    #[serde(default)]
    pub extra: Vec<String>,
}

#[cfg(test)]
mod tests;
