//! Error types for locator parsing, configuration loading and templates.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning raw text into a [`crate::Locator`].
///
/// Every variant carries the offending input as given by the caller.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Local filesystem syntax where only remote locators are accepted.
    #[error("local file paths not allowed: {input:?}")]
    LocalPathRejected { input: String },

    /// Explicit scheme outside of the supported set.
    #[error("unsupported scheme {scheme:?} in {input:?}")]
    UnsupportedScheme { input: String, scheme: String },

    /// A `:`-separated provider shortcut with a user other than `git`.
    #[error("user must be 'git' for provider shortcut {input:?}, found {user:?}")]
    InvalidProviderUser { input: String, user: String },

    /// The underlying URL parser rejected the text.
    #[error("invalid locator {input:?}: {source}")]
    UrlSyntaxError {
        input: String,
        source: url::ParseError,
    },

    /// Known provider host with fewer than two path segments.
    #[error("incomplete repository path {path:?} for provider {host:?} in {input:?}")]
    IncompleteProviderPath {
        input: String,
        path: String,
        host: String,
    },

    /// A reference was given but the resolved class is not `git`.
    #[error("reference found for non git source {input:?}: {reference:?}")]
    RefOnNonGitSource { input: String, reference: String },

    /// A local path could not be made absolute.
    #[error("cannot resolve local path {input:?}: {source}")]
    FilesystemResolutionError {
        input: String,
        source: std::io::Error,
    },
}

/// Errors raised while parsing or rendering an overlay template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template text is malformed.
    #[error("template parse error in {template:?}: {message}")]
    Parse { template: String, message: String },

    /// A `.name` lookup with no matching field.
    #[error("unknown variable {name:?}")]
    UnknownVariable { name: String },

    /// A function name the engine does not provide.
    #[error("unknown function {name:?}")]
    UnknownFunction { name: String },

    /// A function called with the wrong number of arguments.
    #[error("function {name:?} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// `pwd` could not read the working directory.
    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Errors raised while loading the catalog configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
