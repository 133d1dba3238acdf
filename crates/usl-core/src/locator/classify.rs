//! Input classification.
//!
//! Grammars are tried in order, first match wins:
//! 1. local paths are rejected
//! 2. without `://`: provider shortcut, then SCP shortcut, then a fallback
//!    scheme is prepended
//! 3. with `://`: the scheme must be supported
//! 4. everything that is not a shortcut goes through the URL normalizer

use std::borrow::Cow;

use tracing::debug;

use crate::catalog::{Catalog, FALLBACK_SCHEME};
use crate::error::LocatorError;

use super::local::is_local;
use super::normalize::{clean_path, normalize_url};

/// Components extracted before any domain-specific derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UrlParts {
    pub scheme: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub path: String,
    pub fragment: String,
}

pub(crate) fn classify(raw: &str, catalog: &Catalog) -> Result<UrlParts, LocatorError> {
    if is_local(raw) {
        return Err(LocatorError::LocalPathRejected {
            input: raw.to_string(),
        });
    }

    let text = match raw.split_once("://") {
        Some((scheme, _)) => {
            if !catalog.supports_scheme(scheme) {
                return Err(LocatorError::UnsupportedScheme {
                    input: raw.to_string(),
                    scheme: scheme.to_ascii_lowercase(),
                });
            }
            Cow::Borrowed(raw)
        }
        None => {
            if let Some(shortcut) = match_provider(raw, catalog) {
                debug!(provider = shortcut.provider, "matched provider shortcut");
                return shortcut.into_parts(raw);
            }
            if let Some(shortcut) = match_scp(raw) {
                debug!(host = shortcut.host, "matched scp shortcut");
                return Ok(shortcut.into_parts());
            }
            Cow::Owned(format!("{FALLBACK_SCHEME}://{raw}"))
        }
    };

    normalize_url(raw, &text)
}

/// `[user@]provider(:|/)path`
#[derive(Debug, PartialEq, Eq)]
struct ProviderShortcut<'a> {
    user: Option<&'a str>,
    provider: &'a str,
    separator: char,
    path: &'a str,
}

impl ProviderShortcut<'_> {
    fn into_parts(self, raw: &str) -> Result<UrlParts, LocatorError> {
        let (scheme, username) = match self.separator {
            ':' => match self.user {
                None | Some("git") => ("ssh", "git"),
                Some(user) => {
                    return Err(LocatorError::InvalidProviderUser {
                        input: raw.to_string(),
                        user: user.to_string(),
                    });
                }
            },
            _ => ("https", ""),
        };

        Ok(UrlParts {
            scheme: scheme.to_string(),
            username: username.to_string(),
            host: self.provider.to_string(),
            path: clean_path(self.path),
            ..UrlParts::default()
        })
    }
}

fn match_provider<'a>(raw: &'a str, catalog: &'a Catalog) -> Option<ProviderShortcut<'a>> {
    if let Some((user, rest)) = raw.split_once('@') {
        if is_token(user, is_provider_user_char) {
            if let Some((provider, separator, path)) = match_provider_host(rest, catalog) {
                return Some(ProviderShortcut {
                    user: Some(user),
                    provider,
                    separator,
                    path,
                });
            }
        }
    }

    match_provider_host(raw, catalog).map(|(provider, separator, path)| ProviderShortcut {
        user: None,
        provider,
        separator,
        path,
    })
}

fn match_provider_host<'a>(
    text: &'a str,
    catalog: &'a Catalog,
) -> Option<(&'a str, char, &'a str)> {
    catalog.providers().find_map(|provider| {
        let rest = text.strip_prefix(provider)?;
        let mut chars = rest.chars();
        let separator = chars.next().filter(|c| matches!(c, ':' | '/'))?;
        Some((provider, separator, chars.as_str()))
    })
}

/// `[user@]host:path`
#[derive(Debug, PartialEq, Eq)]
struct ScpShortcut<'a> {
    user: Option<&'a str>,
    host: &'a str,
    path: &'a str,
}

impl ScpShortcut<'_> {
    fn into_parts(self) -> UrlParts {
        UrlParts {
            scheme: "ssh".to_string(),
            username: self.user.unwrap_or_default().to_string(),
            host: self.host.to_string(),
            path: clean_path(self.path),
            ..UrlParts::default()
        }
    }
}

fn match_scp(raw: &str) -> Option<ScpShortcut<'_>> {
    let (user, rest) = match raw.split_once('@') {
        Some((user, rest)) if is_token(user, is_scp_user_char) => (Some(user), rest),
        _ => (None, raw),
    };

    let (host, path) = rest.split_once(':')?;
    if !is_token(host, is_scp_host_char) {
        return None;
    }

    Some(ScpShortcut { user, host, path })
}

fn is_token(text: &str, allowed: fn(char) -> bool) -> bool {
    !text.is_empty() && text.chars().all(allowed)
}

fn is_provider_user_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_scp_user_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_scp_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}
