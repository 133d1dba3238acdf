//! Local path resolution.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LocatorError;

use super::normalize::clean_path;

const LOCAL_PREFIXES: [&str; 3] = ["/", "./", "../"];

/// Whether the input looks like a local filesystem path.
pub fn is_local(input: &str) -> bool {
    LOCAL_PREFIXES.iter().any(|prefix| input.starts_with(prefix))
}

/// Rewrite a local path into a `file://` locator against the process
/// working directory. Anything else is returned unchanged.
pub fn resolve_local(raw: &str) -> Result<Cow<'_, str>, LocatorError> {
    resolve_local_in(raw, std::env::current_dir)
}

/// Same as [`resolve_local`], with the base directory supplied by
/// `base_dir`. It is only called for local input.
pub fn resolve_local_in(
    raw: &str,
    base_dir: impl FnOnce() -> io::Result<PathBuf>,
) -> Result<Cow<'_, str>, LocatorError> {
    if !is_local(raw) {
        return Ok(Cow::Borrowed(raw));
    }

    let base = base_dir().map_err(|source| LocatorError::FilesystemResolutionError {
        input: raw.to_string(),
        source,
    })?;

    Ok(resolve_local_from(raw, &base))
}

/// Same as [`resolve_local`] with an explicit (absolute) base directory.
pub fn resolve_local_from<'a>(raw: &'a str, base: &Path) -> Cow<'a, str> {
    if !is_local(raw) {
        return Cow::Borrowed(raw);
    }

    let absolute = if raw.starts_with('/') {
        clean_path(raw)
    } else {
        clean_path(&format!("{}/{raw}", base.to_string_lossy()))
    };
    debug!(%raw, %absolute, "resolved local path");

    Cow::Owned(format!("file://{absolute}"))
}
