//! Descriptor computation.
//!
//! Steps run in a fixed order and each may consume what earlier steps left
//! in `path`: scheme, ref, class, base path, provider defaults, name
//! default, ref check, then source and id.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::LocatorError;

use super::Locator;
use super::classify::UrlParts;
use super::normalize::split_host_port;
use super::serialize;

pub(crate) fn compute(
    input: &str,
    parts: UrlParts,
    catalog: &Catalog,
) -> Result<Locator, LocatorError> {
    let (domain, port) = split_host_port(&parts.host);
    let (domain, port) = (domain.to_string(), port.to_string());

    let mut locator = Locator {
        base_path: String::new(),
        class: String::new(),
        domain,
        fragment: parts.fragment,
        host: parts.host,
        id: String::new(),
        in_path: String::new(),
        name: String::new(),
        password: parts.password,
        path: parts.path,
        port,
        reference: String::new(),
        scheme: parts.scheme,
        source: String::new(),
        username: parts.username,
    };

    if locator.scheme.ends_with("+ssh") {
        locator.scheme = "ssh".to_string();
    }

    if let Some((path, reference)) = split_reference(&locator.path) {
        debug!(%reference, "extracted reference");
        locator.reference = reference.to_string();
        locator.path = path.to_string();
    }

    if let Some(boundary) = split_class(&locator.path, catalog) {
        debug!(class = boundary.class, "extracted class");
        locator.name = trim_separators(boundary.before).to_string();
        locator.in_path = trim_separators(boundary.after).to_string();
        locator.class = boundary.class.to_string();
        locator.path = boundary.before.to_string();
    }

    locator.base_path = trim_separators(&locator.path).to_string();

    if catalog.is_provider(&locator.host) {
        apply_provider_defaults(input, &mut locator)?;
    }

    if locator.name.is_empty() {
        locator.name = locator.base_path.clone();
    }

    if !locator.reference.is_empty() && locator.class != "git" {
        return Err(LocatorError::RefOnNonGitSource {
            input: input.to_string(),
            reference: locator.reference,
        });
    }

    locator.source = serialize::source(&locator);
    locator.id = serialize::id(&locator);
    debug!(source = %locator.source, id = %locator.id, "computed locator");

    Ok(locator)
}

fn apply_provider_defaults(input: &str, locator: &mut Locator) -> Result<(), LocatorError> {
    if locator.class.is_empty() {
        locator.class = "git".to_string();
    }

    if locator.name.is_empty() {
        let segments: Vec<&str> = locator.base_path.split('/').collect();
        if segments.len() < 2 {
            return Err(LocatorError::IncompleteProviderPath {
                input: input.to_string(),
                path: locator.path.clone(),
                host: locator.host.clone(),
            });
        }

        locator.name = segments[..2].join("/");
        locator.in_path = segments[2..].join("/");
        debug!(name = %locator.name, "derived provider repository name");
    }

    Ok(())
}

/// Split at the last `@`. A leading `@` alone does not count, the prefix
/// must be non-empty.
pub(crate) fn split_reference(path: &str) -> Option<(&str, &str)> {
    let at = path.rfind('@')?;
    if at == 0 {
        return None;
    }
    Some((&path[..at], &path[at + 1..]))
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ClassBoundary<'a> {
    pub before: &'a str,
    pub class: &'a str,
    pub after: &'a str,
}

/// Find the earliest `.<class>` followed by end of string or `/`.
pub(crate) fn split_class<'a>(path: &'a str, catalog: &Catalog) -> Option<ClassBoundary<'a>> {
    path.match_indices('.').find_map(|(dot, _)| {
        let rest = &path[dot + 1..];
        catalog.classes().find_map(|class| {
            let after = rest.strip_prefix(class)?;
            (after.is_empty() || after.starts_with('/')).then(|| ClassBoundary {
                before: &path[..dot],
                class: &rest[..class.len()],
                after,
            })
        })
    })
}

/// Drop one trailing and one leading `/`.
pub(crate) fn trim_separators(path: &str) -> &str {
    let path = path.strip_suffix('/').unwrap_or(path);
    path.strip_prefix('/').unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_split_uses_last_at() {
        assert_eq!(split_reference("user/repo@unstable"), Some(("user/repo", "unstable")));
        assert_eq!(split_reference("a@b@c"), Some(("a@b", "c")));
        assert_eq!(split_reference("user/repo@"), Some(("user/repo", "")));
        assert_eq!(split_reference("@only"), None);
        assert_eq!(split_reference("no-ref"), None);
    }

    #[test]
    fn class_split_is_leftmost() {
        let catalog = Catalog::builtin();
        assert_eq!(
            split_class("/path/to/repo.git/a/b", &catalog),
            Some(ClassBoundary {
                before: "/path/to/repo",
                class: "git",
                after: "/a/b",
            })
        );
        assert_eq!(split_class("/a.zip/b.tar.gz", &catalog).map(|b| b.class), Some("zip"));
        assert_eq!(
            split_class("/pkg-1.0.tar.gz", &catalog).map(|b| (b.before, b.class)),
            Some(("/pkg-1.0", "tar.gz"))
        );
    }

    #[test]
    fn class_must_end_at_separator() {
        let catalog = Catalog::builtin();
        assert_eq!(split_class("/repo.github/x", &catalog), None);
        assert_eq!(split_class("/repo.zipper", &catalog), None);
        assert_eq!(
            split_class("/repo.git.zip", &catalog).map(|b| (b.before, b.class)),
            Some(("/repo.git", "zip"))
        );
    }

    #[test]
    fn trim_separators_strips_one_each_side() {
        assert_eq!(trim_separators("/a/b/"), "a/b");
        assert_eq!(trim_separators("/"), "");
        assert_eq!(trim_separators(""), "");
        assert_eq!(trim_separators("a"), "a");
    }
}
