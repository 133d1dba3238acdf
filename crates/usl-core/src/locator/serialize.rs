//! Canonical serialization of a computed locator.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::Locator;

/// Characters escaped inside a single path segment. Unreserved characters
/// and `$ & + : = @` pass through.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escape a string so it can be used as a single path segment.
pub fn path_escape(text: &str) -> String {
    utf8_percent_encode(text, PATH_SEGMENT).to_string()
}

/// Render the canonical source. Ref, fragment and in-path are never part of
/// it.
pub(crate) fn source(locator: &Locator) -> String {
    let mut buf = String::new();

    if locator.scheme == "file" {
        buf.push_str("file://");
        buf.push_str(&locator.host);
        buf.push_str(&locator.path);

        if !locator.class.is_empty() && locator.class != "git" {
            buf.push('.');
            buf.push_str(&locator.class);
        }

        return buf;
    }

    if locator.scheme == "ssh" && locator.port.is_empty() {
        if !locator.username.is_empty() {
            buf.push_str(&locator.username);
            buf.push('@');
        }

        buf.push_str(&locator.host);
        buf.push(':');
        buf.push_str(&locator.name);

        if !locator.class.is_empty() {
            buf.push('.');
            buf.push_str(&locator.class);
        }

        return buf;
    }

    buf.push_str(&locator.scheme);
    buf.push_str("://");

    if !locator.username.is_empty() {
        buf.push_str(&locator.username);

        if !locator.password.is_empty() {
            buf.push(':');
            buf.push_str(&locator.password);
        }

        buf.push('@');
    }

    buf.push_str(&locator.host);

    if locator.class.is_empty() {
        if !locator.base_path.is_empty() {
            buf.push('/');
            buf.push_str(&locator.base_path);
        }
    } else {
        buf.push('/');
        buf.push_str(&locator.name);
        buf.push('.');
        buf.push_str(&locator.class);
    }

    buf
}

/// Escaped source, with `@ref` appended before escaping.
pub(crate) fn id(locator: &Locator) -> String {
    if locator.reference.is_empty() {
        return path_escape(&locator.source);
    }

    path_escape(&format!("{}@{}", locator.source, locator.reference))
}
