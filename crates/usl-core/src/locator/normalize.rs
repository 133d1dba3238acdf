//! URL normalization and lexical path cleaning.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::LocatorError;

use super::classify::UrlParts;

/// Parse `text` as a URL and canonicalise its components.
///
/// Scheme and host are lower-cased, `:80` on http and `:443` on https
/// dropped, dot segments resolved, the fragment stripped, duplicate
/// separators collapsed and a trailing separator removed. User-info and path come back decoded.
pub(crate) fn normalize_url(input: &str, text: &str) -> Result<UrlParts, LocatorError> {
    let mut url = Url::parse(text).map_err(|source| LocatorError::UrlSyntaxError {
        input: input.to_string(),
        source,
    })?;
    url.set_fragment(None);

    // `url` drops every known default port and file `localhost`; put them
    // back from the authority as written.
    let (raw_domain, raw_port) = split_host_port(raw_authority(text));

    let domain = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
        _ if url.scheme() == "file" && raw_domain.eq_ignore_ascii_case("localhost") => {
            "localhost".to_string()
        }
        _ => String::new(),
    };

    let port = match url.port() {
        Some(port) => port.to_string(),
        None if keeps_default_port(url.scheme(), raw_port) => raw_port.to_string(),
        None => String::new(),
    };

    let host = if domain.is_empty() || port.is_empty() {
        domain
    } else {
        format!("{domain}:{port}")
    };

    let path = collapse_separators(&decode(url.path()));
    let path = path.strip_suffix('/').unwrap_or(&path).to_string();

    Ok(UrlParts {
        scheme: url.scheme().to_string(),
        username: decode(url.username()),
        password: url.password().map(decode).unwrap_or_default(),
        host,
        path,
        fragment: String::new(),
    })
}

/// Authority as written, without user-info.
fn raw_authority(text: &str) -> &str {
    let rest = text.split_once("://").map_or(text, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    authority.rsplit_once('@').map_or(authority, |(_, host)| host)
}

fn keeps_default_port(scheme: &str, port: &str) -> bool {
    !port.is_empty() && !matches!((scheme, port), ("http", "80") | ("https", "443"))
}

/// Split `host[:port]`; bracketed IPv6 hosts lose their brackets only when a
/// port is present.
pub(crate) fn split_host_port(host: &str) -> (&str, &str) {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((addr, tail)) => match tail.strip_prefix(':') {
                Some(port) => (addr, port),
                None => (host, ""),
            },
            None => (host, ""),
        };
    }

    match host.rsplit_once(':') {
        Some((domain, port)) if !domain.contains(':') => (domain, port),
        _ => (host, ""),
    }
}

/// Lexically clean a slash-separated path.
///
/// Repeated separators collapse, `.` segments vanish, `..` removes the
/// preceding segment (and is dropped at the root of an absolute path). A
/// trailing separator is removed and an empty result becomes `.`.
pub(crate) fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

fn decode(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}
