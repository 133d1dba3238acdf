//! Locator parsing.
//!
//! This module turns raw locator text into a [`Locator`]:
//! - `local` rewrites filesystem paths into `file://` locators (opt-in)
//! - `classify` picks the grammar (provider shortcut, SCP shortcut, URL)
//! - `normalize` canonicalises URL components and cleans paths
//! - `pipeline` derives ref, class, name and in-path
//! - `serialize` renders the canonical source and identifier

mod classify;
mod local;
mod normalize;
mod pipeline;
mod serialize;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::error::LocatorError;

pub use local::{is_local, resolve_local, resolve_local_from, resolve_local_in};
pub use serialize::path_escape;

static BUILTIN_CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// Canonical, structured description of a source location.
///
/// Created once by a parse call and never mutated afterwards. Optional
/// fields are empty strings internally; the accessors for `class` and `ref`
/// expose them as `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locator {
    #[serde(rename = "basepath")]
    base_path: String,
    class: String,
    domain: String,
    fragment: String,
    host: String,
    id: String,
    #[serde(rename = "inpath")]
    in_path: String,
    name: String,
    password: String,
    path: String,
    port: String,
    #[serde(rename = "ref")]
    reference: String,
    scheme: String,
    source: String,
    username: String,
}

impl Locator {
    /// Parse with the built-in catalog. Local paths are rejected.
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        Parser::new(&BUILTIN_CATALOG).parse(raw)
    }

    /// Parse with the built-in catalog, resolving local paths first.
    pub fn parse_with_local_paths(raw: &str) -> Result<Self, LocatorError> {
        Parser::new(&BUILTIN_CATALOG).parse_with_local_paths(raw)
    }

    /// Transport scheme (`https`, `ssh`, `file`, ...).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Raw authority, `domain[:port]`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Working path with ref and class peeled off.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `path` without its leading and trailing separator.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Recognized archive or VCS suffix, e.g. `git` or `tar.gz`.
    pub fn class(&self) -> Option<&str> {
        non_empty(&self.class)
    }

    /// Logical resource name (e.g. `org/repo`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subpath inside the resource.
    pub fn in_path(&self) -> &str {
        &self.in_path
    }

    /// Git reference (branch, tag or commit).
    pub fn reference(&self) -> Option<&str> {
        non_empty(&self.reference)
    }

    /// Canonical, reparsable locator. Excludes ref, fragment and in-path.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Percent-escaped source, suffixed with `@ref` when a ref is present.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Locator parser bound to a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'c> {
    catalog: &'c Catalog,
}

impl<'c> Parser<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Parse a locator, rejecting local filesystem paths.
    #[instrument(skip(self), level = "debug")]
    pub fn parse(&self, raw: &str) -> Result<Locator, LocatorError> {
        let parts = classify::classify(raw, self.catalog)?;
        pipeline::compute(raw, parts, self.catalog)
    }

    /// Parse a locator, rewriting `/`, `./` and `../` paths into absolute
    /// `file://` locators relative to the working directory.
    #[instrument(skip(self), level = "debug")]
    pub fn parse_with_local_paths(&self, raw: &str) -> Result<Locator, LocatorError> {
        let input = resolve_local(raw)?;
        self.parse(&input)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
