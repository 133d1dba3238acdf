//! USL Core Library
//!
//! Parses developer-supplied source locators (git repositories, archives,
//! plain resources) written in any of the supported shorthand notations
//! into one canonical, structured [`Locator`].

pub mod catalog;
pub mod error;
pub mod locator;
pub mod project;
pub mod template;

pub use catalog::{Catalog, CatalogConfig};
pub use error::{ConfigError, LocatorError, TemplateError};
pub use locator::{Locator, Parser, is_local};
pub use project::{Projection, project, project_with_overlay};

/// Parse a locator with the built-in catalog, rejecting local paths.
pub fn parse(raw: &str) -> Result<Locator, LocatorError> {
    Locator::parse(raw)
}

/// Parse a locator with the built-in catalog, rewriting local paths to
/// `file://` locators first.
pub fn parse_with_local_paths(raw: &str) -> Result<Locator, LocatorError> {
    Locator::parse_with_local_paths(raw)
}
