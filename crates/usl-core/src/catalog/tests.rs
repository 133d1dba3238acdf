//! Tests for the catalog module.

use super::*;
use crate::error::ConfigError;
use tempfile::TempDir;

#[test]
fn builtin_knows_default_providers() {
    let catalog = Catalog::builtin();
    for provider in DEFAULT_PROVIDERS {
        assert!(catalog.is_provider(provider));
    }
    assert!(!catalog.is_provider("example.com"));
}

#[test]
fn scheme_lookup_ignores_case() {
    let catalog = Catalog::builtin();
    assert!(catalog.supports_scheme("HTTPS"));
    assert!(catalog.supports_scheme("git+ssh"));
    assert!(!catalog.supports_scheme("svn"));
}

#[test]
fn extra_providers_are_normalised_and_deduplicated() {
    let catalog = Catalog::builtin().with_providers(["  Git.Example.org ", "github.com", ""]);
    assert!(catalog.is_provider("git.example.org"));
    assert_eq!(
        catalog.providers().filter(|p| *p == "github.com").count(),
        1
    );
    assert_eq!(catalog.providers().count(), DEFAULT_PROVIDERS.len() + 1);
}

#[test]
fn load_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usl.toml");
    std::fs::write(&path, "[providers]\nextra = [\"code.example.net\"]\n").unwrap();

    let catalog = Catalog::load(Some(&path)).unwrap();
    assert!(catalog.is_provider("code.example.net"));
    assert!(catalog.is_provider("github.com"));
}

#[test]
fn load_missing_explicit_config_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = Catalog::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn unknown_config_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usl.toml");
    std::fs::write(&path, "[schemes]\nextra = [\"svn\"]\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("usl.toml"));
}

#[test]
fn empty_config_is_builtin() {
    let config: CatalogConfig = toml::from_str("").unwrap();
    assert_eq!(Catalog::from_config(&config), Catalog::builtin());
}
