//! Field projection of a locator.
//!
//! Exposes a finished [`Locator`] as a sorted `name -> value` mapping,
//! optionally overlaid with caller-supplied template fields.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::error::TemplateError;
use crate::locator::Locator;
use crate::template::{Template, Variables};

type Accessor = fn(&Locator) -> &str;

/// Projected fields in lexicographic order.
pub static FIELDS: &[(&str, Accessor)] = &[
    ("basepath", Locator::base_path),
    ("class", class_or_empty),
    ("domain", Locator::domain),
    ("fragment", Locator::fragment),
    ("host", Locator::host),
    ("id", Locator::id),
    ("inpath", Locator::in_path),
    ("name", Locator::name),
    ("password", Locator::password),
    ("path", Locator::path),
    ("port", Locator::port),
    ("ref", reference_or_empty),
    ("scheme", Locator::scheme),
    ("source", Locator::source),
    ("username", Locator::username),
];

fn class_or_empty(locator: &Locator) -> &str {
    locator.class().unwrap_or_default()
}

fn reference_or_empty(locator: &Locator) -> &str {
    locator.reference().unwrap_or_default()
}

/// Read-only, key-ordered view of a locator's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Projection {
    values: BTreeMap<String, String>,
}

impl Projection {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs for the requested keys, in request order. Unknown keys are
    /// skipped; an empty request selects every key.
    pub fn select<'a>(&'a self, keys: &'a [String]) -> Vec<(&'a str, &'a str)> {
        if keys.is_empty() {
            return self.iter().collect();
        }

        keys.iter()
            .filter_map(|key| self.get(key).map(|value| (key.as_str(), value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl Variables for Projection {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

/// Project every locator field.
pub fn project(locator: &Locator) -> Projection {
    let values = FIELDS
        .iter()
        .map(|(name, accessor)| (name.to_string(), accessor(locator).to_string()))
        .collect();

    Projection { values }
}

/// Project every locator field, then render each overlay expression against
/// the base fields and insert the result under its name.
///
/// Overlay entries override base fields of the same name. Expressions only
/// see base fields, never other overlay entries.
pub fn project_with_overlay<K, V>(
    locator: &Locator,
    overlay: impl IntoIterator<Item = (K, V)>,
) -> Result<Projection, TemplateError>
where
    K: Into<String>,
    V: AsRef<str>,
{
    let base = project(locator);
    let mut rendered: HashMap<String, String> = HashMap::new();

    for (name, expression) in overlay {
        let name = name.into();
        let value = Template::parse(expression.as_ref())?.render(&base)?;
        debug!(%name, %value, "rendered overlay field");
        rendered.insert(name, value);
    }

    let mut projection = base;
    projection.values.extend(rendered);
    Ok(projection)
}
