//! Closed auto-reply template registry.
//!
//! Template identifiers resolve against an enumerable mapping fixed at
//! configuration-load time. An unknown identifier is not an error: it falls
//! back to the identifier itself as literal text, so a caller can pass
//! one-off template text through the same channel.

use std::borrow::Cow;
use std::collections::BTreeMap;

use orderdesk_types::config::TemplateEntry;
use tracing::warn;

/// Enumerable mapping from template name to fixed text.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    entries: BTreeMap<String, String>,
}

impl TemplateSet {
    /// Build the registry from configuration entries.
    ///
    /// Duplicate names keep the first occurrence; later duplicates are
    /// logged and dropped so the key set stays closed and unambiguous.
    pub fn from_entries(entries: &[TemplateEntry]) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            if map.contains_key(&entry.name) {
                warn!(name = %entry.name, "duplicate template name ignored");
                continue;
            }
            map.insert(entry.name.clone(), entry.text.clone());
        }
        Self { entries: map }
    }

    /// Resolve a template identifier to its text.
    ///
    /// Unknown identifiers resolve to the identifier itself, verbatim.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        match self.entries.get(name) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(name),
        }
    }

    /// Whether `name` is part of the closed key set.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate the known template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
