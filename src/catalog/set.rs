//! A collection of catalogs keyed by locale.
//!
//! Cross-locale checks (which messages exist somewhere but not everywhere)
//! need the union of message identities over every loaded catalog; this
//! module owns that bookkeeping so reports stay a pure rendering concern.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::Catalog;

/// The identity of one message across catalogs.
///
/// Two entries are the same message when context name, source text and
/// disambiguation comment all agree, regardless of locations or status.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.context, self.source)?;
        if let Some(comment) = &self.comment {
            write!(f, " ({comment})")?;
        }
        Ok(())
    }
}

/// Catalogs for several locales, iterated in locale order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<String, Catalog>,
}

impl CatalogSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog under a locale, replacing any previous one.
    pub fn insert(&mut self, locale: impl Into<String>, catalog: Catalog) -> Option<Catalog> {
        self.catalogs.insert(locale.into(), catalog)
    }

    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Catalog)> {
        self.catalogs.iter().map(|(locale, catalog)| (locale.as_str(), catalog))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// The union of live message identities over every catalog.
    ///
    /// Obsolete-class entries are skipped: a message that only survives as
    /// vanished text in one locale is not expected anywhere else.
    #[must_use]
    pub fn identities(&self) -> BTreeSet<MessageKey> {
        let mut keys = BTreeSet::new();
        for catalog in self.catalogs.values() {
            for (context, message) in catalog.messages() {
                if message.is_obsolete() {
                    continue;
                }
                keys.insert(MessageKey {
                    context: context.name.clone(),
                    source: message.source.clone(),
                    comment: message.comment.clone(),
                });
            }
        }
        keys
    }

    /// Identities present in some catalog but absent from this locale.
    ///
    /// Returns an empty list for unknown locales; a locale that was never
    /// loaded is reported elsewhere, not as a missing-message list.
    #[must_use]
    pub fn missing_from(&self, locale: &str) -> Vec<MessageKey> {
        let Some(catalog) = self.catalogs.get(locale) else {
            return Vec::new();
        };

        let mut present = BTreeSet::new();
        for (context, message) in catalog.messages() {
            if !message.is_obsolete() {
                present.insert(MessageKey {
                    context: context.name.clone(),
                    source: message.source.clone(),
                    comment: message.comment.clone(),
                });
            }
        }

        self.identities().into_iter().filter(|key| !present.contains(key)).collect()
    }
}
