//! Language token resolution
//!
//! Item data refers to display strings through opaque tokens such as
//! `#PaintKit_cu_fade_Tag`. Resolving them is delegated to a
//! [`LanguageResolver`] so callers can plug in whatever localization
//! source they loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("language token `{key}` not found")]
    NotFound { key: String },
}

/// Translates language tokens into display strings
pub trait LanguageResolver {
    fn lookup(&self, key: &str) -> Result<String, LanguageError>;
}

impl<T: LanguageResolver + ?Sized> LanguageResolver for &T {
    fn lookup(&self, key: &str) -> Result<String, LanguageError> {
        (**self).lookup(key)
    }
}

/// In-memory token table.
///
/// Keys are normalized on insert and on lookup: one leading `#` is
/// dropped and the rest is lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct LanguageTable {
    tokens: HashMap<String, String>,
}

fn normalize(key: &str) -> String {
    key.strip_prefix('#').unwrap_or(key).to_lowercase()
}

impl LanguageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.tokens.insert(normalize(key.as_ref()), value.into());
    }

    /// Get a token without going through the error path
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens.get(&normalize(key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for LanguageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl From<HashMap<String, String>> for LanguageTable {
    fn from(tokens: HashMap<String, String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<LanguageTable> for HashMap<String, String> {
    fn from(table: LanguageTable) -> Self {
        table.tokens
    }
}

impl LanguageResolver for LanguageTable {
    fn lookup(&self, key: &str) -> Result<String, LanguageError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| LanguageError::NotFound {
                key: key.to_string(),
            })
    }
}
