use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::Category;

/// A single unverified recommendation as written by the language model
///
/// Flat string fields only. Every suggestion should carry a `title`; songs also
/// carry an `artist`, but nothing enforces either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suggestion(BTreeMap<String, String>);

impl Suggestion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn artist(&self) -> Option<&str> {
        self.get("artist")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All fields except the given keys
    pub fn fields_without(&self, excluded: &[&str]) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter(|(key, _)| !excluded.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Suggestion {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Named sequences of suggestions recovered from one model reply
///
/// Keys are whatever array names the reply contained; only `movies`, `books`
/// and `songs` are consumed downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(HashMap<String, Vec<Suggestion>>);

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, suggestions: Vec<Suggestion>) {
        self.0.insert(key.into(), suggestions);
    }

    pub fn get(&self, key: &str) -> Option<&[Suggestion]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn category(&self, category: Category) -> Option<&[Suggestion]> {
        self.get(category.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of suggestions per category, for logging
    pub fn counts(&self) -> [(Category, Option<usize>); 3] {
        Category::ALL.map(|category| (category, self.category(category).map(<[_]>::len)))
    }
}
