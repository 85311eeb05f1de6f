//! Informal, misspelled and romanized tokens mapped to canonical English.

use std::collections::HashMap;

/// Default mappings observed in shopper queries.
const DEFAULT_PAIRS: &[(&str, &str)] = &[
    ("chahiye", "need"),
    ("chahiya", "need"),
    ("fone", "phone"),
    ("phon", "phone"),
    ("fon", "phone"),
    ("leptop", "laptop"),
    ("fridz", "fridge"),
    ("frij", "fridge"),
    ("tv", "tv"),
    ("tivi", "tv"),
    ("mobail", "mobile"),
    ("mobile", "phone"),
];

/// Immutable token -> canonical token mapping.
#[derive(Debug, Clone)]
pub struct TransliterationMap {
    map: HashMap<String, String>,
}

impl TransliterationMap {
    /// Build a map from explicit pairs. Keys and values are lowercased.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| {
                (
                    k.as_ref().trim().to_lowercase(),
                    v.as_ref().trim().to_lowercase(),
                )
            })
            .collect();
        Self { map }
    }

    /// Canonical form for `token`, if it has one.
    ///
    /// Mapping is a single hop: "mobail" yields "mobile", not "phone".
    pub fn canonical(&self, token: &str) -> Option<&str> {
        self.map.get(token).map(String::as_str)
    }

    /// Number of mapped tokens.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for TransliterationMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_PAIRS.iter().copied())
    }
}
