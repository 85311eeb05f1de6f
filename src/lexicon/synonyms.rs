//! Synonym sources used to expand product-type seeds.

use std::collections::HashMap;
use std::path::Path;

use crate::types::{LensError, LensResult};

/// A thesaurus-like lookup: word -> alternate word forms.
///
/// An `Err` means the source could not answer for this word. The lexicon
/// builder treats that as "no synonyms" and keeps going.
pub trait SynonymSource {
    /// Alternate forms for `word`. Order is irrelevant.
    fn synonyms(&self, word: &str) -> LensResult<Vec<String>>;
}

impl<F> SynonymSource for F
where
    F: Fn(&str) -> LensResult<Vec<String>>,
{
    fn synonyms(&self, word: &str) -> LensResult<Vec<String>> {
        self(word)
    }
}

/// A source that never returns synonyms.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

impl SynonymSource for NoSynonyms {
    fn synonyms(&self, _word: &str) -> LensResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Product senses of the seed terms, hand-picked from WordNet noun synsets.
/// Non-product senses ("call" or "ring" for phone) are left out.
/// Lemma separators are kept as in WordNet (`_`) and normalized on build.
const BUILTIN_ENTRIES: &[(&str, &[&str])] = &[
    ("phone", &["telephone", "telephone_set", "earphone", "earpiece", "headphone"]),
    ("mobile", &["mobile_phone", "cellphone", "cellular_phone", "cellular_telephone"]),
    ("charger", &["battery_charger"]),
    ("adapter", &["adaptor"]),
    ("cable", &["cable_television", "cable_system", "overseas_telegram"]),
    ("headphone", &["earphone", "earpiece", "phone", "headset"]),
    ("speaker", &["loudspeaker", "speaker_system", "speaker_unit", "loudspeaker_system"]),
    ("microphone", &["mike"]),
    ("earphone", &["earpiece", "headphone", "phone"]),
    ("laptop", &["laptop_computer"]),
    ("tablet", &["pad"]),
    ("computer", &["computing_machine", "computing_device", "data_processor", "information_processing_system"]),
    ("monitor", &["monitoring_device", "display"]),
    ("keyboard", &["keypad"]),
    ("mouse", &["computer_mouse"]),
    ("printer", &["printing_machine"]),
    ("camera", &["photographic_camera"]),
    ("watch", &["ticker", "wristwatch"]),
    ("refrigerator", &["icebox"]),
    ("fridge", &["refrigerator", "icebox"]),
    ("washing machine", &["washer", "automatic_washer"]),
    ("television", &["telecasting", "tv", "video", "television_receiver", "television_set", "tv_set", "idiot_box", "boob_tube", "telly", "goggle_box"]),
    ("microwave", &["microwave_oven"]),
    ("oven", &["stove"]),
    ("console", &["cabinet", "games_console"]),
    ("controller", &["control", "gamepad"]),
    ("processor", &["central_processing_unit", "cpu", "c.p.u.", "central_processor"]),
    ("motherboard", &["mother_board", "system_board"]),
    ("memory", &["computer_memory", "storage", "computer_storage", "memory_board"]),
];

/// A fixed, in-memory thesaurus.
#[derive(Debug, Clone, Default)]
pub struct StaticThesaurus {
    entries: HashMap<String, Vec<String>>,
}

impl StaticThesaurus {
    /// Create an empty thesaurus.
    pub fn new() -> Self {
        Self::default()
    }

    /// The thesaurus shipped with the crate, covering the seed product types.
    pub fn builtin() -> Self {
        let mut thesaurus = Self::new();
        for (word, alternates) in BUILTIN_ENTRIES {
            thesaurus.insert(word, alternates.iter().copied());
        }
        thesaurus
    }

    /// Parse a JSON object of the form `{"word": ["alt", ...], ...}`.
    pub fn from_json_str(json: &str) -> LensResult<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut thesaurus = Self::new();
        for (word, alternates) in raw {
            thesaurus.insert(&word, alternates);
        }
        Ok(thesaurus)
    }

    /// Read a JSON thesaurus file.
    pub fn from_json_file(path: &Path) -> LensResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LensError::Config(format!(
                "Failed to read thesaurus {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Add alternates for `word`, appending to any existing entry.
    pub fn insert<I, S>(&mut self, word: &str, alternates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(word.trim().to_lowercase())
            .or_default()
            .extend(alternates.into_iter().map(Into::into));
    }

    /// Merge another thesaurus into this one.
    pub fn merge(&mut self, other: StaticThesaurus) {
        for (word, alternates) in other.entries {
            self.entries.entry(word).or_default().extend(alternates);
        }
    }

    /// Number of head words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the thesaurus has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SynonymSource for StaticThesaurus {
    fn synonyms(&self, word: &str) -> LensResult<Vec<String>> {
        Ok(self
            .entries
            .get(&word.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}
