//! Keyword extraction: noisy text to canonical product-intent tokens.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{is_stopword, Lexicon, TransliterationMap};
use crate::types::KEYWORD_CAP;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit-run pattern"));
static DIGITS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("digits-only pattern"));

/// Which pipeline stage produced the final keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// Exact token, transliteration or numeric-fusion matches.
    Strict,
    /// Unscoped substring scan over the raw text.
    Fallback,
    /// Nothing matched.
    Empty,
}

/// Keywords plus the stage that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// At most `cap` distinct keywords in first-seen order.
    pub keywords: Vec<String>,
    pub stage: MatchStage,
}

/// Stateless extractor over a shared, read-only lexicon.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    lexicon: Arc<Lexicon>,
    transliteration: Arc<TransliterationMap>,
    cap: usize,
}

impl KeywordExtractor {
    /// Create an extractor with the default keyword cap.
    pub fn new(lexicon: Arc<Lexicon>, transliteration: Arc<TransliterationMap>) -> Self {
        Self {
            lexicon,
            transliteration,
            cap: KEYWORD_CAP,
        }
    }

    /// Override the maximum number of keywords returned.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Keywords for `text`. Never fails; unmatched text yields an empty list.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_detailed(text).keywords
    }

    /// Keywords for `text` along with the stage that produced them.
    pub fn extract_detailed(&self, text: &str) -> Extraction {
        run_pipeline(text, &self.lexicon, &self.transliteration, self.cap)
    }
}

fn run_pipeline(
    text: &str,
    lexicon: &Lexicon,
    transliteration: &TransliterationMap,
    cap: usize,
) -> Extraction {
    let text = text.to_lowercase();

    let filtered: Vec<&str> = text
        .split_whitespace()
        .filter(|w| !is_stopword(w))
        .collect();

    let mut candidates: Vec<String> = Vec::new();

    // Exact matches, once per matching role.
    for &word in &filtered {
        if lexicon.is_product_type(word) {
            candidates.push(word.to_string());
        }
        if lexicon.is_brand(word) {
            candidates.push(word.to_string());
        }
        if lexicon.is_specification(word) {
            candidates.push(word.to_string());
        }
    }

    for &word in &filtered {
        if let Some(canonical) = transliteration.canonical(word) {
            if lexicon.is_product_type(canonical) {
                candidates.push(canonical.to_string());
            }
        }
    }

    // "8 gb" -> "8gb"
    for pair in filtered.windows(2) {
        let (prev, word) = (pair[0], pair[1]);
        if lexicon.is_specification(word) && DIGITS_ONLY.is_match(prev) {
            candidates.push(format!("{prev}{word}"));
        }
    }

    // "128gb" anywhere in the raw text; first spec per digit run wins.
    for number in DIGIT_RUN.find_iter(&text) {
        let number = number.as_str();
        for spec in lexicon.specifications() {
            let fused = format!("{number}{spec}");
            if text.contains(&fused) {
                candidates.push(fused);
                break;
            }
        }
    }

    let stage = if !candidates.is_empty() {
        MatchStage::Strict
    } else {
        candidates.extend(
            lexicon
                .product_types()
                .chain(lexicon.brands())
                .filter(|term| text.contains(term))
                .map(str::to_string),
        );
        if candidates.is_empty() {
            MatchStage::Empty
        } else {
            log::debug!("Keyword fallback matched {} substrings", candidates.len());
            MatchStage::Fallback
        }
    };

    Extraction {
        keywords: dedup_truncate(candidates, cap),
        stage,
    }
}

/// Remove repeats keeping the first occurrence, then keep the first `cap`.
fn dedup_truncate(candidates: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(candidates.len());
    let mut out: Vec<String> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect();
    out.truncate(cap);
    out
}

/// One-shot extraction against an explicit lexicon and transliteration map.
pub fn extract_keywords(
    text: &str,
    lexicon: &Lexicon,
    transliteration: &TransliterationMap,
) -> Vec<String> {
    run_pipeline(text, lexicon, transliteration, KEYWORD_CAP).keywords
}
