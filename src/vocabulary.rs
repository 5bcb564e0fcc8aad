// ============================================
// src/vocabulary.rs
// Word store: vocabulary entries and how they are loaded
// ============================================

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::VocabularyError;

/// B1-B2 word list compiled into the binary
const BUILTIN_VOCABULARY: &str = include_str!("../data/vocabulary.json");

/// Number of boxes in the frequency bar
pub const FREQUENCY_BOXES: usize = 7;

/// How common a word is, as a rank. Higher means more frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency(pub u32);

impl Default for Frequency {
    /// Entries without a rank sit in the middle of the scale
    fn default() -> Self {
        Frequency(3)
    }
}

impl Frequency {
    /// How many of the `FREQUENCY_BOXES` boxes are filled for this rank
    pub fn filled_boxes(self) -> usize {
        match self.0 {
            0..=2 => 2,
            3..=4 => 4,
            _ => FREQUENCY_BOXES,
        }
    }
}

/// One piece of a compound word, e.g. "Kühl" → "cool"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPart {
    pub part: String,
    pub meaning: String,
}

/// A single flashcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub german: String,              // shown to the player, unique in the pool
    pub english: String,             // expected answer
    pub category: String,            // where it came from in the document
    pub example: Option<String>,
    pub frequency: Frequency,
    /// Word breakdown, already paired up part-by-part
    pub decomposition: Option<Vec<WordPart>>,
    pub connected_words: Vec<String>,
}

impl VocabularyEntry {
    /// Case-insensitive, whitespace-trimmed comparison against the expected answer
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.english.trim().to_lowercase()
    }
}

/// Shape of an entry as written in the JSON document.
/// Everything is optional here so we can report precise errors ourselves.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    german: Option<String>,
    english: Option<String>,
    example: Option<String>,
    frequency: Option<u32>,
    decomposition: Option<Vec<String>>,
    decomposition_meaning: Option<Vec<String>>,
    #[serde(default)]
    connected_words: Vec<String>,
}

fn required(
    value: Option<String>,
    field: &'static str,
    category: &str,
    index: usize,
) -> Result<String, VocabularyError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(VocabularyError::MissingField {
            category: category.to_string(),
            index,
            field,
        }),
    }
}

impl RawEntry {
    fn validate(self, category: &str, index: usize) -> Result<VocabularyEntry, VocabularyError> {
        let german = required(self.german, "german", category, index)?;
        let english = required(self.english, "english", category, index)?;

        let decomposition = match (self.decomposition, self.decomposition_meaning) {
            (None, None) => None,
            (Some(parts), Some(meanings)) if parts.len() == meanings.len() => Some(
                parts
                    .into_iter()
                    .zip(meanings)
                    .map(|(part, meaning)| WordPart { part, meaning })
                    .collect(),
            ),
            (parts, meanings) => {
                return Err(VocabularyError::MismatchedDecomposition {
                    category: category.to_string(),
                    index,
                    german,
                    parts: parts.map_or(0, |p| p.len()),
                    meanings: meanings.map_or(0, |m| m.len()),
                });
            }
        };

        Ok(VocabularyEntry {
            german,
            english,
            category: category.to_string(),
            example: self.example.filter(|e| !e.trim().is_empty()),
            // a rank of 0 means "unknown", same as leaving it out
            frequency: self
                .frequency
                .filter(|&rank| rank > 0)
                .map(Frequency)
                .unwrap_or_default(),
            decomposition,
            connected_words: self.connected_words,
        })
    }
}

/// The flattened, read-only word pool. Never empty.
#[derive(Debug, Clone)]
pub struct WordStore {
    words: Vec<VocabularyEntry>,
    categories: Vec<(String, usize)>,
}

impl WordStore {
    /// The word list shipped with the game
    pub fn builtin() -> Result<Self, VocabularyError> {
        Self::from_json(BUILTIN_VOCABULARY)
    }

    /// MARK:Load a vocabulary document from disk
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let text = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a `{ "category": [entry, ...], ... }` document.
    /// Categories are concatenated in document order.
    pub fn from_json(text: &str) -> Result<Self, VocabularyError> {
        let Value::Object(document) = serde_json::from_str::<Value>(text)? else {
            return Err(VocabularyError::NotAnObject);
        };

        let mut words = Vec::new();
        let mut categories = Vec::new();
        // german -> category it was first seen in
        let mut owners: HashMap<String, String> = HashMap::new();

        for (category, value) in document {
            let Value::Array(items) = value else {
                return Err(VocabularyError::CategoryNotAList { category });
            };

            let count = items.len();
            for (index, item) in items.into_iter().enumerate() {
                let raw: RawEntry =
                    serde_json::from_value(item).map_err(|source| VocabularyError::MalformedEntry {
                        category: category.clone(),
                        index,
                        source,
                    })?;
                let entry = raw.validate(&category, index)?;

                if let Some(first) = owners.insert(entry.german.clone(), category.clone()) {
                    return Err(VocabularyError::DuplicateWord {
                        german: entry.german,
                        first,
                        second: category,
                    });
                }
                words.push(entry);
            }
            categories.push((category, count));
        }

        if words.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self { words, categories })
    }

    /// Every entry of every category, in document order
    pub fn all_words(&self) -> &[VocabularyEntry] {
        &self.words
    }

    /// Category names with how many words each contributed
    pub fn categories(&self) -> &[(String, usize)] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
