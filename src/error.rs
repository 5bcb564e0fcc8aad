// ============================================
// src/error.rs
// Error types for vocabulary loading and configuration
// ============================================

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building the word pool.
///
/// All of these are startup errors: once a `WordStore` exists the game
/// itself has no failure paths.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vocabulary is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vocabulary must be an object mapping category names to lists of words")]
    NotAnObject,

    #[error("category \"{category}\" must be a list of words")]
    CategoryNotAList { category: String },

    #[error("category \"{category}\", entry {index}: {source}")]
    MalformedEntry {
        category: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("category \"{category}\", entry {index}: missing required field `{field}`")]
    MissingField {
        category: String,
        index: usize,
        field: &'static str,
    },

    #[error(
        "category \"{category}\", entry {index} ({german}): {parts} word parts but {meanings} part meanings"
    )]
    MismatchedDecomposition {
        category: String,
        index: usize,
        german: String,
        parts: usize,
        meanings: usize,
    },

    #[error("\"{german}\" appears more than once (categories \"{first}\" and \"{second}\")")]
    DuplicateWord {
        german: String,
        first: String,
        second: String,
    },

    #[error("vocabulary contains no words")]
    Empty,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is invalid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("round_seconds must be greater than zero")]
    ZeroRoundLength,
}
