// ============================================
// src/selection.rs
// Which word comes next
// ============================================

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::vocabulary::{VocabularyEntry, WordStore};

/// Keys (`german`) of the words already shown in this session
pub type SeenWords<'a> = HashSet<&'a str>;

/// Uniform random pick among the words the player hasn't seen yet.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    rng: StdRng,
}

impl SelectionPolicy {
    /// A fixed seed gives the same word order every game
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Pick the next word. When every word has been seen, `seen` is cleared
    /// and the pick is made from the whole pool, so a game never runs dry.
    pub fn pick_next<'a>(
        &mut self,
        store: &'a WordStore,
        seen: &mut SeenWords<'a>,
    ) -> &'a VocabularyEntry {
        let pool = store.all_words();
        let available: Vec<&'a VocabularyEntry> = pool
            .iter()
            .filter(|word| !seen.contains(word.german.as_str()))
            .collect();

        if available.is_empty() {
            tracing::debug!(pool = pool.len(), "all words seen, starting over");
            seen.clear();
            // WordStore is never empty
            return &pool[self.rng.random_range(0..pool.len())];
        }

        available[self.rng.random_range(0..available.len())]
    }
}
