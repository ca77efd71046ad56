use std::collections::HashMap;

use rand::{Rng, RngCore};

use crate::category::Category;
use crate::constants::PLACEHOLDER_WORD;

/// Vocabulary source consulted while growing trees.
///
/// Object-safe so table loaders can supply file-backed implementations
/// without the engine caring where words come from. `&mut dyn RngCore`
/// rather than a generic parameter keeps it usable behind a trait object.
pub trait Lexicon {
    /// A word of the given category, or `None` when the vocabulary has
    /// nothing for it.
    fn pick_word(&self, category: Category, rng: &mut dyn RngCore) -> Option<String>;

    /// Like [`pick_word`](Self::pick_word), falling back to a fixed
    /// placeholder token so tree nodes always carry text.
    fn word_or_placeholder(&self, category: Category, rng: &mut dyn RngCore) -> String {
        self.pick_word(category, rng)
            .unwrap_or_else(|| PLACEHOLDER_WORD.to_string())
    }
}

/// In-memory lexicon over a fixed category-to-words map. Used by tests and
/// by callers that assemble vocabulary programmatically.
#[derive(Clone, Debug, Default)]
pub struct MemoryLexicon {
    words: HashMap<Category, Vec<String>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, word: impl Into<String>) {
        self.words.entry(category).or_default().push(word.into());
    }
}

impl Lexicon for MemoryLexicon {
    fn pick_word(&self, category: Category, rng: &mut dyn RngCore) -> Option<String> {
        let words = self.words.get(&category).filter(|w| !w.is_empty())?;
        let idx = rng.random_range(0..words.len());
        Some(words[idx].clone())
    }
}
