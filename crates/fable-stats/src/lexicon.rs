use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

use fable_core::{Category, Lexicon};

use crate::error::{Result, StatsError};

/// Percentage of word draws that prefer the common-word list when one
/// exists for the category.
const COMMON_PREFERENCE_PCT: u32 = 85;

/// File-backed vocabulary: the full tagged lexicon plus a smaller
/// frequency-ranked common-word list that most draws prefer, so output
/// leans on everyday words instead of the long tail.
#[derive(Clone, Debug, Default)]
pub struct FileLexicon {
    words: HashMap<Category, Vec<String>>,
    common: HashMap<Category, Vec<String>>,
    word_category: HashMap<String, Category>,
}

impl FileLexicon {
    /// Load `lexicon.txt` (required) and `wordFrequency.txt` (optional)
    /// from the data directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let lexicon_path = data_dir.join("lexicon.txt");
        let content = fs::read_to_string(&lexicon_path).map_err(|source| StatsError::Io {
            path: lexicon_path,
            source,
        })?;
        let mut lexicon = Self::default();
        lexicon.ingest_lexicon(&content);

        let freq_path = data_dir.join("wordFrequency.txt");
        match fs::read_to_string(&freq_path) {
            Ok(content) => lexicon.ingest_word_frequency(&content),
            Err(e) => warn!(
                path = %freq_path.display(),
                error = %e,
                "no word frequency list; falling back to the full lexicon for all draws"
            ),
        }

        info!(
            categories = lexicon.words.len(),
            words = lexicon.word_category.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Lines of the form `word TAG` (the word may be an n-gram; the last
    /// token is the tag). Unknown tags are skipped.
    fn ingest_lexicon(&mut self, content: &str) {
        let mut seen: HashMap<Category, HashSet<String>> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            let Some((word, tag)) = line.rsplit_once(char::is_whitespace) else {
                continue;
            };
            let category = Category::from_name(&tag.to_uppercase());
            if category.is_none() {
                debug!(line, "skipping lexicon line with unknown tag");
                continue;
            }
            let word = word.trim();
            if seen.entry(category).or_default().insert(word.to_string()) {
                self.words.entry(category).or_default().push(word.to_string());
            }
            self.word_category
                .entry(word.to_string())
                .or_insert(category);
        }
        // Deterministic draw order regardless of input ordering.
        for list in self.words.values_mut() {
            list.sort();
        }
    }

    /// Frequency-list lines: whitespace-separated columns where the second
    /// is the word and the third a single-letter tag.
    fn ingest_word_frequency(&mut self, content: &str) {
        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                continue;
            }
            let word = fields[1];
            let category = letter_tag_category(fields[2]);
            if category.is_none() {
                continue;
            }
            self.common
                .entry(category)
                .or_default()
                .push(word.to_string());
            self.word_category
                .entry(word.to_string())
                .or_insert(category);
        }
    }

    /// The category recorded for a word, if any. Lexicon tags win over
    /// frequency-list tags for words present in both.
    pub fn category_of(&self, word: &str) -> Option<Category> {
        self.word_category.get(word).copied()
    }

    pub fn word_count(&self) -> usize {
        self.word_category.len()
    }

    #[cfg(test)]
    fn insert_common(&mut self, category: Category, word: &str) {
        self.common.entry(category).or_default().push(word.to_string());
    }
}

impl Lexicon for FileLexicon {
    fn pick_word(&self, category: Category, rng: &mut dyn RngCore) -> Option<String> {
        let common = self.common.get(&category).filter(|w| !w.is_empty());
        let list = if rng.random_range(0..100) < COMMON_PREFERENCE_PCT {
            common.or_else(|| self.words.get(&category).filter(|w| !w.is_empty()))?
        } else {
            self.words
                .get(&category)
                .filter(|w| !w.is_empty())
                .or(common)?
        };
        let idx = rng.random_range(0..list.len());
        Some(list[idx].clone())
    }
}

/// Map the frequency list's single-letter tags onto categories.
fn letter_tag_category(tag: &str) -> Category {
    match tag {
        "i" | "t" => Category::Adp,
        "p" => Category::Pron,
        "v" => Category::Verb,
        "n" => Category::Noun,
        "x" | "c" => Category::Cconj,
        "d" | "e" => Category::Det,
        "j" | "a" => Category::Adj,
        "r" => Category::Adv,
        "m" => Category::Num,
        "u" => Category::Intj,
        _ => Category::None,
    }
}
