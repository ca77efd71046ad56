use rand::Rng;
use serde::Serialize;

use crate::category::Category;
use crate::constants::{MAX_TREE_SCORE, SHORT_SENTENCE_FACTOR, SHORT_SENTENCE_WORDS};
use crate::grow::Grower;
use crate::lexicon::Lexicon;
use crate::linearize::{self, Linearizer};
use crate::score::TransitionScorer;
use crate::tables::StatisticsTables;

/// One synthesized candidate: surface text plus the parallel word and
/// category sequences it was read from, and its naturalness score.
#[derive(Clone, Debug, Serialize)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<String>,
    pub categories: Vec<Category>,
    pub score: f64,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn contains_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Swap the given word in at the first slot of its category, rebuilding
    /// the text. Returns false (and changes nothing) when no slot matches.
    pub fn substitute_first(&mut self, category: Category, word: &str) -> bool {
        let Some(idx) = self.categories.iter().position(|&c| c == category) else {
            return false;
        };
        self.words[idx] = word.to_string();
        self.text = self.words.join(" ");
        true
    }
}

/// Facade tying growth, linearization, and scoring together: one call, one
/// scored candidate sentence. Holds only borrowed tables and lexicon, so a
/// generator is cheap to construct per run.
pub struct SentenceGenerator<'a> {
    tables: &'a StatisticsTables,
    lexicon: &'a dyn Lexicon,
    scorer: TransitionScorer,
}

impl<'a> SentenceGenerator<'a> {
    pub fn new(tables: &'a StatisticsTables, lexicon: &'a dyn Lexicon) -> Self {
        Self {
            tables,
            lexicon,
            scorer: TransitionScorer::new(),
        }
    }

    /// Grow, linearize, and score one candidate from the given origin
    /// category. Short sentences start from a reduced score so the driver
    /// loop favors fuller candidates.
    pub fn generate(&self, origin: Category, rng: &mut impl Rng) -> Sentence {
        let mut tree = Grower::new(self.tables, self.lexicon).generate(origin, rng);
        let start = tree.origin();
        let linearizer = Linearizer::new(self.tables);
        let layout = linearizer.sentence_layout(&mut tree, start, rng);

        let categories = linearize::categories(&tree, &layout);
        let words = linearize::words(&tree, &layout);
        let text = words.join(" ");

        let initial = if words.len() < SHORT_SENTENCE_WORDS {
            SHORT_SENTENCE_FACTOR
        } else {
            MAX_TREE_SCORE
        };
        let score = self.scorer.score(&categories, initial);

        Sentence {
            text,
            words,
            categories,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;
    use crate::relation::Relation;
    use crate::sampler::WeightedTable;
    use crate::tables::{CategoryStats, RelationStats};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Minimal grammar: NOUN always attaches to a VERB head, VERB roots
    /// and takes an obj NOUN, NOUN takes a det.
    fn tables() -> StatisticsTables {
        let mut tables = StatisticsTables::new();
        tables.insert_category(
            Category::Noun,
            CategoryStats {
                as_parent: WeightedTable::from_percentages([(Relation::Det, 100)]),
                as_child: WeightedTable::from_percentages([(Relation::Nsubj, 100)]),
                root_prob: 0,
                child_counts: WeightedTable::from_percentages([(0usize, 50), (1, 50)]),
            },
        );
        tables.insert_category(
            Category::Verb,
            CategoryStats {
                as_parent: WeightedTable::from_percentages([(Relation::Obj, 100)]),
                as_child: WeightedTable::empty(),
                root_prob: 100,
                child_counts: WeightedTable::from_percentages([(1usize, 100)]),
            },
        );
        tables.insert_category(
            Category::Det,
            CategoryStats {
                root_prob: 100,
                child_counts: WeightedTable::from_percentages([(0usize, 100)]),
                ..Default::default()
            },
        );

        let mut nsubj = RelationStats {
            distance: 2.0,
            parent_first_pct: 5,
            ..Default::default()
        };
        nsubj.parent_given_child.insert(
            Category::Noun,
            WeightedTable::from_percentages([(Category::Verb, 100)]),
        );
        tables.insert_relation(Relation::Nsubj, nsubj);

        let mut obj = RelationStats {
            distance: 1.8,
            parent_first_pct: 95,
            ..Default::default()
        };
        obj.child_given_parent.insert(
            Category::Verb,
            WeightedTable::from_percentages([(Category::Noun, 100)]),
        );
        tables.insert_relation(Relation::Obj, obj);

        let mut det = RelationStats {
            distance: 1.0,
            parent_first_pct: 2,
            ..Default::default()
        };
        det.child_given_parent.insert(
            Category::Noun,
            WeightedTable::from_percentages([(Category::Det, 100)]),
        );
        tables.insert_relation(Relation::Det, det);
        tables
    }

    fn lexicon() -> MemoryLexicon {
        let mut lex = MemoryLexicon::new();
        lex.insert(Category::Noun, "dog");
        lex.insert(Category::Verb, "chases");
        lex.insert(Category::Det, "the");
        lex
    }

    #[test]
    fn test_generate_produces_scored_sentence() {
        let tables = tables();
        let lex = lexicon();
        let generator = SentenceGenerator::new(&tables, &lex);
        let mut rng = SmallRng::seed_from_u64(42);
        let sentence = generator.generate(Category::Noun, &mut rng);
        assert!(!sentence.text.is_empty());
        assert_eq!(sentence.words.len(), sentence.categories.len());
        assert!(sentence.score > 0.0 && sentence.score <= 1.0);
        assert!(sentence.contains_category(Category::Verb));
    }

    #[test]
    fn test_same_seed_same_sentence() {
        let tables = tables();
        let lex = lexicon();
        let generator = SentenceGenerator::new(&tables, &lex);
        let a = generator.generate(Category::Noun, &mut SmallRng::seed_from_u64(7));
        let b = generator.generate(Category::Noun, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a.text, b.text);
        assert_eq!(a.categories, b.categories);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_substitute_first_replaces_matching_slot() {
        let tables = tables();
        let lex = lexicon();
        let generator = SentenceGenerator::new(&tables, &lex);
        let mut sentence = generator.generate(Category::Noun, &mut SmallRng::seed_from_u64(3));
        assert!(sentence.substitute_first(Category::Noun, "wolf"));
        assert!(sentence.text.contains("wolf"));
        assert_eq!(sentence.text, sentence.words.join(" "));
        assert!(!sentence.substitute_first(Category::Intj, "wow"));
    }

    #[test]
    fn test_multiword_lexicon_entry_stays_one_slot() {
        // An n-gram vocabulary entry occupies a single word slot, keeping
        // the word and category sequences index-aligned.
        let tables = StatisticsTables::new();
        let mut lex = MemoryLexicon::new();
        lex.insert(Category::Noun, "ice cream");
        let generator = SentenceGenerator::new(&tables, &lex);
        let mut sentence = generator.generate(Category::Noun, &mut SmallRng::seed_from_u64(1));
        assert_eq!(sentence.words, vec!["ice cream".to_string()]);
        assert_eq!(sentence.categories, vec![Category::Noun]);
        assert_eq!(sentence.text, "ice cream");
        assert_eq!(sentence.word_count(), 1);
        assert!(sentence.substitute_first(Category::Noun, "sorbet"));
        assert_eq!(sentence.text, "sorbet");
    }

    #[test]
    fn test_short_sentence_starts_penalized() {
        // SYM has no tables, so the candidate is a single placeholder-free
        // word and the short-sentence factor applies.
        let tables = tables();
        let mut lex = lexicon();
        lex.insert(Category::Sym, "%");
        let generator = SentenceGenerator::new(&tables, &lex);
        let sentence = generator.generate(Category::Sym, &mut SmallRng::seed_from_u64(1));
        assert_eq!(sentence.words.len(), 1);
        assert!(sentence.score <= SHORT_SENTENCE_FACTOR);
    }
}
