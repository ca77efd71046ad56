use std::collections::HashMap;

use crate::category::Category;
use crate::constants::DUPLICATE_SCORE;

/// Naturalness scorer over surface category sequences.
///
/// A sentence's score is the product, over consecutive category pairs with
/// a virtual `Category::None` bracket at both ends, of a curated transition
/// factor. Unlisted differing pairs are neutral (1.0); unlisted identical
/// pairs are mildly penalized. Scores only rank candidates against each
/// other; the absolute value carries no meaning.
#[derive(Clone, Debug)]
pub struct TransitionScorer {
    scores: HashMap<(Category, Category), f64>,
}

impl Default for TransitionScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionScorer {
    pub fn new() -> Self {
        use Category::*;
        // Hand-tuned against generator output; pairs not listed fall
        // through to the defaults.
        let pairs: &[(Category, Category, f64)] = &[
            (Verb, None, 0.8),
            (Adj, None, 0.85),
            (Pron, None, 0.8),
            (Det, None, 0.85),
            (None, Adj, 0.92),
            (None, Adp, 0.95),
            (Aux, Adv, 0.8),
            (Aux, Adp, 0.95),
            (Adp, Adj, 0.85),
            (Adp, Verb, 0.85),
            (Adp, Aux, 0.9),
            (Adv, Verb, 0.83),
            (Adv, Noun, 0.9),
            (Adv, Aux, 0.9),
            (Adv, Adp, 0.95),
            (Adv, Pron, 0.95),
            (Propn, Num, 0.85),
            (Propn, Det, 0.82),
            (Propn, Noun, 0.7),
            (Det, Pron, 0.75),
            (Det, Propn, 0.82),
            (Det, Aux, 0.82),
            (Det, Adv, 0.82),
            (Det, Verb, 0.82),
            (Adj, Det, 0.85),
            (Adj, Aux, 0.85),
            (Adj, Adp, 0.85),
            (Adj, Adv, 0.9),
            (Adj, Verb, 0.8),
            (Adj, Adj, 1.0),
            (Pron, Adj, 0.89),
            (Pron, Det, 0.82),
            (Pron, Noun, 0.75),
            (Pron, Verb, 0.82),
            (Pron, Adp, 0.95),
            (Pron, Sconj, 0.9),
            (Noun, Pron, 0.8),
            (Noun, Propn, 0.85),
            (Noun, Num, 0.9),
            (Noun, Noun, 0.93),
            (Noun, Det, 0.94),
            (Noun, Adj, 0.95),
            (Verb, Verb, 0.5),
            (Verb, Aux, 0.5),
            (Num, Verb, 0.7),
        ];
        let scores = pairs.iter().map(|&(a, b, s)| ((a, b), s)).collect();
        Self { scores }
    }

    fn transition(&self, from: Category, to: Category) -> f64 {
        if let Some(&score) = self.scores.get(&(from, to)) {
            return score;
        }
        if from == to { DUPLICATE_SCORE } else { 1.0 }
    }

    /// Score an ordered category sequence. `initial` seeds the product, so
    /// callers can pre-penalize a candidate (short sentences, say) before
    /// transitions apply.
    pub fn score(&self, categories: &[Category], initial: f64) -> f64 {
        if categories.is_empty() {
            return initial;
        }
        let mut score = initial;
        let mut prev = Category::None;
        for &cat in categories {
            score *= self.transition(prev, cat);
            prev = cat;
        }
        score * self.transition(prev, Category::None)
    }
}
