use rand::Rng;
use tracing::debug;

use fable_core::{Category, Sentence, SentenceGenerator};
use fable_stats::{LoopConfig, TellLoopConfig};

/// Bounds for one candidate search.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub score_threshold: f64,
}

impl From<LoopConfig> for SearchLimits {
    fn from(c: LoopConfig) -> Self {
        Self {
            min_attempts: c.min_attempts,
            max_attempts: c.max_attempts,
            score_threshold: c.score_threshold,
        }
    }
}

impl From<TellLoopConfig> for SearchLimits {
    fn from(c: TellLoopConfig) -> Self {
        Self {
            min_attempts: c.min_attempts,
            max_attempts: c.max_attempts,
            score_threshold: c.score_threshold,
        }
    }
}

/// Draw candidates until one is good enough or the attempt budget runs
/// out, keeping the best scorer seen (latest wins ties).
///
/// Candidates without a verb are discarded outright, as is anything
/// missing `required` when set. Returns `None` only when every attempt was
/// discarded.
pub fn best_candidate(
    generator: &SentenceGenerator<'_>,
    origin: Category,
    required: Option<Category>,
    limits: SearchLimits,
    rng: &mut impl Rng,
) -> Option<Sentence> {
    let mut best: Option<Sentence> = None;
    for attempt in 1..=limits.max_attempts {
        let candidate = generator.generate(origin, rng);
        if !candidate.contains_category(Category::Verb) {
            debug!(attempt, "discarding verb-free candidate");
            continue;
        }
        if let Some(required) = required
            && !candidate.contains_category(required)
        {
            debug!(attempt, category = %required, "candidate misses required category");
            continue;
        }
        debug!(attempt, score = candidate.score, text = %candidate.text, "candidate");
        if best.as_ref().is_none_or(|b| candidate.score >= b.score) {
            best = Some(candidate);
        }
        if attempt >= limits.min_attempts
            && best.as_ref().is_some_and(|b| b.score >= limits.score_threshold)
        {
            break;
        }
    }
    best
}

/// Surface text with final punctuation: a leading auxiliary reads as a
/// question.
pub fn punctuate(sentence: &Sentence) -> String {
    match sentence.categories.first() {
        Some(Category::Aux) => format!("{}?", sentence.text),
        _ => sentence.text.clone(),
    }
}
