use rand::Rng;

use crate::constants::{WEIGHT_SCALE, ZERO_WEIGHT_FLOOR};

/// Weighted sampling over a fixed outcome set, backed by a cumulative-weight
/// array.
///
/// `cum` carries a zero-weight padding entry at index 0 and then the running
/// totals, so `cum[i]` is the total weight through `items[i - 1]` and the
/// bucket search always lands on an index >= 1. Weights are strictly
/// positive, so the cumulative array strictly increases and the binary
/// search is O(log n).
///
/// Draw convention: inclusive lower bound, exclusive upper bound. A draw in
/// `[cum[i - 1], cum[i])` selects `items[i - 1]`; equality at a boundary
/// resolves to the upper bucket.
#[derive(Clone, Debug)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    cum: Vec<u32>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> WeightedTable<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            cum: vec![0],
        }
    }

    /// Build from `(outcome, weight)` pairs. Zero-weight entries are
    /// dropped; they would create empty buckets the search can never hit.
    pub fn from_weights(pairs: impl IntoIterator<Item = (T, u32)>) -> Self {
        let mut items = Vec::new();
        let mut cum = vec![0u32];
        let mut total = 0u32;
        for (item, weight) in pairs {
            if weight == 0 {
                continue;
            }
            total += weight;
            items.push(item);
            cum.push(total);
        }
        Self { items, cum }
    }

    /// Build from raw percentage frequencies as reported in the curated
    /// statistics: percentages are scaled up, and entries reported at 0%
    /// get a small floor weight so every recorded outcome stays reachable.
    pub fn from_percentages(pairs: impl IntoIterator<Item = (T, u32)>) -> Self {
        Self::from_weights(pairs.into_iter().map(|(item, pct)| {
            let weight = if pct == 0 {
                ZERO_WEIGHT_FLOOR
            } else {
                pct * WEIGHT_SCALE
            };
            (item, weight)
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total(&self) -> u32 {
        *self.cum.last().unwrap_or(&0)
    }

    /// Resolve a raw draw in `[0, total)` to its bucket's outcome.
    pub fn bucket_of(&self, draw: u32) -> Option<&T> {
        if self.items.is_empty() || draw >= self.total() {
            return None;
        }
        // First index whose cumulative weight exceeds the draw; >= 1
        // because of the padding entry.
        let idx = self.cum.partition_point(|&c| c <= draw);
        Some(&self.items[idx - 1])
    }

    /// Draw an outcome proportionally to its weight. `None` only for an
    /// empty table.
    pub fn sample(&self, rng: &mut impl Rng) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        self.bucket_of(rng.random_range(0..self.total()))
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
