use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::category::{Category, Role};
use crate::constants::DEFAULT_RELATION_DIST;
use crate::relation::Relation;
use crate::sampler::WeightedTable;

/// Everything recorded about one part-of-speech category.
#[derive(Clone, Debug, Default)]
pub struct CategoryStats {
    /// Relations this category heads, weighted by how often it heads them.
    pub as_parent: WeightedTable<Relation>,
    /// Relations attaching this category to a head, weighted likewise.
    pub as_child: WeightedTable<Relation>,
    /// Percentage chance (0..=100) that a node of this category stands as
    /// sentence root instead of attaching to a parent.
    pub root_prob: u32,
    /// Distribution over the number of children a node of this category
    /// requests.
    pub child_counts: WeightedTable<usize>,
}

impl CategoryStats {
    /// Relation table for the given role of this category.
    pub fn relations(&self, role: Role) -> &WeightedTable<Relation> {
        match role {
            Role::Parent => &self.as_parent,
            Role::Child => &self.as_child,
        }
    }

    /// Draw whether a node of this category stands as sentence root.
    pub fn draws_root(&self, rng: &mut impl Rng) -> bool {
        rng.random_range(0..crate::constants::PERCENT) < self.root_prob
    }

    /// Draw how many children a node of this category wants.
    pub fn sample_child_count(&self, rng: &mut impl Rng) -> usize {
        self.child_counts.sample(rng).copied().unwrap_or(0)
    }
}

/// Everything recorded about one dependency relation.
#[derive(Clone, Debug)]
pub struct RelationStats {
    /// Given the parent's category, distribution over child categories.
    pub child_given_parent: HashMap<Category, WeightedTable<Category>>,
    /// Given the child's category, distribution over parent categories.
    pub parent_given_child: HashMap<Category, WeightedTable<Category>>,
    /// Mean linear distance between the two ends of this relation in the
    /// source corpus. Drives child ordering during linearization.
    pub distance: f64,
    /// Percentage chance that the parent precedes the child in surface
    /// order.
    pub parent_first_pct: u32,
}

impl Default for RelationStats {
    fn default() -> Self {
        Self {
            child_given_parent: HashMap::new(),
            parent_given_child: HashMap::new(),
            distance: DEFAULT_RELATION_DIST,
            parent_first_pct: 50,
        }
    }
}

impl RelationStats {
    /// Sample the category at the opposite end of this relation, given the
    /// category filling `role`. `Category::None` when nothing is recorded
    /// for that pairing.
    pub fn matching_category(
        &self,
        known: Category,
        role: Role,
        rng: &mut impl Rng,
    ) -> Category {
        let table = match role {
            Role::Parent => self.child_given_parent.get(&known),
            Role::Child => self.parent_given_child.get(&known),
        };
        table
            .and_then(|t| t.sample(rng))
            .copied()
            .unwrap_or(Category::None)
    }

    /// Surface-order draw: true when the parent lands before the child.
    pub fn sample_parent_first(&self, rng: &mut impl Rng) -> bool {
        rng.random_range(0..crate::constants::PERCENT) < self.parent_first_pct
    }
}

/// The full curated statistics a generator runs against: per-category and
/// per-relation tables plus the relation incompatibility matrix.
///
/// Construction happens elsewhere (the loader crate, or test fixtures);
/// this type only stores, validates, and answers lookups.
#[derive(Clone, Debug, Default)]
pub struct StatisticsTables {
    categories: HashMap<Category, CategoryStats>,
    relations: HashMap<Relation, RelationStats>,
    incompatible: HashMap<Relation, HashSet<Relation>>,
}

impl StatisticsTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_category(&mut self, category: Category, stats: CategoryStats) {
        self.categories.insert(category, stats);
    }

    pub fn insert_relation(&mut self, relation: Relation, stats: RelationStats) {
        self.relations.insert(relation, stats);
    }

    /// Record that two relations never share a parent. Symmetric.
    pub fn add_incompatible_pair(&mut self, a: Relation, b: Relation) {
        self.incompatible.entry(a).or_default().insert(b);
        self.incompatible.entry(b).or_default().insert(a);
    }

    pub fn category(&self, category: Category) -> Option<&CategoryStats> {
        self.categories.get(&category)
    }

    pub fn relation(&self, relation: Relation) -> Option<&RelationStats> {
        self.relations.get(&relation)
    }

    pub fn incompatible(&self, a: Relation, b: Relation) -> bool {
        self.incompatible
            .get(&a)
            .is_some_and(|set| set.contains(&b))
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.relations.keys().copied()
    }

    /// Cross-check the tables: every relation a category table can emit
    /// must have its own relation entry, and every category needs a
    /// child-count distribution.
    pub fn validate(&self) -> Result<(), TableError> {
        for (&category, stats) in &self.categories {
            if stats.child_counts.is_empty() {
                return Err(TableError::MissingChildCounts(category));
            }
            for table in [&stats.as_parent, &stats.as_child] {
                for &relation in table.outcomes() {
                    if relation != Relation::Root && !self.relations.contains_key(&relation) {
                        return Err(TableError::MissingRelation { relation, category });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Consistency failures detected when cross-checking loaded tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A category table refers to a relation with no entry of its own.
    MissingRelation {
        relation: Relation,
        category: Category,
    },
    /// A category has no child-count distribution.
    MissingChildCounts(Category),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRelation { relation, category } => write!(
                f,
                "category {category} refers to relation '{relation}' which has no statistics"
            ),
            Self::MissingChildCounts(category) => {
                write!(f, "category {category} has no child count distribution")
            }
        }
    }
}

impl std::error::Error for TableError {}
