use rand::Rng;

use crate::category::{Category, Role};
use crate::constants::{
    CHILD_DIST_THRESHOLD, MAX_CHILDREN, MAX_NODE_COUNT, MAX_RESAMPLE, ORIGIN_MIN_CHILDREN,
    PARENT_DIST_THRESHOLD,
};
use crate::lexicon::Lexicon;
use crate::relation::Relation;
use crate::tables::StatisticsTables;
use crate::tree::{NodeId, Tree};

/// Grows a dependency tree outward from a single origin category.
///
/// Each node goes through two bounded phases: it may acquire a parent
/// (once, and only near the origin) and it may acquire children (while
/// under the per-node and per-tree caps). Distance from the origin strictly
/// increases on every link, so growth always terminates. All randomness
/// comes from the caller's Rng.
pub struct Grower<'a> {
    tables: &'a StatisticsTables,
    lexicon: &'a dyn Lexicon,
}

impl<'a> Grower<'a> {
    pub fn new(tables: &'a StatisticsTables, lexicon: &'a dyn Lexicon) -> Self {
        Self { tables, lexicon }
    }

    /// Grow a full tree whose origin node has the given category.
    pub fn generate(&self, origin: Category, rng: &mut impl Rng) -> Tree {
        let mut tree = Tree::new(origin);
        let root = tree.origin();
        let word = self.lexicon.word_or_placeholder(origin, rng);
        tree.node_mut(root).word = Some(word);
        self.expand(&mut tree, root, rng);
        tree
    }

    fn expand(&self, tree: &mut Tree, node: NodeId, rng: &mut impl Rng) {
        self.acquire_parent(tree, node, rng);
        self.acquire_children(tree, node, rng);
    }

    /// Upward phase: at most once per node, and only while the node sits
    /// close enough to the origin. A root-probability draw lets frequent
    /// sentence heads stay parentless.
    fn acquire_parent(&self, tree: &mut Tree, node: NodeId, rng: &mut impl Rng) {
        {
            let n = tree.node_mut(node);
            if n.parent_resolved {
                return;
            }
            n.parent_resolved = true;
        }
        let n = tree.node(node);
        if n.parent_edge.is_some() || n.dist_to_origin > PARENT_DIST_THRESHOLD {
            return;
        }
        let category = n.category;
        let dist = n.dist_to_origin;

        let Some(stats) = self.tables.category(category) else {
            return;
        };
        if stats.draws_root(rng) {
            return;
        }
        let Some(&relation) = stats.as_child.sample(rng) else {
            return;
        };
        let Some(rel_stats) = self.tables.relation(relation) else {
            return;
        };
        let parent_category = rel_stats.matching_category(category, Role::Child, rng);
        if parent_category.is_none() {
            return;
        }

        let parent = tree.add_node(parent_category, dist + 1);
        tree.node_mut(parent).word = Some(self.lexicon.word_or_placeholder(parent_category, rng));
        tree.link(parent, node, relation);
        // Upward only: the new parent may keep climbing but never fans out.
        self.acquire_parent(tree, parent, rng);
    }

    /// Downward phase: request a sampled number of children, filling each
    /// slot with a relation and category that fit the siblings already
    /// attached.
    fn acquire_children(&self, tree: &mut Tree, node: NodeId, rng: &mut impl Rng) {
        let n = tree.node(node);
        if n.child_edges.len() > MAX_CHILDREN || n.dist_to_origin > CHILD_DIST_THRESHOLD {
            return;
        }
        let category = n.category;
        let dist = n.dist_to_origin;
        // Punctuation never branches; verbs only branch at the origin,
        // otherwise clauses nest past any readable length.
        if category == Category::Punct || (category == Category::Verb && dist > 0) {
            return;
        }
        let Some(stats) = self.tables.category(category) else {
            return;
        };

        let mut desired = stats.sample_child_count(rng);
        if node == tree.origin() {
            desired = desired.max(ORIGIN_MIN_CHILDREN);
        }
        desired = desired.saturating_sub(tree.node(node).child_edges.len());
        if dist > 0 && desired > 1 {
            desired -= 1;
        }

        for _ in 0..desired {
            if tree.node_count() >= MAX_NODE_COUNT {
                break;
            }
            let Some(relation) = self.pick_child_relation(tree, node, category, rng) else {
                continue;
            };
            let Some(child_category) = self.pick_child_category(category, relation, rng) else {
                continue;
            };
            let child = tree.add_node(child_category, dist + 1);
            tree.node_mut(child).word =
                Some(self.lexicon.word_or_placeholder(child_category, rng));
            tree.link(node, child, relation);
            self.expand(tree, child, rng);
        }
    }

    /// Sample a relation for a new child slot, rejecting candidates that
    /// duplicate a sibling, clash with one, or mirror the node's own
    /// inbound relation. Attempt-capped; `None` skips the slot.
    fn pick_child_relation(
        &self,
        tree: &Tree,
        node: NodeId,
        category: Category,
        rng: &mut impl Rng,
    ) -> Option<Relation> {
        let stats = self.tables.category(category)?;
        let inbound = tree
            .node(node)
            .parent_edge
            .map(|e| tree.edge(e).relation);
        for _ in 0..MAX_RESAMPLE {
            let &candidate = stats.as_parent.sample(rng)?;
            let clashes = tree.child_relations(node).any(|sibling| {
                sibling == candidate || self.tables.incompatible(sibling, candidate)
            });
            if clashes || inbound == Some(candidate) {
                continue;
            }
            return Some(candidate);
        }
        None
    }

    /// Sample the child-end category for a chosen relation, rejecting
    /// repeats of the parent's own category. Attempt-capped.
    fn pick_child_category(
        &self,
        parent: Category,
        relation: Relation,
        rng: &mut impl Rng,
    ) -> Option<Category> {
        let rel_stats = self.tables.relation(relation)?;
        for _ in 0..MAX_RESAMPLE {
            let candidate = rel_stats.matching_category(parent, Role::Parent, rng);
            if candidate.is_none() {
                return None;
            }
            if candidate != parent {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;
    use crate::sampler::WeightedTable;
    use crate::tables::{CategoryStats, RelationStats};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashMap;

    /// Noun-centered fixture: nouns always attach to a verb via nsubj,
    /// verbs always stand as root, nouns take det/amod children.
    fn fixture() -> StatisticsTables {
        let mut tables = StatisticsTables::new();

        tables.insert_category(
            Category::Noun,
            CategoryStats {
                as_parent: WeightedTable::from_percentages([
                    (Relation::Det, 60),
                    (Relation::Amod, 40),
                ]),
                as_child: WeightedTable::from_percentages([(Relation::Nsubj, 100)]),
                root_prob: 0,
                child_counts: WeightedTable::from_percentages([
                    (0usize, 20),
                    (1, 50),
                    (2, 30),
                ]),
            },
        );
        tables.insert_category(
            Category::Verb,
            CategoryStats {
                as_parent: WeightedTable::from_percentages([
                    (Relation::Nsubj, 50),
                    (Relation::Obj, 50),
                ]),
                as_child: WeightedTable::empty(),
                root_prob: 100,
                child_counts: WeightedTable::from_percentages([(1usize, 50), (2, 50)]),
            },
        );
        for cat in [Category::Det, Category::Adj] {
            tables.insert_category(
                cat,
                CategoryStats {
                    root_prob: 100,
                    child_counts: WeightedTable::from_percentages([(0usize, 100)]),
                    ..Default::default()
                },
            );
        }

        let mut nsubj = RelationStats {
            distance: 2.0,
            parent_first_pct: 10,
            ..Default::default()
        };
        nsubj.parent_given_child.insert(
            Category::Noun,
            WeightedTable::from_percentages([(Category::Verb, 100)]),
        );
        nsubj.child_given_parent.insert(
            Category::Verb,
            WeightedTable::from_percentages([(Category::Noun, 100)]),
        );
        tables.insert_relation(Relation::Nsubj, nsubj);

        let mut obj = RelationStats {
            distance: 1.5,
            parent_first_pct: 90,
            ..Default::default()
        };
        obj.child_given_parent.insert(
            Category::Verb,
            WeightedTable::from_percentages([(Category::Noun, 100)]),
        );
        tables.insert_relation(Relation::Obj, obj);

        let mut det = RelationStats {
            distance: 1.0,
            parent_first_pct: 5,
            ..Default::default()
        };
        det.child_given_parent.insert(
            Category::Noun,
            WeightedTable::from_percentages([(Category::Det, 100)]),
        );
        tables.insert_relation(Relation::Det, det);

        let mut amod = RelationStats {
            distance: 1.2,
            parent_first_pct: 15,
            ..Default::default()
        };
        amod.child_given_parent.insert(
            Category::Noun,
            WeightedTable::from_percentages([(Category::Adj, 100)]),
        );
        tables.insert_relation(Relation::Amod, amod);

        tables.add_incompatible_pair(Relation::Case, Relation::Det);
        tables
    }

    fn lexicon() -> MemoryLexicon {
        let mut lex = MemoryLexicon::new();
        for (cat, word) in [
            (Category::Noun, "dog"),
            (Category::Verb, "runs"),
            (Category::Det, "the"),
            (Category::Adj, "small"),
        ] {
            lex.insert(cat, word);
        }
        lex
    }

    #[test]
    fn test_generate_terminates_within_caps_for_many_seeds() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let tree = grower.generate(Category::Noun, &mut rng);
            // The child cap binds child creation; the upward chain can add
            // a couple of ancestors on top of it.
            assert!(tree.node_count() <= MAX_NODE_COUNT + 2, "seed {seed}");
            for id in tree.node_ids() {
                assert!(
                    tree.node(id).dist_to_origin <= CHILD_DIST_THRESHOLD + 1,
                    "seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_every_node_has_a_word() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        let mut rng = SmallRng::seed_from_u64(42);
        let tree = grower.generate(Category::Noun, &mut rng);
        for id in tree.node_ids() {
            assert!(tree.node(id).word.is_some());
        }
    }

    #[test]
    fn test_noun_origin_always_attaches_to_verb() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let tree = grower.generate(Category::Noun, &mut rng);
            assert!(tree.contains_category(Category::Verb), "seed {seed}");
            let top = tree.top();
            assert_eq!(tree.node(top).category, Category::Verb, "seed {seed}");
        }
    }

    #[test]
    fn test_sibling_relations_never_repeat_or_clash() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let tree = grower.generate(Category::Noun, &mut rng);
            for id in tree.node_ids() {
                let rels: Vec<_> = tree.child_relations(id).collect();
                for (i, &a) in rels.iter().enumerate() {
                    for &b in &rels[i + 1..] {
                        assert_ne!(a, b, "seed {seed}: duplicate sibling relation");
                        assert!(
                            !tables.incompatible(a, b),
                            "seed {seed}: incompatible siblings {a} / {b}"
                        );
                    }
                }
                if let Some(edge) = tree.node(id).parent_edge {
                    let inbound = tree.edge(edge).relation;
                    assert!(
                        !rels.contains(&inbound),
                        "seed {seed}: child relation mirrors inbound {inbound}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_verb_beyond_origin_stays_leafward() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let tree = grower.generate(Category::Noun, &mut rng);
            for id in tree.node_ids() {
                let n = tree.node(id);
                if n.category == Category::Verb && n.dist_to_origin > 0 {
                    // Verbs away from the origin take no children of their
                    // own; anything under them arrived through the origin.
                    for &e in &n.child_edges {
                        assert_eq!(tree.edge(e).child, tree.origin(), "seed {seed}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_category_yields_single_node() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        let mut rng = SmallRng::seed_from_u64(42);
        let tree = grower.generate(Category::Sym, &mut rng);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_degenerate_tables_still_terminate() {
        // A category whose only recorded child relation always clashes
        // with itself as a sibling forces the resample cap to bite.
        let mut tables = StatisticsTables::new();
        tables.insert_category(
            Category::Noun,
            CategoryStats {
                as_parent: WeightedTable::from_percentages([(Relation::Det, 100)]),
                as_child: WeightedTable::empty(),
                root_prob: 100,
                child_counts: WeightedTable::from_percentages([(3usize, 100)]),
            },
        );
        let mut det = RelationStats::default();
        det.child_given_parent.insert(
            Category::Noun,
            WeightedTable::from_percentages([(Category::Noun, 100)]),
        );
        tables.insert_relation(Relation::Det, det);

        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        let mut rng = SmallRng::seed_from_u64(42);
        // Child-category sampling only ever proposes NOUN under a NOUN
        // head, so every slot is skipped and the origin stays alone.
        let tree = grower.generate(Category::Noun, &mut rng);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_words_come_from_lexicon() {
        let tables = fixture();
        let lex = lexicon();
        let grower = Grower::new(&tables, &lex);
        let mut rng = SmallRng::seed_from_u64(7);
        let tree = grower.generate(Category::Noun, &mut rng);
        let by_cat: HashMap<Category, &str> = [
            (Category::Noun, "dog"),
            (Category::Verb, "runs"),
            (Category::Det, "the"),
            (Category::Adj, "small"),
        ]
        .into_iter()
        .collect();
        for id in tree.node_ids() {
            let n = tree.node(id);
            assert_eq!(n.word.as_deref(), by_cat.get(&n.category).copied());
        }
    }
}
