use std::cmp::Ordering;

use rand::Rng;

use crate::category::Category;
use crate::constants::{DEFAULT_RELATION_DIST, PERCENT, PLACEHOLDER_WORD, TIE_SWAP_PROB, TIE_WINDOW};
use crate::tables::StatisticsTables;
use crate::tree::{NodeId, Tree};

/// Orders a finished tree into surface word order.
///
/// Children sort ascending by their relation's expected corpus distance,
/// with a randomized swap between near-tied neighbors for variety. Each
/// child then lands left or right of its head according to the relation's
/// parent-precedence probability. Layouts are memoized on the nodes, so a
/// tree renders identically however many times it is read back.
pub struct Linearizer<'a> {
    tables: &'a StatisticsTables,
}

impl<'a> Linearizer<'a> {
    pub fn new(tables: &'a StatisticsTables) -> Self {
        Self { tables }
    }

    /// Ordered token layout of `node`'s subtree, computing and caching it
    /// on first use.
    pub fn layout(&self, tree: &mut Tree, node: NodeId, rng: &mut impl Rng) -> Vec<NodeId> {
        if let Some(cached) = &tree.node(node).layout {
            return cached.clone();
        }
        let child_edges = tree.node(node).child_edges.clone();
        if child_edges.is_empty() {
            let layout = vec![node];
            tree.node_mut(node).layout = Some(layout.clone());
            return layout;
        }

        let mut ordered: Vec<(crate::tree::EdgeId, f64)> = child_edges
            .iter()
            .map(|&e| {
                let dist = self
                    .tables
                    .relation(tree.edge(e).relation)
                    .map_or(DEFAULT_RELATION_DIST, |r| r.distance);
                (e, dist)
            })
            .collect();
        ordered.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        // Near ties keep some randomness; a strict distance sort makes
        // every determiner land in the same slot every sentence.
        for i in 0..ordered.len().saturating_sub(1) {
            if (ordered[i + 1].1 - ordered[i].1).abs() < TIE_WINDOW
                && rng.random_range(0..PERCENT) < TIE_SWAP_PROB
            {
                ordered.swap(i, i + 1);
            }
        }

        let mut left: Vec<NodeId> = Vec::new();
        let mut right: Vec<NodeId> = Vec::new();
        for (edge_id, _) in ordered {
            let edge = *tree.edge(edge_id);
            let child_layout = self.layout(tree, edge.child, rng);
            let parent_first = self
                .tables
                .relation(edge.relation)
                .is_some_and(|r| r.sample_parent_first(rng));
            if parent_first {
                right.extend(child_layout);
            } else {
                // Later (farther) children land leftmost, keeping
                // near-distance relations adjacent to the head.
                let mut shifted = child_layout;
                shifted.extend(left);
                left = shifted;
            }
        }

        let mut layout = left;
        layout.push(node);
        layout.extend(right);
        tree.node_mut(node).layout = Some(layout.clone());
        layout
    }

    /// Full-sentence layout: lay out `from`'s subtree, then climb and lay
    /// out each ancestor in turn; the parentless top node's layout is the
    /// sentence.
    pub fn sentence_layout(
        &self,
        tree: &mut Tree,
        from: NodeId,
        rng: &mut impl Rng,
    ) -> Vec<NodeId> {
        let mut node = from;
        let mut layout = self.layout(tree, node, rng);
        while let Some(edge) = tree.node(node).parent_edge {
            node = tree.edge(edge).parent;
            layout = self.layout(tree, node, rng);
        }
        layout
    }
}

/// The layout's words, one slot per node, in surface order. A slot keeps a
/// multi-word lexicon entry intact, so these stay index-aligned with
/// [`categories`].
pub fn words(tree: &Tree, layout: &[NodeId]) -> Vec<String> {
    layout
        .iter()
        .map(|&id| {
            tree.node(id)
                .word
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_WORD.to_string())
        })
        .collect()
}

/// The layout's words joined by single spaces.
pub fn render(tree: &Tree, layout: &[NodeId]) -> String {
    words(tree, layout).join(" ")
}

/// The layout's category sequence, in surface order.
pub fn categories(tree: &Tree, layout: &[NodeId]) -> Vec<Category> {
    layout.iter().map(|&id| tree.node(id).category).collect()
}
