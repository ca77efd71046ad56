use crate::category::Category;
use crate::relation::Relation;

/// Index handle into [`Tree::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Index handle into [`Tree::edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// One token slot in a dependency tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub category: Category,
    pub word: Option<String>,
    pub parent_edge: Option<EdgeId>,
    pub child_edges: Vec<EdgeId>,
    /// Hops from the origin node this tree grew out of. Growth thresholds
    /// are expressed against this, not against tree depth.
    pub dist_to_origin: u32,
    /// Memoized surface order of this node's subtree, filled in by
    /// linearization. Cleared only by rebuilding the tree.
    pub layout: Option<Vec<NodeId>>,
    /// Set once the node has gone through its acquire-parent step, whether
    /// or not a parent was attached.
    pub parent_resolved: bool,
}

impl Node {
    fn new(category: Category, dist_to_origin: u32) -> Self {
        Self {
            category,
            word: None,
            parent_edge: None,
            child_edges: Vec::new(),
            dist_to_origin,
            layout: None,
            parent_resolved: false,
        }
    }
}

/// A labeled head-to-dependent link between two nodes.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    pub relation: Relation,
}

/// Arena-backed dependency tree grown outward from a single origin node.
///
/// Nodes and edges live in flat vectors and refer to each other through
/// index handles, so links never fight the borrow checker and the whole
/// tree drops in one free.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    origin: NodeId,
}

impl Tree {
    /// A one-node tree holding only the origin category.
    pub fn new(origin_category: Category) -> Self {
        Self {
            nodes: vec![Node::new(origin_category, 0)],
            edges: Vec::new(),
            origin: NodeId(0),
        }
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Append a detached node at the given distance from the origin.
    pub fn add_node(&mut self, category: Category, dist_to_origin: u32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(category, dist_to_origin));
        id
    }

    /// Attach `child` under `parent` with the given relation label.
    ///
    /// The child must not already have a parent, and the link must not
    /// close a cycle. Growth only ever links freshly added nodes or the
    /// origin, so violations are construction bugs, not data conditions.
    pub fn link(&mut self, parent: NodeId, child: NodeId, relation: Relation) -> EdgeId {
        assert_ne!(parent, child, "node cannot head itself");
        assert!(
            self.nodes[child.0].parent_edge.is_none(),
            "node already has a parent"
        );
        assert!(
            !self.is_ancestor(child, parent),
            "link would close a cycle"
        );
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            parent,
            child,
            relation,
        });
        self.nodes[parent.0].child_edges.push(id);
        self.nodes[child.0].parent_edge = Some(id);
        id
    }

    fn is_ancestor(&self, candidate: NodeId, mut node: NodeId) -> bool {
        while let Some(edge) = self.nodes[node.0].parent_edge {
            node = self.edges[edge.0].parent;
            if node == candidate {
                return true;
            }
        }
        false
    }

    /// The relation labels already hanging off a parent node.
    pub fn child_relations(&self, parent: NodeId) -> impl Iterator<Item = Relation> + '_ {
        self.nodes[parent.0]
            .child_edges
            .iter()
            .map(|&e| self.edges[e.0].relation)
    }

    /// Climb parent links from the origin to the tree's top node.
    pub fn top(&self) -> NodeId {
        let mut node = self.origin;
        while let Some(edge) = self.nodes[node.0].parent_edge {
            node = self.edges[edge.0].parent;
        }
        node
    }

    pub fn contains_category(&self, category: Category) -> bool {
        self.nodes.iter().any(|n| n.category == category)
    }
}
