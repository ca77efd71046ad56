//! Dependency-grammar sentence synthesis engine.
//!
//! Grows a dependency tree outward from a single part-of-speech origin by
//! sampling corpus-derived relation statistics, linearizes the tree into
//! surface word order using learned distance and precedence biases, and
//! scores the result with a curated category-transition model.
//!
//! Zero I/O — pure sampling engine with no opinions about where statistics
//! or vocabulary come from.

pub mod category;
pub mod constants;
pub mod engine;
pub mod grow;
pub mod lexicon;
pub mod linearize;
pub mod relation;
pub mod sampler;
pub mod score;
pub mod tables;
pub mod tree;

pub use category::{ALL_CATEGORIES, Category, Role};
pub use engine::{Sentence, SentenceGenerator};
pub use grow::Grower;
pub use lexicon::{Lexicon, MemoryLexicon};
pub use linearize::{Linearizer, categories, render, words};
pub use relation::Relation;
pub use sampler::WeightedTable;
pub use score::TransitionScorer;
pub use tables::{CategoryStats, RelationStats, StatisticsTables, TableError};
pub use tree::{Edge, EdgeId, Node, NodeId, Tree};
