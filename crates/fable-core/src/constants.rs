/// Farthest distance-to-origin at which a node may still acquire a parent.
pub const PARENT_DIST_THRESHOLD: u32 = 1;

/// Farthest distance-to-origin at which a node may still acquire children.
pub const CHILD_DIST_THRESHOLD: u32 = 1;

/// A node stops requesting children once its child count exceeds this.
pub const MAX_CHILDREN: usize = 3;

/// Total node count per tree beyond which no further children are requested.
pub const MAX_NODE_COUNT: usize = 7;

/// The origin node asks for at least this many children, so a single-token
/// sentence cannot fall out of a leaf-heavy child-count distribution.
pub const ORIGIN_MIN_CHILDREN: usize = 2;

/// Upper bound (exclusive) for all percentage draws.
pub const PERCENT: u32 = 100;

/// Raw percentage frequencies are scaled by this factor when building
/// weighted tables.
pub const WEIGHT_SCALE: u32 = 10;

/// Weight assigned to entries reported at 0% so every recorded relation
/// keeps nonzero sampling probability.
pub const ZERO_WEIGHT_FLOOR: u32 = 2;

/// Attempt cap for rejection-resampling loops in growth.
pub const MAX_RESAMPLE: usize = 16;

/// Adjacent child edges whose expected distances differ by less than this
/// may swap during linearization.
pub const TIE_WINDOW: f64 = 1.0;

/// Percentage chance that such a near-tie pair actually swaps.
pub const TIE_SWAP_PROB: u32 = 40;

/// Expected distance used for relations with no recorded statistics.
pub const DEFAULT_RELATION_DIST: f64 = 3.0;

/// Maximum (and neutral initial) tree score.
pub const MAX_TREE_SCORE: f64 = 1.0;

/// Default transition score for an unlisted identical category pair.
pub const DUPLICATE_SCORE: f64 = 0.8;

/// Sentences shorter than this many words start from a reduced score.
pub const SHORT_SENTENCE_WORDS: usize = 5;

/// Initial score factor applied to short sentences.
pub const SHORT_SENTENCE_FACTOR: f64 = 0.95;

/// Token emitted when the lexicon has no vocabulary for a category.
pub const PLACEHOLDER_WORD: &str = "PC";
