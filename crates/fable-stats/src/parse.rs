//! Line parsers for the curated Universal Dependencies statistics files.
//!
//! The files are prose-with-markup extracts from treebank reports, so every
//! parser here is regex-driven and deliberately lossy: lines and entries
//! that fail to match, or that name unknown tags, are skipped rather than
//! treated as fatal. Pure string handling, no I/O.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use fable_core::{Category, Relation};

use crate::error::{Result, StatsError};

static POS_INTRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<code>([A-Z]+)</code> nodes are attached (.+?):(.+)").unwrap());
static POS_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"en-dep/([\w:]+)</a>.*?(\d+);\s*(\d+)% inst").unwrap());

static DEP_INTRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"speech are connected with <code>([\w:]+)</code>:(.+)").unwrap()
});
static DEP_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"en-pos/([A-Z]+)</a>.*?pos/([A-Z]+)</a>.*?;\s*(\d+)% instance").unwrap()
});

static ORDER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<code>([\w:]+)</code>\s*\((\d+)%\)\s*are (left-to-right|right-to-left)").unwrap()
});
static ORDER_DIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"verage distance.*?is (\d+\.\d+)").unwrap());

static CHILD_COUNT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)%\)\s*<code>([A-Z]+)</code> nodes (.+)").unwrap());

/// Entries reported at 0% with fewer than this many occurrences carry no
/// signal and are dropped.
const MIN_ZERO_OCCURRENCES: u32 = 10;

/// Per-category relation frequencies read from `posStats.txt`.
///
/// "attached to their parents" lines describe the category as the child
/// end of a relation; "attached to their children" lines describe it as
/// the parent end. The `root` pseudo-relation feeds the root probability
/// instead of either table.
#[derive(Debug, Default)]
pub struct PosStats {
    pub as_parent: HashMap<Category, Vec<(Relation, u32)>>,
    pub as_child: HashMap<Category, Vec<(Relation, u32)>>,
    pub root_prob: HashMap<Category, u32>,
}

pub fn parse_pos_stats(content: &str) -> PosStats {
    let mut stats = PosStats::default();
    for line in content.lines() {
        let Some(intro) = POS_INTRO.captures(line) else {
            continue;
        };
        let category = Category::from_name(&intro[1]);
        if category.is_none() {
            debug!(tag = &intro[1], "skipping unknown category");
            continue;
        }
        let toward_parents = intro[2].contains("parents");
        let mut entries = Vec::new();
        for item in intro[3].split(", ") {
            let Some(m) = POS_ITEM.captures(item) else {
                continue;
            };
            let name = &m[1];
            let count: u32 = m[2].parse().unwrap_or(0);
            let pct: u32 = m[3].parse().unwrap_or(0);
            if name == "root" {
                stats.root_prob.insert(category, pct);
                continue;
            }
            let relation = Relation::from_name(name);
            if relation.is_none() {
                debug!(name, "skipping unknown relation");
                continue;
            }
            if pct == 0 && count < MIN_ZERO_OCCURRENCES {
                continue;
            }
            entries.push((relation, pct));
        }
        let table = if toward_parents {
            &mut stats.as_child
        } else {
            &mut stats.as_parent
        };
        table.insert(category, entries);
    }
    stats
}

/// Per-relation `(parent category, child category, pct)` triples read from
/// `depStats.txt`.
pub fn parse_dep_stats(content: &str) -> HashMap<Relation, Vec<(Category, Category, u32)>> {
    let mut stats: HashMap<Relation, Vec<(Category, Category, u32)>> = HashMap::new();
    for line in content.lines() {
        let Some(intro) = DEP_INTRO.captures(line) else {
            continue;
        };
        let relation = Relation::from_name(&intro[1]);
        if relation.is_none() {
            debug!(name = &intro[1], "skipping unknown relation");
            continue;
        }
        let entries = stats.entry(relation).or_default();
        for item in intro[2].split(", ") {
            let Some(m) = DEP_ITEM.captures(item) else {
                continue;
            };
            let parent = Category::from_name(&m[1]);
            let child = Category::from_name(&m[2]);
            if parent.is_none() || child.is_none() {
                continue;
            }
            let pct: u32 = m[3].parse().unwrap_or(0);
            entries.push((parent, child, pct));
        }
    }
    stats
}

/// Surface ordering of one relation: how often the parent token precedes
/// the child, and their mean linear distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelationOrder {
    pub parent_first_pct: u32,
    pub distance: f64,
}

/// Parse `depLeftRightProb.txt`. Every non-blank line must carry both an
/// ordering percentage and an average distance; a right-to-left percentage
/// (child precedes parent) is flipped into parent-first terms.
pub fn parse_left_right(content: &str) -> Result<HashMap<Relation, RelationOrder>> {
    let mut orders = HashMap::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (Some(m), Some(d)) = (ORDER_LINE.captures(line), ORDER_DIST.captures(line)) else {
            return Err(StatsError::InvalidData(format!(
                "ordering line missing direction or distance: {line}"
            )));
        };
        let relation = Relation::from_name(&m[1]);
        if relation.is_none() {
            debug!(name = &m[1], "skipping unknown relation");
            continue;
        }
        let pct: u32 = m[2]
            .parse()
            .ok()
            .filter(|&p| p <= 100)
            .ok_or_else(|| StatsError::InvalidData(format!("bad percentage in: {line}")))?;
        let parent_first_pct = if &m[3] == "right-to-left" { 100 - pct } else { pct };
        let distance: f64 = d[1]
            .parse()
            .map_err(|_| StatsError::InvalidData(format!("bad distance in: {line}")))?;
        orders.insert(
            relation,
            RelationOrder {
                parent_first_pct,
                distance,
            },
        );
    }
    Ok(orders)
}

/// Per-category child-count bucket percentages read from `pcProb.txt`:
/// `[leaves, one child, two children, three or more]`.
pub fn parse_child_counts(content: &str) -> HashMap<Category, [u32; 4]> {
    let mut counts: HashMap<Category, [u32; 4]> = HashMap::new();
    for line in content.lines() {
        let Some(m) = CHILD_COUNT_LINE.captures(line) else {
            continue;
        };
        let category = Category::from_name(&m[2]);
        if category.is_none() {
            continue;
        }
        let pct: u32 = m[1].parse().unwrap_or(0);
        let phrase = &m[3];
        let bucket = if phrase.contains("are leaves") {
            0
        } else if phrase.contains("one child") {
            1
        } else if phrase.contains("two children") {
            2
        } else if phrase.contains("three or more children") {
            3
        } else {
            continue;
        };
        counts.entry(category).or_default()[bucket] = pct;
    }
    counts
}
