use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use fable_core::{
    Category, CategoryStats, Relation, RelationStats, StatisticsTables, WeightedTable,
};

use crate::error::{Result, StatsError};
use crate::parse;

/// Sibling relations that never co-occur under one head. Curated by ear:
/// a case marker with a determiner ("any for baron") and a subordinating
/// mark with an auxiliary ("to would") both read as word salad.
const INCOMPATIBLE_PAIRS: &[(Relation, Relation)] =
    &[(Relation::Case, Relation::Det), (Relation::Mark, Relation::Aux)];

fn read(data_dir: &Path, name: &str) -> Result<String> {
    let path = data_dir.join(name);
    fs::read_to_string(&path).map_err(|source| StatsError::Io { path, source })
}

/// Load and cross-check the full statistics tables from a data directory
/// holding `posStats.txt`, `depStats.txt`, `depLeftRightProb.txt`, and
/// `pcProb.txt`.
pub fn load_tables(data_dir: &Path) -> Result<StatisticsTables> {
    let pos = parse::parse_pos_stats(&read(data_dir, "posStats.txt")?);
    let dep = parse::parse_dep_stats(&read(data_dir, "depStats.txt")?);
    let orders = parse::parse_left_right(&read(data_dir, "depLeftRightProb.txt")?)?;
    let child_counts = parse::parse_child_counts(&read(data_dir, "pcProb.txt")?);

    let mut tables = StatisticsTables::new();

    let mut categories: Vec<Category> = pos
        .as_parent
        .keys()
        .chain(pos.as_child.keys())
        .copied()
        .collect();
    categories.sort_by_key(|c| c.as_str());
    categories.dedup();

    for category in categories {
        let as_parent = pos.as_parent.get(&category).cloned().unwrap_or_default();
        let as_child = pos.as_child.get(&category).cloned().unwrap_or_default();
        let buckets = child_counts.get(&category).copied().unwrap_or_default();
        let stats = CategoryStats {
            as_parent: WeightedTable::from_percentages(as_parent),
            as_child: WeightedTable::from_percentages(as_child),
            root_prob: pos.root_prob.get(&category).copied().unwrap_or(0),
            child_counts: WeightedTable::from_weights(buckets.into_iter().enumerate()),
        };
        debug!(
            category = %category,
            parent_relations = stats.as_parent.len(),
            child_relations = stats.as_child.len(),
            root_prob = stats.root_prob,
            "category loaded"
        );
        tables.insert_category(category, stats);
    }

    for (relation, pairs) in dep {
        let order = orders.get(&relation).copied();
        let mut stats = RelationStats::default();
        if let Some(order) = order {
            stats.distance = order.distance;
            stats.parent_first_pct = order.parent_first_pct;
        } else {
            debug!(relation = %relation, "no ordering data; using defaults");
        }

        let mut by_parent: HashMap<Category, Vec<(Category, u32)>> = HashMap::new();
        let mut by_child: HashMap<Category, Vec<(Category, u32)>> = HashMap::new();
        for (parent, child, pct) in pairs {
            by_parent.entry(parent).or_default().push((child, pct));
            by_child.entry(child).or_default().push((parent, pct));
        }
        for (parent, entries) in by_parent {
            stats
                .child_given_parent
                .insert(parent, WeightedTable::from_percentages(entries));
        }
        for (child, entries) in by_child {
            stats
                .parent_given_child
                .insert(child, WeightedTable::from_percentages(entries));
        }
        tables.insert_relation(relation, stats);
    }

    for &(a, b) in INCOMPATIBLE_PAIRS {
        tables.add_incompatible_pair(a, b);
    }

    tables.validate()?;
    info!(
        categories = tables.categories().count(),
        "statistics tables loaded"
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    fn seed_minimal(dir: &Path) {
        write_file(
            dir,
            "posStats.txt",
            concat!(
                r#"<p><code>NOUN</code> nodes are attached to their parents using 1 different relations: "#,
                r#"<a href="">en-dep/nsubj</a> (2502; 100% instances)</p>"#,
                "\n",
                r#"<p><code>NOUN</code> nodes are attached to their children using 1 different relations: "#,
                r#"<a href="">en-dep/det</a> (1800; 100% instances)</p>"#,
                "\n",
                r#"<p><code>VERB</code> nodes are attached to their parents using 1 different relations: "#,
                r#"<a href="">en-dep/root</a> (2084; 100% instances)</p>"#,
                "\n",
                r#"<p><code>VERB</code> nodes are attached to their children using 1 different relations: "#,
                r#"<a href="">en-dep/nsubj</a> (2502; 100% instances)</p>"#,
                "\n",
                r#"<p><code>DET</code> nodes are attached to their parents using 1 different relations: "#,
                r#"<a href="">en-dep/root</a> (100; 100% instances)</p>"#,
                "\n",
            ),
        );
        write_file(
            dir,
            "depStats.txt",
            concat!(
                r#"The following 1 pairs of parts of speech are connected with <code>nsubj</code>: "#,
                r#"<a href="">en-pos/VERB</a>-<a href="">en-pos/NOUN</a> (1372; 100% instances)."#,
                "\n",
                r#"The following 1 pairs of parts of speech are connected with <code>det</code>: "#,
                r#"<a href="">en-pos/NOUN</a>-<a href="">en-pos/DET</a> (900; 100% instances)."#,
                "\n",
            ),
        );
        write_file(
            dir,
            "depLeftRightProb.txt",
            concat!(
                "<p>17580 instances of <code>nsubj</code> (96%) are right-to-left ",
                "(child precedes parent). Average distance between parent and child is 2.54.</p>\n",
                "<p>9000 instances of <code>det</code> (98%) are right-to-left ",
                "(child precedes parent). Average distance between parent and child is 1.20.</p>\n",
            ),
        );
        write_file(
            dir,
            "pcProb.txt",
            concat!(
                "<p>100 (40%) <code>NOUN</code> nodes are leaves.</p>\n",
                "<p>100 (60%) <code>NOUN</code> nodes have one child.</p>\n",
                "<p>100 (50%) <code>VERB</code> nodes have one child.</p>\n",
                "<p>100 (50%) <code>VERB</code> nodes have two children.</p>\n",
                "<p>100 (100%) <code>DET</code> nodes are leaves.</p>\n",
            ),
        );
    }

    #[test]
    fn test_load_minimal_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        let tables = load_tables(dir.path()).unwrap();

        let noun = tables.category(Category::Noun).unwrap();
        assert_eq!(noun.root_prob, 0);
        assert!(!noun.as_child.is_empty());
        let verb = tables.category(Category::Verb).unwrap();
        assert_eq!(verb.root_prob, 100);

        let nsubj = tables.relation(Relation::Nsubj).unwrap();
        assert_eq!(nsubj.parent_first_pct, 4);
        assert_eq!(nsubj.distance, 2.54);
        assert!(tables.incompatible(Relation::Case, Relation::Det));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tables(dir.path()).unwrap_err();
        assert!(matches!(err, StatsError::Io { .. }));
    }

    #[test]
    fn test_dangling_relation_is_table_error() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        // Reference a relation with no depStats entry.
        write_file(
            dir.path(),
            "posStats.txt",
            concat!(
                r#"<p><code>NOUN</code> nodes are attached to their parents using 1 different relations: "#,
                r#"<a href="">en-dep/appos</a> (2502; 100% instances)</p>"#,
                "\n",
                r#"<p><code>NOUN</code> nodes are attached to their children using 0 different relations:</p>"#,
                "\n",
            ),
        );
        let err = load_tables(dir.path()).unwrap_err();
        assert!(matches!(err, StatsError::Table(_)));
    }
}
