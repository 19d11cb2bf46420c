//! Property-based tests for table ordering and the database codec

use proptest::prelude::*;
use tplsync_core::{InclusionFilter, ReconciliationTable, StoredEntry, database};
use tplsync_fs::NormalizedPath;

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn template_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|parts| format!("{}.txt", parts.join("/")))
}

fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((template_path(), "[A-Za-z0-9,]{0,12}"), 0..24)
}

fn to_stored(entries: &[(String, String)]) -> Vec<StoredEntry> {
    entries
        .iter()
        .map(|(path, content)| StoredEntry {
            path: NormalizedPath::from(path.as_str()),
            content: content.as_bytes().to_vec(),
        })
        .collect()
}

proptest! {
    /// Output does not depend on the order lines were read in
    #[test]
    fn prop_output_is_independent_of_input_order(entries in entries()) {
        let filter = InclusionFilter::new();
        let stored = to_stored(&entries);

        // Keep one line per path so the last-line-wins rule cannot differ
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<StoredEntry> = stored
            .into_iter()
            .rev()
            .filter(|e| seen.insert(e.path.clone()))
            .collect();
        let mut reversed = unique.clone();
        reversed.reverse();

        let mut forward = ReconciliationTable::new();
        forward.merge_stored(unique, &filter);
        let mut backward = ReconciliationTable::new();
        backward.merge_stored(reversed, &filter);

        prop_assert_eq!(forward.serialize(), backward.serialize());
    }

    /// Serialized lines are sorted by depth, then path
    #[test]
    fn prop_serialized_lines_are_ordered(entries in entries()) {
        let mut table = ReconciliationTable::new();
        table.merge_stored(to_stored(&entries), &InclusionFilter::new());

        let parsed = database::parse(&table.serialize());
        let keys: Vec<(usize, &str)> = parsed
            .iter()
            .map(|e| (e.path.depth(), e.path.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();

        prop_assert_eq!(keys, sorted);
    }

    /// Reparsing the serialized table yields the same table
    #[test]
    fn prop_serialize_is_stable_across_reload(entries in entries()) {
        let mut table = ReconciliationTable::new();
        table.merge_stored(to_stored(&entries), &InclusionFilter::new());
        let first = table.serialize();

        let mut reloaded = ReconciliationTable::new();
        reloaded.merge_stored(database::parse(&first), &InclusionFilter::new());

        prop_assert_eq!(reloaded.serialize(), first);
    }

    /// Without rules every path is kept
    #[test]
    fn prop_empty_filter_includes_everything(path in template_path()) {
        prop_assert!(InclusionFilter::new().decide(&path));
    }
}
