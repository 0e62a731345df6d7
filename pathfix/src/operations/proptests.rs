//! Property-based tests for the operations module.
//!
//! These tests focus on row planning and end-to-end invariants of fixing a
//! tree in place.

use super::plan::RowPlanner;
use super::remediate::remediate_in_place;
use crate::config::Settings;
use crate::error::Error;
use crate::path::{split_name, EntityKind, PathColumns};
use crate::table::PathRow;
use proptest::prelude::*;
use std::fs;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 <>:|?*._-]{1,40}".prop_filter("not a dot component", |s| {
        s != "." && s != ".." && !s.chars().all(|c| c == '.')
    })
}

fn row_strategy() -> impl Strategy<Value = PathRow> {
    (
        prop::collection::vec(segment_strategy(), 1..7),
        prop_oneof![Just(EntityKind::File), Just(EntityKind::Directory)],
    )
        .prop_map(|(segments, kind)| {
            let mut all = vec!["root".to_string()];
            all.extend(segments);
            PathRow::new(PathColumns::from_segments(all), kind)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A planned row fits and is clean, or planning reports it unshortenable
    #[test]
    fn planned_rows_fit_or_fail(mut row in row_strategy(), limit in 40usize..200, hash in 1usize..8) {
        let settings = Settings { max_path_length: limit, hash_length: hash, ..Settings::default() };
        match RowPlanner::new(&settings).plan(&mut row) {
            Ok(()) => {
                prop_assert!(row.effective_len() <= limit);
                for segment in row.target.segments().iter().skip(1) {
                    prop_assert!(!settings.has_illegal(segment));
                }
            }
            Err(Error::Unshortenable { limit: reported, .. }) => prop_assert_eq!(reported, limit),
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
        prop_assert_eq!(row.target.get(0), Some("root"));
    }

    // Shortening keeps a file's extension
    #[test]
    fn shortening_keeps_extension(mut row in row_strategy(), limit in 60usize..120) {
        let settings = Settings { max_path_length: limit, ..Settings::default() };
        let last = row.len() - 1;
        let kind = row.leaf_kind;
        let original_leaf = crate::sanitize::sanitize_segment(row.original.get(last).unwrap(), &settings);
        if RowPlanner::new(&settings).plan(&mut row).is_ok() {
            let (_, original_ext) = split_name(&original_leaf, kind);
            let planned = row.target.get(last).unwrap();
            prop_assert!(planned.ends_with(original_ext));
        }
    }

    // Planning an already planned row changes nothing
    #[test]
    fn planning_is_stable(mut row in row_strategy(), limit in 40usize..200) {
        let settings = Settings { max_path_length: limit, ..Settings::default() };
        if RowPlanner::new(&settings).plan(&mut row).is_ok() {
            let mut again = PathRow::new(row.target.clone(), row.leaf_kind);
            RowPlanner::new(&settings).plan(&mut again).unwrap();
            prop_assert_eq!(again.target, row.target);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 24,
        .. ProptestConfig::default()
    })]

    // Fixing a generated tree leaves it compliant, and fixing it again is a no-op
    #[test]
    fn in_place_fix_is_idempotent(
        dirs in prop::collection::vec("[a-z<>?]{8,30}", 1..4),
        files in prop::collection::vec("[a-z|*]{10,40}\\.txt", 1..6),
    ) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        let mut dir = root.clone();
        for name in &dirs {
            dir.push(name);
        }
        fs::create_dir_all(&dir).unwrap();
        for name in &files {
            fs::write(dir.join(name), name).unwrap();
        }

        let settings = Settings { max_path_length: 90, hash_length: 6, ..Settings::default() };
        match remediate_in_place(&root, &settings) {
            Ok(first) => {
                prop_assert!(first.after.is_clean());
                let second = remediate_in_place(&root, &settings).unwrap();
                prop_assert_eq!(second.plan.rename_count(), 0);
            }
            Err(err) => prop_assert!(err.is_collision(), "unexpected error {}", err),
        }
    }
}
