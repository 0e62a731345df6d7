//! Property-based tests for the path model.

use super::{namefile_name, namefile_name_len, split_name, EntityKind, PathColumns};
use proptest::prelude::*;
use std::path::PathBuf;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.\u{e9}\u{4e2d}-]{1,24}".prop_filter("not a dot component", |s| {
        s != "." && s != ".."
    })
}

fn kind_strategy() -> impl Strategy<Value = EntityKind> {
    prop_oneof![Just(EntityKind::File), Just(EntityKind::Directory)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // Splitting a relative path and joining it again is lossless
    #[test]
    fn columns_round_trip(segments in prop::collection::vec(segment_strategy(), 1..10)) {
        let path: PathBuf = segments.iter().collect();
        let columns = PathColumns::from_path(&path).unwrap();
        prop_assert_eq!(columns.segments(), segments.as_slice());
        prop_assert_eq!(columns.to_path(), path);
    }

    // Rendered length is the character count of the joined string
    #[test]
    fn rendered_len_is_char_count(segments in prop::collection::vec(segment_strategy(), 1..10)) {
        let columns = PathColumns::from_segments(segments.clone());
        prop_assert_eq!(columns.rendered_len(), segments.join("/").chars().count());
    }

    // Stem and extension always reassemble the name
    #[test]
    fn split_reassembles(name in segment_strategy(), kind in kind_strategy()) {
        let (stem, ext) = split_name(&name, kind);
        prop_assert!(!stem.is_empty());
        prop_assert_eq!(format!("{stem}{ext}"), name);
    }

    // The cheap namefile length matches the built name
    #[test]
    fn namefile_len_matches(name in segment_strategy(), kind in kind_strategy()) {
        prop_assert_eq!(namefile_name(&name, kind).chars().count(), namefile_name_len(&name, kind));
    }
}
