//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1usize..400),
        prop::option::of(1usize..=64),
        prop::option::of("_[a-z]{1,12}"),
        prop::option::of("[<>:|?*]{1,8}"),
    )
        .prop_map(|(max, hash, suffix, illegal)| Config {
            max_path_length: max,
            hash_length: hash,
            shortened_name_suffix: suffix,
            illegal_characters: illegal,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Merging an empty config changes nothing
    #[test]
    fn merge_empty_is_right_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Higher precedence values win, absent ones fall through
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.hash_length, high.hash_length.or(low.hash_length));
        prop_assert_eq!(result.max_path_length, high.max_path_length.or(low.max_path_length));
        prop_assert_eq!(
            result.shortened_name_suffix,
            high.shortened_name_suffix.or(low.shortened_name_suffix)
        );
    }

    // Every generated config resolves, and resolution keeps the explicit budget
    #[test]
    fn resolve_keeps_explicit_budget(config in config_strategy()) {
        let settings = config.resolve().unwrap();
        if let Some(max) = config.max_path_length {
            prop_assert_eq!(settings.max_path_length, max);
        }
        prop_assert!(settings.hash_length >= 1);
    }
}
