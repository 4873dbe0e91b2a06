use std::collections::HashSet;
use std::path::Path;

use proptest::prelude::*;

use pluglaunch::config::validate_plugin_name;
use pluglaunch::paths::log_file_for;

proptest! {
    #[test]
    fn log_paths_are_distinct_and_deterministic(
        names in proptest::collection::hash_set("[a-z][a-z0-9_-]{0,15}", 1..20)
    ) {
        let log_dir = Path::new("/var/log/plugins");
        let mut seen = HashSet::new();

        for name in &names {
            prop_assert!(validate_plugin_name(name).is_ok());

            let path = log_file_for(log_dir, name);
            prop_assert_eq!(&path, &log_file_for(log_dir, name));
            prop_assert_eq!(path.parent(), Some(log_dir));
            prop_assert!(seen.insert(path));
        }
    }

    #[test]
    fn names_with_separators_are_rejected(
        head in "[a-z]{1,8}",
        sep in prop::sample::select(vec!['/', '\\']),
        tail in "[a-z]{0,8}",
    ) {
        let name = format!("{head}{sep}{tail}");
        prop_assert!(validate_plugin_name(&name).is_err());
    }
}
