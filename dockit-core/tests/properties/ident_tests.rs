//! Property-based tests for widget id generation

use std::collections::HashSet;

use dockit_core::ident::{DEFAULT_GROUP, ID_NAMESPACE, IdGenerator, next_widget_id};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// A single generator never repeats an id
    #[test]
    fn prop_ids_are_unique(count in 1usize..400) {
        let ids = IdGenerator::new("dock");
        let mut seen = HashSet::new();
        for _ in 0..count {
            prop_assert!(seen.insert(ids.generate()), "generator repeated an id");
        }
    }

    /// Ids follow the namespace-group-entropy-hex shape
    #[test]
    fn prop_id_format_shape(group in "[a-z][a-z0-9]{0,11}", count in 1usize..20) {
        let ids = IdGenerator::new(group.clone());
        for _ in 0..count {
            let id = ids.generate();
            let sections: Vec<&str> = id.as_str().split('-').collect();
            prop_assert_eq!(sections.len(), 4, "unexpected section count in {}", id);
            prop_assert_eq!(sections[0], ID_NAMESPACE);
            prop_assert_eq!(sections[1], group.as_str());
            prop_assert!(!sections[2].is_empty(), "entropy block missing in {}", id);
            prop_assert!(
                sections[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "entropy block not base36 in {}",
                id
            );
            prop_assert_eq!(sections[3].len(), 22, "hex section length in {}", id);
            prop_assert!(
                sections[3].chars().all(|c| c.is_ascii_hexdigit()),
                "hex section not hexadecimal in {}",
                id
            );
        }
    }

    /// Two generators sharing a group still never collide
    #[test]
    fn prop_parallel_generators_do_not_collide(count in 1usize..200) {
        let left = IdGenerator::new("dock");
        let right = IdGenerator::new("dock");
        let mut seen = HashSet::new();
        for _ in 0..count {
            prop_assert!(seen.insert(left.generate()), "left generator collided");
            prop_assert!(seen.insert(right.generate()), "right generator collided");
        }
    }

    /// The shared default generator stays in the default group
    #[test]
    fn prop_default_ids_use_the_default_group(count in 1usize..50) {
        let prefix = format!("{ID_NAMESPACE}-{DEFAULT_GROUP}-");
        let mut seen = HashSet::new();
        for _ in 0..count {
            let id = next_widget_id();
            prop_assert!(id.as_str().starts_with(&prefix), "unexpected prefix in {}", id);
            prop_assert!(seen.insert(id), "default generator repeated an id");
        }
    }
}
