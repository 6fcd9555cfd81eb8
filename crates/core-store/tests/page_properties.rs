use core_store::{LogicalStore, Placeholder};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pages_partition_the_list(len in 0usize..5_000, page_size in 1usize..200) {
        let store = LogicalStore::new(Placeholder::new(len), page_size);
        let max = store.max_page_index();
        let mut next = 0usize;
        for page in 0..=max {
            let range = store.page_range(page);
            prop_assert_eq!(range.start, next);
            prop_assert!(range.len() <= page_size);
            if page < max {
                prop_assert_eq!(range.len(), page_size);
            }
            if len > 0 {
                prop_assert!(!range.is_empty());
            }
            next = range.end;
        }
        prop_assert_eq!(next, len);
        prop_assert!(store.page_range(max + 1).is_empty());
    }

    #[test]
    fn max_page_matches_floor_unless_exact_multiple(len in 1usize..5_000, page_size in 1usize..200) {
        let store = LogicalStore::new(Placeholder::new(len), page_size);
        if len % page_size == 0 {
            prop_assert_eq!(store.max_page_index(), len / page_size - 1);
        } else {
            prop_assert_eq!(store.max_page_index(), len / page_size);
        }
    }
}
