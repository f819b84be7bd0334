use chart_xkcd::interaction::toggle_items;
use proptest::prelude::*;

proptest! {
    #[test]
    fn toggling_the_same_batch_twice_is_a_no_op(
        current in prop::collection::btree_set(0u8..50, 0..20),
        incoming in prop::collection::btree_set(0u8..50, 0..20)
    ) {
        let original: Vec<u8> = current.into_iter().collect();
        let incoming: Vec<u8> = incoming.into_iter().collect();
        let mut items = original.clone();
        toggle_items(&mut items, &incoming);
        toggle_items(&mut items, &incoming);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, original);
    }

    #[test]
    fn toggled_set_is_the_symmetric_difference(
        current in prop::collection::btree_set(0u8..50, 0..20),
        incoming in prop::collection::btree_set(0u8..50, 0..20)
    ) {
        let mut items: Vec<u8> = current.iter().copied().collect();
        let batch: Vec<u8> = incoming.iter().copied().collect();
        toggle_items(&mut items, &batch);
        let expected: Vec<u8> = current.symmetric_difference(&incoming).copied().collect();
        items.sort_unstable();
        prop_assert_eq!(items, expected);
    }
}
