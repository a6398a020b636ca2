//! Integration tests for directional cursors over an ordered collection
//!
//! - A fresh cursor sits before the first element in its direction
//! - A cursor keeps the direction it was created with
//! - Reset rewinds to before the first element

use rstest::rstest;

use treekit::domain::{Direction, DomainError, OrderedCollection};
use treekit::util::testing;

fn collection() -> OrderedCollection<String> {
    let mut collection = OrderedCollection::new();
    collection.add_item("First".to_string());
    collection.add_item("Second".to_string());
    collection.add_item("Third".to_string());
    collection
}

fn drain(collection: &OrderedCollection<String>) -> Vec<String> {
    let mut cursor = collection.cursor();
    let mut seen = Vec::new();
    while cursor.move_next(collection) {
        seen.push(cursor.current(collection).unwrap().clone());
    }
    seen
}

#[test]
fn given_three_items_when_traversed_forward_then_insertion_order() {
    testing::init_test_setup();
    assert_eq!(drain(&collection()), vec!["First", "Second", "Third"]);
}

#[test]
fn given_direction_reversed_when_new_cursor_traverses_then_reverse_order() {
    testing::init_test_setup();
    let mut collection = collection();
    collection.reverse_direction();

    assert_eq!(collection.direction(), Direction::Reverse);
    assert_eq!(drain(&collection), vec!["Third", "Second", "First"]);
}

#[test]
fn given_reversed_twice_when_traversed_then_forward_again() {
    testing::init_test_setup();
    let mut collection = collection();
    collection.reverse_direction();
    collection.reverse_direction();
    assert_eq!(drain(&collection), vec!["First", "Second", "Third"]);
}

#[rstest]
#[case::forward(false)]
#[case::reverse(true)]
fn given_n_items_when_move_next_then_n_true_then_false(#[case] reverse: bool) {
    testing::init_test_setup();
    let mut collection = collection();
    if reverse {
        collection.reverse_direction();
    }
    let mut cursor = collection.cursor();

    let moves: Vec<bool> = (0..5).map(|_| cursor.move_next(&collection)).collect();

    assert_eq!(moves, vec![true, true, true, false, false]);
}

#[test]
fn given_fresh_cursor_when_current_then_invalid_cursor_access() {
    testing::init_test_setup();
    let collection = collection();
    let cursor = collection.cursor();

    assert_eq!(
        cursor.current(&collection),
        Err(DomainError::InvalidCursorAccess { position: -1 })
    );
}

#[rstest]
#[case::forward(false, -1, vec!["First", "Second", "Third"])]
#[case::reverse(true, 3, vec!["Third", "Second", "First"])]
fn given_exhausted_cursor_when_reset_then_same_sequence_again(
    #[case] reverse: bool,
    #[case] before_start: isize,
    #[case] expected: Vec<&str>,
) {
    testing::init_test_setup();
    let mut collection = collection();
    if reverse {
        collection.reverse_direction();
    }
    let mut iter = collection.iter();

    let first: Vec<String> = iter.by_ref().cloned().collect();
    iter.reset();
    assert_eq!(iter.key(), before_start);
    let second: Vec<String> = iter.cloned().collect();

    assert_eq!(first, expected);
    assert_eq!(second, expected);
}

#[test]
fn given_reset_cursor_when_current_then_invalid_cursor_access() {
    testing::init_test_setup();
    let collection = collection();
    let mut iter = collection.iter();
    iter.move_next();
    iter.move_next();

    iter.reset();

    assert!(iter.current().is_err());
    assert_eq!(iter.key(), -1);
}

#[test]
fn given_cursor_created_before_reverse_when_advanced_then_keeps_old_direction() {
    testing::init_test_setup();
    let mut collection = collection();
    let mut old = collection.cursor();
    collection.reverse_direction();

    assert!(old.move_next(&collection));

    assert_eq!(old.direction(), Direction::Forward);
    assert_eq!(old.current(&collection).unwrap(), "First");
    assert_eq!(collection.cursor().direction(), Direction::Reverse);
}

#[test]
fn given_advancing_cursor_when_key_then_tracks_position() {
    testing::init_test_setup();
    let mut collection = collection();
    collection.reverse_direction();
    let mut iter = collection.iter();

    assert_eq!(iter.key(), 3);
    iter.move_next();
    assert_eq!(iter.key(), 2);
    iter.move_next();
    assert_eq!(iter.key(), 1);
}

#[test]
fn given_collection_when_used_in_for_loop_then_follows_direction() {
    testing::init_test_setup();
    let mut collection = collection();
    collection.reverse_direction();

    let mut seen = Vec::new();
    for item in &collection {
        seen.push(item.as_str());
    }

    assert_eq!(seen, vec!["Third", "Second", "First"]);
}
