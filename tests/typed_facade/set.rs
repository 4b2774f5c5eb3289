//! Set tests: membership, algebra and atomic moves

use redkit::SetOperation;

use crate::common::redkit;

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

#[test]
fn union_of_overlapping_sets() {
    let (redkit, _) = redkit();
    redkit.set_add_range("x", &["a", "b"]).unwrap();
    redkit.set_add_range("y", &["b", "c"]).unwrap();

    let union: Vec<String> = redkit.set_combine_pair("x", "y", SetOperation::Union).unwrap();
    assert_eq!(sorted(union), vec!["a", "b", "c"]);

    let inter: Vec<String> = redkit.set_combine(&["x", "y"], SetOperation::Intersect).unwrap();
    assert_eq!(inter, vec!["b"]);

    let diff: Vec<String> = redkit.set_combine(&["x", "y"], SetOperation::Difference).unwrap();
    assert_eq!(diff, vec!["a"]);
}

#[test]
fn combine_store_cardinality_matches_combined_size() {
    let (redkit, _) = redkit();
    redkit.set_add_range("x", &["a", "b"]).unwrap();
    redkit.set_add_range("y", &["b", "c"]).unwrap();

    let stored = redkit
        .set_combine_store_pair("xy", "x", "y", SetOperation::Union)
        .unwrap();
    assert_eq!(stored, 3);
    assert_eq!(redkit.set_count("xy").unwrap(), 3);

    let members: Vec<String> = redkit.set_get_all("xy").unwrap();
    assert_eq!(sorted(members), vec!["a", "b", "c"]);
}

#[test]
fn single_key_combine_does_not_reach_the_store() {
    let (redkit, store) = redkit();
    let before = store.commands_executed();

    let combined: Vec<String> = redkit.set_combine(&["only"], SetOperation::Union).unwrap();
    assert!(combined.is_empty());
    assert_eq!(redkit.set_combine_store("dest", &["only"], SetOperation::Union).unwrap(), 0);
    assert_eq!(store.commands_executed(), before);
}

#[test]
fn add_is_idempotent_and_remove_reports_membership() {
    let (redkit, _) = redkit();
    assert!(redkit.set_add("tags", "rust").unwrap());
    assert!(!redkit.set_add("tags", "rust").unwrap());
    assert!(redkit.set_exists("tags", "rust").unwrap());

    assert!(redkit.set_remove("tags", "rust").unwrap());
    assert!(!redkit.set_remove("tags", "rust").unwrap());
    assert!(!redkit.key_exists("tags").unwrap());
}

#[test]
fn move_transfers_one_member() {
    let (redkit, _) = redkit();
    redkit.set_add_range("todo", &["write", "test"]).unwrap();

    assert!(redkit.set_move("todo", "done", "write").unwrap());
    assert!(!redkit.set_move("todo", "done", "deploy").unwrap());

    assert!(!redkit.set_exists("todo", "write").unwrap());
    assert!(redkit.set_exists("done", "write").unwrap());
    assert_eq!(redkit.set_count("todo").unwrap(), 1);
}

#[test]
fn bulk_remove_counts_only_members_present() {
    let (redkit, _) = redkit();
    redkit.set_add_range("s", &[1, 2, 3]).unwrap();
    assert_eq!(redkit.set_remove_range("s", &[2, 3, 4]).unwrap(), 2);
    let left: Vec<i32> = redkit.set_get_all("s").unwrap();
    assert_eq!(left, vec![1]);
    assert!(redkit.set_remove_all("s").unwrap());
}
