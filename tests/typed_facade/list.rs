//! List tests: queue and stack usage, pivots, ranges and type errors

use std::time::Duration;

use redkit::{Error, When};

use crate::common::{redkit, Invoice};

#[test]
fn right_push_left_pop_is_a_fifo_queue() {
    let (redkit, _) = redkit();
    for id in 1..=3 {
        redkit.list_right_push("jobs", &Invoice::sample(id)).unwrap();
    }

    let first: Invoice = redkit.list_left_pop("jobs").unwrap();
    let second: Invoice = redkit.list_left_pop("jobs").unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(redkit.list_count("jobs").unwrap(), 1);
}

#[test]
fn left_push_range_reverses_order_like_redis() {
    let (redkit, _) = redkit();
    assert_eq!(redkit.list_left_push_range("stack", &["a", "b", "c"]).unwrap(), 3);
    let all: Vec<String> = redkit.list_get_all("stack").unwrap();
    assert_eq!(all, vec!["c", "b", "a"]);
}

#[test]
fn popping_an_empty_list_reads_default_and_deletes_key() {
    let (redkit, _) = redkit();
    redkit.list_right_push("once", &7).unwrap();
    assert_eq!(redkit.list_right_pop::<i32>("once").unwrap(), 7);
    assert_eq!(redkit.list_right_pop::<i32>("once").unwrap(), 0);
    assert!(!redkit.key_exists("once").unwrap());
}

#[test]
fn insert_around_pivot() {
    let (redkit, _) = redkit();
    redkit.list_right_push_range("l", &["a", "c"]).unwrap();

    assert_eq!(redkit.list_insert_left("l", "b", "c").unwrap(), 3);
    assert_eq!(redkit.list_insert_right("l", "d", "c").unwrap(), 4);
    assert_eq!(redkit.list_insert_left("l", "x", "missing").unwrap(), -1);
    assert_eq!(redkit.list_insert_left("nolist", "x", "a").unwrap(), 0);

    let all: Vec<String> = redkit.list_get_all("l").unwrap();
    assert_eq!(all, vec!["a", "b", "c", "d"]);
}

#[test]
fn ranges_and_indexes_accept_negative_positions() {
    let (redkit, _) = redkit();
    redkit.list_right_push_range("nums", &[10, 20, 30, 40]).unwrap();

    let tail: Vec<i32> = redkit.list_get_range("nums", -2, -1).unwrap();
    assert_eq!(tail, vec![30, 40]);
    assert_eq!(redkit.list_get_by_index::<i32>("nums", -1).unwrap(), 40);
    assert_eq!(redkit.list_get_by_index::<i32>("nums", 99).unwrap(), 0);
}

#[test]
fn remove_drops_every_occurrence() {
    let (redkit, _) = redkit();
    redkit.list_right_push_range("l", &["a", "b", "a", "a"]).unwrap();
    assert_eq!(redkit.list_remove("l", "a").unwrap(), 3);
    assert_eq!(redkit.list_count("l").unwrap(), 1);
}

#[test]
fn conditional_push_only_extends_existing_lists() {
    let (redkit, _) = redkit();
    assert_eq!(redkit.list_right_push_when("l", "a", When::Exists).unwrap(), 0);
    assert!(!redkit.key_exists("l").unwrap());

    redkit.list_right_push("l", "a").unwrap();
    assert_eq!(redkit.list_left_push_when("l", "b", When::Exists).unwrap(), 2);
}

#[test]
fn list_commands_on_a_string_key_fail_with_wrong_type() {
    let (redkit, _) = redkit();
    redkit.item_set("plain", "v").unwrap();
    let err = redkit.list_right_push("plain", "x").unwrap_err();
    assert!(matches!(err, Error::WrongType { .. }), "got {:?}", err);
}

#[test]
fn list_expiry_applies_to_whole_key() {
    let (redkit, _) = redkit();
    redkit.list_right_push("l", "a").unwrap();
    assert!(redkit.list_expire_in("l", Duration::from_millis(10)).unwrap());
    std::thread::sleep(Duration::from_millis(40));
    assert_eq!(redkit.list_count("l").unwrap(), 0);
    assert!(!redkit.list_expire_in("l", Duration::from_secs(1)).unwrap());
}
