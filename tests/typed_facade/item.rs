//! Item tests: typed values, counters, multi-get and expiry

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use proptest::prelude::*;
use redkit::{Error, KeyType, SetOptions, When};

use crate::common::{redkit, redkit_msgpack, Invoice};

#[test]
fn structured_value_round_trips_with_both_serializers() {
    let (json, _) = redkit();
    json.item_set("invoice:1", &Invoice::sample(1)).unwrap();
    let back: Invoice = json.item_get("invoice:1").unwrap();
    assert_eq!(back, Invoice::sample(1));

    let (msgpack, _) = redkit_msgpack();
    msgpack.item_set("invoice:2", &Invoice::sample(2)).unwrap();
    let back: Invoice = msgpack.item_get("invoice:2").unwrap();
    assert_eq!(back, Invoice::sample(2));
}

#[test]
fn missing_and_removed_keys_read_as_default() {
    let (redkit, _) = redkit();
    let missing: Invoice = redkit.item_get("nope").unwrap();
    assert_eq!(missing, Invoice::default());

    redkit.item_set("greeting", "hello").unwrap();
    assert!(redkit.item_remove("greeting").unwrap());
    let gone: String = redkit.item_get("greeting").unwrap();
    assert_eq!(gone, "");
    assert!(!redkit.item_remove("greeting").unwrap());
}

#[test]
fn null_is_stored_as_empty_and_reads_as_default() {
    let (redkit, _) = redkit();
    redkit.item_set("maybe", &Option::<i32>::None).unwrap();
    assert!(redkit.key_exists("maybe").unwrap());
    let value: Option<i32> = redkit.item_get("maybe").unwrap();
    assert_eq!(value, None);
}

#[test]
fn multi_get_skips_absent_keys() {
    let (redkit, _) = redkit();
    redkit.item_set("a", &1).unwrap();
    redkit.item_set("c", &3).unwrap();

    let values: Vec<i32> = redkit.item_get_many(&["a", "b", "c"]).unwrap();
    assert_eq!(values, vec![1, 3]);
}

#[test]
fn conditional_set_respects_existence() {
    let (redkit, _) = redkit();
    assert!(redkit.item_set_when("lock", "owner-1", When::NotExists).unwrap());
    assert!(!redkit.item_set_when("lock", "owner-2", When::NotExists).unwrap());
    assert!(redkit.item_set_when("lock", "owner-3", When::Exists).unwrap());
    let owner: String = redkit.item_get("lock").unwrap();
    assert_eq!(owner, "owner-3");
}

#[test]
fn expired_item_reads_as_default() {
    let (redkit, _) = redkit();
    redkit
        .item_set_with(
            "session",
            "token",
            SetOptions::default().expires_in(Duration::from_millis(20)),
        )
        .unwrap();
    let live: String = redkit.item_get("session").unwrap();
    assert_eq!(live, "token");

    thread::sleep(Duration::from_millis(60));
    let expired: String = redkit.item_get("session").unwrap();
    assert_eq!(expired, "");
    assert!(!redkit.key_exists("session").unwrap());
}

#[test]
fn deadline_in_the_past_expires_immediately() {
    let (redkit, _) = redkit();
    let past = Utc::now() - chrono::Duration::seconds(5);
    redkit.item_set_expires_at("stale", "v", past).unwrap();
    assert!(!redkit.key_exists("stale").unwrap());

    let future = Utc::now() + chrono::Duration::hours(1);
    redkit.item_set_expires_at("fresh", "v", future).unwrap();
    assert!(redkit.key_exists("fresh").unwrap());
}

#[test]
fn counters_are_readable_as_items() {
    let (redkit, _) = redkit();
    assert_eq!(redkit.increment_by("hits", 10).unwrap(), 10);
    assert_eq!(redkit.decrement("hits").unwrap(), 9);
    let hits: i64 = redkit.item_get("hits").unwrap();
    assert_eq!(hits, 9);

    assert_eq!(redkit.increment_by_float("temp", 1.5).unwrap(), 1.5);
    assert_eq!(redkit.decrement_by_float("temp", 0.25).unwrap(), 1.25);
}

#[test]
fn incrementing_a_non_integer_is_a_store_error() {
    let (redkit, _) = redkit();
    redkit.item_set("name", "ada").unwrap();
    let err = redkit.increment("name").unwrap_err();
    assert!(matches!(err, Error::Store { .. }), "got {:?}", err);
}

#[test]
fn rename_moves_value_and_guards_edge_cases() {
    let (redkit, store) = redkit();
    redkit.item_set("old", "v").unwrap();

    let before = store.commands_executed();
    assert!(!redkit.key_rename("old", "old").unwrap());
    assert_eq!(store.commands_executed(), before);

    assert!(!redkit.key_rename("missing", "new").unwrap());
    assert!(redkit.key_rename("old", "new").unwrap());
    assert!(!redkit.key_exists("old").unwrap());
    assert_eq!(redkit.key_type("new").unwrap(), KeyType::String);
}

#[test]
fn empty_key_is_rejected_before_the_store() {
    let (redkit, store) = redkit();
    let err = redkit.item_set("", "v").unwrap_err();
    assert!(err.is_argument_error());
    assert_eq!(store.commands_executed(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn map_values_round_trip(entries in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8)) {
        let (redkit, _) = redkit();
        redkit.item_set("map", &entries).unwrap();
        let back: BTreeMap<String, i64> = redkit.item_get("map").unwrap();
        prop_assert_eq!(back, entries);
    }

    #[test]
    fn text_values_round_trip_through_msgpack(text in "\\PC{0,32}") {
        let (redkit, _) = redkit_msgpack();
        redkit.item_set("text", &text).unwrap();
        let back: String = redkit.item_get("text").unwrap();
        prop_assert_eq!(back, text);
    }
}
