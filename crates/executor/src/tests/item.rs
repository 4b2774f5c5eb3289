//! Item family scenarios: typed values, expiry, counters.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::create_test_redkit;
use crate::{Error, SetOptions, When};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    roles: Vec<String>,
    visits: u32,
}

fn session() -> Session {
    Session {
        user: "ada".into(),
        roles: vec!["admin".into()],
        visits: 3,
    }
}

#[test]
fn test_set_then_get_struct() {
    let (redkit, _) = create_test_redkit();
    assert!(redkit.item_set("session:1", &session()).unwrap());
    let loaded: Session = redkit.item_get("session:1").unwrap();
    assert_eq!(loaded, session());
}

#[test]
fn test_get_absent_returns_default() {
    let (redkit, _) = create_test_redkit();
    let loaded: Session = redkit.item_get("missing").unwrap();
    assert_eq!(loaded, Session::default());
    let maybe: Option<Session> = redkit.item_get("missing").unwrap();
    assert_eq!(maybe, None);
}

#[test]
fn test_null_value_reads_as_absent() {
    let (redkit, _) = create_test_redkit();
    redkit.item_set("k", &None::<Session>).unwrap();
    // The key exists but holds the empty payload
    assert!(redkit.key_exists("k").unwrap());
    let maybe: Option<Session> = redkit.item_get("k").unwrap();
    assert_eq!(maybe, None);
}

#[test]
fn test_set_when_precondition() {
    let (redkit, _) = create_test_redkit();
    assert!(!redkit.item_set_when("k", "v", When::Exists).unwrap());
    assert!(redkit.item_set_when("k", "v", When::NotExists).unwrap());
    assert!(!redkit.item_set_when("k", "w", When::NotExists).unwrap());
    assert!(redkit.item_set_when("k", "w", When::Exists).unwrap());
    assert_eq!(redkit.item_get::<String>("k").unwrap(), "w");
}

#[test]
fn test_set_expires_in_elapses() {
    let (redkit, _) = create_test_redkit();
    redkit
        .item_set_expires_in("k", "v", Duration::from_millis(30))
        .unwrap();
    assert_eq!(redkit.item_get::<String>("k").unwrap(), "v");
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(redkit.item_get::<String>("k").unwrap(), "");
    assert!(!redkit.key_exists("k").unwrap());
}

#[test]
fn test_set_expires_at_past_instant() {
    let (redkit, _) = create_test_redkit();
    let past = Utc::now() - chrono::Duration::seconds(5);
    assert!(redkit.item_set_expires_at("k", &42, past).unwrap());
    assert_eq!(redkit.item_get::<i32>("k").unwrap(), 0);
}

#[test]
fn test_set_with_combined_options() {
    let (redkit, _) = create_test_redkit();
    let options = SetOptions::default()
        .when(When::NotExists)
        .expires_in(Duration::from_secs(60));
    assert!(redkit.item_set_with("k", &1, options).unwrap());
    assert!(!redkit.item_set_with("k", &2, options).unwrap());
    assert_eq!(redkit.item_get::<i32>("k").unwrap(), 1);
}

#[test]
fn test_get_many_skips_absent() {
    let (redkit, _) = create_test_redkit();
    redkit.item_set("a", &1).unwrap();
    redkit.item_set("c", &3).unwrap();
    let values: Vec<i32> = redkit.item_get_many(&["a", "b", "c"]).unwrap();
    assert_eq!(values, vec![1, 3]);
}

#[test]
fn test_remove_and_remove_many() {
    let (redkit, _) = create_test_redkit();
    redkit.item_set("a", &1).unwrap();
    redkit.item_set("b", &2).unwrap();
    redkit.item_set("c", &3).unwrap();
    assert!(redkit.item_remove("a").unwrap());
    assert!(!redkit.item_remove("a").unwrap());
    assert_eq!(redkit.item_remove_many(&["b", "c", "zz"]).unwrap(), 2);
    assert_eq!(redkit.item_get::<i32>("b").unwrap(), 0);
}

#[test]
fn test_counters() {
    let (redkit, _) = create_test_redkit();
    assert_eq!(redkit.increment("hits").unwrap(), 1);
    assert_eq!(redkit.increment_by("hits", 9).unwrap(), 10);
    assert_eq!(redkit.decrement("hits").unwrap(), 9);
    assert_eq!(redkit.decrement_by("hits", 4).unwrap(), 5);
    // Counters are readable through the JSON serializer
    assert_eq!(redkit.item_get::<i64>("hits").unwrap(), 5);

    assert_eq!(redkit.increment_by_float("ratio", 0.5).unwrap(), 0.5);
    assert_eq!(redkit.decrement_by_float("ratio", 0.25).unwrap(), 0.25);
}

#[test]
fn test_increment_non_integer_is_store_error() {
    let (redkit, _) = create_test_redkit();
    redkit.item_set("name", "ada").unwrap();
    let err = redkit.increment("name").unwrap_err();
    assert!(matches!(err, Error::Store { .. }));
}

#[test]
fn test_decrement_by_min_is_rejected() {
    let (redkit, store) = create_test_redkit();
    let err = redkit.decrement_by("n", i64::MIN).unwrap_err();
    assert!(err.is_argument_error());
    assert_eq!(store.commands_executed(), 0);
}

#[test]
fn test_empty_key_rejected_before_store() {
    let (redkit, store) = create_test_redkit();
    assert!(redkit.item_set("", "v").unwrap_err().is_argument_error());
    assert!(redkit.item_get::<String>("").unwrap_err().is_argument_error());
    assert!(redkit
        .item_get_many::<String, &str>(&[])
        .unwrap_err()
        .is_argument_error());
    assert!(redkit
        .item_remove_many(&["a", ""])
        .unwrap_err()
        .is_argument_error());
    assert_eq!(store.commands_executed(), 0);
}

#[test]
fn test_malformed_payload_is_serialization_error() {
    let (redkit, _) = create_test_redkit();
    redkit.item_set("k", "text").unwrap();
    let err = redkit.item_get::<Session>("k").unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
}
