//! Hash tests: field writes, conditional sets, bulk reads

use redkit::{JsonSerializer, Serializer, When};

use crate::common::{redkit, Invoice};

#[test]
fn fields_hold_structured_values() {
    let (redkit, _) = redkit();
    assert!(redkit.hash_set("invoices", "1", &Invoice::sample(1)).unwrap());
    assert!(!redkit.hash_set("invoices", "1", &Invoice::sample(11)).unwrap());

    let stored: Invoice = redkit.hash_get("invoices", "1").unwrap();
    assert_eq!(stored.id, 11);
    let missing: Invoice = redkit.hash_get("invoices", "2").unwrap();
    assert_eq!(missing, Invoice::default());
}

#[test]
fn conditional_field_set() {
    let (redkit, _) = redkit();
    assert!(redkit.hash_set_when("cfg", "mode", "fast", When::NotExists).unwrap());
    assert!(!redkit.hash_set_when("cfg", "mode", "slow", When::NotExists).unwrap());
    assert_eq!(redkit.hash_get::<String>("cfg", "mode").unwrap(), "fast");
}

#[test]
fn bulk_set_and_reads() {
    let (redkit, _) = redkit();
    redkit
        .hash_set_range("user:1", &[("name", "ada"), ("lang", "rust"), ("city", "london")])
        .unwrap();

    assert_eq!(redkit.hash_count("user:1").unwrap(), 3);
    assert!(redkit.hash_exists("user:1", "lang").unwrap());

    let some: Vec<String> = redkit.hash_get_many("user:1", &["name", "missing", "city"]).unwrap();
    assert_eq!(some, vec!["ada", "london"]);

    let mut values: Vec<String> = redkit.hash_get_all("user:1").unwrap();
    values.sort();
    assert_eq!(values, vec!["ada", "london", "rust"]);

    let entries = redkit.hash_get_all_entries("user:1").unwrap();
    let fields: Vec<&str> = entries.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["city", "lang", "name"]);
    let name: String = JsonSerializer.deserialize(entries[2].value.as_bytes()).unwrap();
    assert_eq!(name, "ada");
}

#[test]
fn removing_fields_and_whole_hash() {
    let (redkit, _) = redkit();
    redkit.hash_set_range("h", &[("a", 1), ("b", 2), ("c", 3)]).unwrap();

    assert!(redkit.hash_remove("h", "a").unwrap());
    assert!(!redkit.hash_remove("h", "a").unwrap());
    assert_eq!(redkit.hash_remove_range("h", &["b", "zzz"]).unwrap(), 1);
    assert!(redkit.hash_remove_all("h").unwrap());
    assert_eq!(redkit.hash_count("h").unwrap(), 0);
}

#[test]
fn empty_field_lists_are_rejected() {
    let (redkit, store) = redkit();
    let none: [(&str, i32); 0] = [];
    assert!(redkit.hash_set_range("h", &none).unwrap_err().is_argument_error());
    assert!(redkit
        .hash_set_range("h", &[("", 1)])
        .unwrap_err()
        .is_argument_error());
    assert_eq!(store.commands_executed(), 0);
}
