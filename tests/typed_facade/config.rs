//! Config tests: building a facade from `redkit.toml`

use std::sync::Arc;

use redkit::{
    CommandFlags, MemoryStore, Redkit, RedkitConfig, RoutingPolicy, SerializerKind,
    CONFIG_FILE_NAME,
};
use tempfile::TempDir;

use crate::common::{init_tracing, Invoice};

#[test]
fn default_file_is_written_once_and_loads() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    RedkitConfig::write_default_if_missing(&path).unwrap();
    std::fs::write(&path, "serializer = \"msgpack\"\n").unwrap();
    RedkitConfig::write_default_if_missing(&path).unwrap();

    let config = RedkitConfig::from_file(&path).unwrap();
    assert_eq!(config.serializer_kind().unwrap(), SerializerKind::MessagePack);
    assert_eq!(config.routing, RoutingPolicy::default());
}

#[test]
fn configured_facade_uses_file_settings() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let config = RedkitConfig {
        serializer: "msgpack".to_string(),
        routing: RoutingPolicy {
            read: CommandFlags::DemandReplica,
            write: CommandFlags::PreferPrimary,
        },
    };
    config.write_to_file(&path).unwrap();

    let store = Arc::new(MemoryStore::new());
    let loaded = RedkitConfig::from_file(&path).unwrap();
    let redkit = Redkit::from_config(Arc::clone(&store), &loaded).unwrap();

    redkit.item_set("invoice", &Invoice::sample(7)).unwrap();
    assert_eq!(store.last_flags(), Some(CommandFlags::PreferPrimary));

    let back: Invoice = redkit.item_get("invoice").unwrap();
    assert_eq!(back, Invoice::sample(7));
    assert_eq!(store.last_flags(), Some(CommandFlags::DemandReplica));

    // MessagePack bytes are not JSON
    let json = Redkit::new(Arc::clone(&store));
    assert!(json.item_get::<Invoice>("invoice").is_err());
}

#[test]
fn unknown_serializer_is_rejected() {
    let err = RedkitConfig::from_toml_str("serializer = \"xml\"").unwrap_err();
    assert!(err.is_argument_error());

    let config = RedkitConfig {
        serializer: "yaml".to_string(),
        ..RedkitConfig::default()
    };
    assert!(Redkit::from_config(MemoryStore::shared(), &config).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(RedkitConfig::from_file(&dir.path().join("absent.toml")).is_err());
}
