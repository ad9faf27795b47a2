use std::time::Duration;

use crate::Error;
use crate::WatchConfig;

fn base_config() -> WatchConfig {
    WatchConfig {
        bootstrap_servers: "localhost:9092".to_string(),
        topic: "orders".to_string(),
        message_count: 1,
        timeout_ms: 60000,
        group_id: "topic-gate-test".to_string(),
        from_beginning: false,
    }
}

#[test]
fn test_validate_accepts_base_config() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_brokers() {
    let mut config = base_config();
    config.bootstrap_servers = " , ,".to_string();
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_validate_rejects_empty_topic() {
    let mut config = base_config();
    config.topic = "  ".to_string();
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_validate_rejects_zero_message_count() {
    let mut config = base_config();
    config.message_count = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_brokers_splits_and_trims() {
    let mut config = base_config();
    config.bootstrap_servers = "node1:9092, node2:9092 ,,node3:9092".to_string();
    assert_eq!(config.brokers(), vec!["node1:9092", "node2:9092", "node3:9092"]);
}

#[test]
fn test_timeout_zero_is_valid() {
    let mut config = base_config();
    config.timeout_ms = 0;
    assert!(config.validate().is_ok());
    assert_eq!(config.timeout(), Duration::ZERO);
}

#[test]
fn test_generated_group_ids_are_unique() {
    let toml = r#"
        bootstrap_servers = "localhost:9092"
        topic = "orders"
    "#;
    let parse = || -> WatchConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    };
    let a = parse();
    let b = parse();
    assert_eq!(a.message_count, 1);
    assert_eq!(a.timeout_ms, 60000);
    assert!(a.group_id.starts_with("topic-gate-"));
    assert_ne!(a.group_id, b.group_id);
}
