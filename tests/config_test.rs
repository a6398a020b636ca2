//! Tests for layered settings
//!
//! Local `.treekit.toml` overrides defaults field by field; unspecified
//! fields keep their defaults.

use std::fs;

use tempfile::TempDir;

use treekit::application::ApplicationError;
use treekit::config::{local_config_path, Settings};
use treekit::util::testing;

#[test]
fn given_no_local_file_when_load_then_defaults() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(
        settings.tree.sample,
        "Branch(Branch(Leaf+Leaf)+Branch(Leaf))"
    );
    assert_eq!(settings.iterator.items, vec!["First", "Second", "Third"]);
    assert!(!settings.iterator.reverse);
}

#[test]
fn given_local_file_when_load_then_overrides_only_given_fields() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        r#"
[iterator]
items = ["a", "b"]
reverse = true
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings.iterator.items, vec!["a", "b"]);
    assert!(settings.iterator.reverse);
    assert_eq!(settings.visitor.labels, vec!["KindLabeler1", "KindLabeler2"]);
}

#[test]
fn given_malformed_local_file_when_load_then_config_error() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "[iterator\nitems = 1").unwrap();

    let err = Settings::load(Some(temp.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_settings_when_to_toml_then_parses_back_to_same_settings() {
    testing::init_test_setup();
    let mut settings = Settings::default();
    settings.visitor.labels = vec!["only".to_string()];

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    assert_eq!(parsed, settings);
}
